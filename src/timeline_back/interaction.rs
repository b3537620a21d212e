use super::{entity::DragAnchor, geometry::Point, id::EntityId};

/// pointer input, in surface coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    Leave,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Key {
    Delete,
    Escape,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CursorIcon {
    #[default]
    Default,
    Move,
    ResizeLeft,
    ResizeRight,
    Seek,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub entity: EntityId,
    pub anchor: DragAnchor,
    /// the track the entity lands on when released
    pub pending_track: Option<usize>,
}

/// what pointer moves currently mean
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    /// the pointer went down and nothing has been grabbed yet
    ///
    /// `moved` is set once a move grabbed nothing, the release then counts as a click
    Pressed { origin: Point, moved: bool },
    DraggingNeedle,
    DraggingEntity(DragSession),
    /// a new period is being drawn out
    Creating { origin: Point, current: Point },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            Self::DraggingNeedle | Self::DraggingEntity(..) | Self::Creating { .. }
        )
    }
}
