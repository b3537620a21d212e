use super::FrameSurface;
use crate::timeline_back::{self, CursorIcon, Media, PointerEvent, Timeline};
use iced::{
    event::Status,
    font::Family,
    mouse::{self, Cursor, Interaction},
    widget::canvas::{self, Frame, Geometry},
    Rectangle, Renderer, Theme,
};
use log::error;
use std::fmt::{Debug, Formatter};

#[derive(Clone, Copy, Debug)]
pub enum TimelineMessage {
    /// pointer input, along with the current width of the canvas
    Pointer(PointerEvent, f32),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct State {
    /// the left button went down on the canvas and hasn't been released yet
    pressed: bool,
    /// the cursor was over the canvas during the last move
    hovering: bool,
    /// the last known cursor position, for releases outside the window
    last: Option<timeline_back::Point>,
}

/// renders a timeline and turns mouse input into pointer events for it
pub struct TimelineCanvas<'a, M> {
    timeline: &'a Timeline<M>,
    family: Family,
}

impl<M> Debug for TimelineCanvas<'_, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineCanvas")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl<'a, M> TimelineCanvas<'a, M> {
    pub fn new(timeline: &'a Timeline<M>, family: Family) -> Self {
        Self { timeline, family }
    }
}

/// maps a mouse event to the pointer event the timeline should see
///
/// `position` is relative to the canvas, `None` once the cursor left the window
fn pointer_event(
    state: &mut State,
    event: mouse::Event,
    position: Option<timeline_back::Point>,
    inside: bool,
) -> Option<PointerEvent> {
    if position.is_some() {
        state.last = position;
    }

    match (event, position) {
        (mouse::Event::ButtonPressed(mouse::Button::Left), Some(position)) if inside => {
            state.pressed = true;
            Some(PointerEvent::Down(position))
        }
        (mouse::Event::ButtonReleased(mouse::Button::Left), _) if state.pressed => {
            state.pressed = false;
            state.last.map(PointerEvent::Up)
        }
        (mouse::Event::CursorMoved { .. }, Some(position)) if inside || state.pressed => {
            state.hovering = inside;
            Some(PointerEvent::Move(position))
        }
        (mouse::Event::CursorMoved { .. } | mouse::Event::CursorLeft, _)
            if state.hovering && !state.pressed =>
        {
            state.hovering = false;
            Some(PointerEvent::Leave)
        }
        _ => None,
    }
}

impl<M: Media> canvas::Program<TimelineMessage> for TimelineCanvas<'_, M> {
    type State = State;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (Status, Option<TimelineMessage>) {
        let canvas::Event::Mouse(event) = event else {
            return (Status::Ignored, None);
        };

        let inside = cursor.is_over(bounds);
        let position = cursor.position().map(|position| {
            timeline_back::Point::new(
                f64::from(position.x - bounds.x),
                f64::from(position.y - bounds.y),
            )
        });

        let Some(pointer) = pointer_event(state, event, position, inside) else {
            return (Status::Ignored, None);
        };

        (
            Status::Captured,
            Some(TimelineMessage::Pointer(pointer, bounds.width)),
        )
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        let mut surface = FrameSurface::new(&mut frame, self.family);
        if let Err(err) = self.timeline.render(&mut surface) {
            error!("{err}");
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> Interaction {
        if !state.pressed && !cursor.is_over(bounds) {
            return Interaction::default();
        }

        match self.timeline.cursor_icon() {
            CursorIcon::Default => Interaction::default(),
            CursorIcon::Move if self.timeline.interaction().is_dragging() => {
                Interaction::Grabbing
            }
            CursorIcon::Move => Interaction::Grab,
            CursorIcon::ResizeLeft | CursorIcon::ResizeRight | CursorIcon::Seek => {
                Interaction::ResizingHorizontally
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline_back::Point;

    fn moved(x: f32, y: f32) -> mouse::Event {
        mouse::Event::CursorMoved {
            position: iced::Point::new(x, y),
        }
    }

    #[test]
    fn release_outside_the_window_still_ends_the_press() {
        let mut state = State::default();
        let press = Point::new(10.0, 40.0);
        let last = Point::new(300.0, 40.0);

        assert_eq!(
            pointer_event(
                &mut state,
                mouse::Event::ButtonPressed(mouse::Button::Left),
                Some(press),
                true
            ),
            Some(PointerEvent::Down(press))
        );
        assert_eq!(
            pointer_event(&mut state, moved(300.0, 40.0), Some(last), false),
            Some(PointerEvent::Move(last))
        );
        assert_eq!(
            pointer_event(&mut state, mouse::Event::CursorLeft, None, false),
            None
        );
        assert_eq!(
            pointer_event(
                &mut state,
                mouse::Event::ButtonReleased(mouse::Button::Left),
                None,
                false
            ),
            Some(PointerEvent::Up(last))
        );
        assert!(!state.pressed);
        assert_eq!(
            pointer_event(&mut state, moved(310.0, 40.0), Some(last), false),
            None
        );
    }

    #[test]
    fn leaving_while_hovering_emits_leave() {
        let mut state = State::default();
        let inside = Point::new(50.0, 50.0);

        assert_eq!(
            pointer_event(&mut state, moved(50.0, 50.0), Some(inside), true),
            Some(PointerEvent::Move(inside))
        );
        assert_eq!(
            pointer_event(&mut state, mouse::Event::CursorLeft, None, false),
            Some(PointerEvent::Leave)
        );
        assert_eq!(
            pointer_event(
                &mut state,
                mouse::Event::ButtonReleased(mouse::Button::Left),
                None,
                false
            ),
            None
        );
    }
}
