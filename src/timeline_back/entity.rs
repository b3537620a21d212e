use super::{
    color::Color,
    config::{Config, PeriodShape},
    geometry::{bubble, confine_y, label_origin, Band, Point, Rect},
    handle::{handles_inside, Handle, Side},
    id::EntityId,
    surface::{StrokeStyle, Surface, TextShape},
    time_axis::TimeAxis,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntityKind {
    /// spans a range of media time
    Period,
    /// pins a single instant, drawn with a fixed width
    Marker,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DragMode {
    #[default]
    None,
    Move,
    /// the left handle is grabbed, `time_in` follows the pointer
    ResizeLeft,
    /// the right handle is grabbed, `time_out` follows the pointer
    ResizeRight,
}

/// where the pointer grabbed an entity, relative to its bounds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragAnchor {
    pub origin: Point,
    pub time_in_offset: f64,
    pub time_out_offset: f64,
}

/// the limits a drag has to respect
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragContext {
    pub duration: f64,
    pub min_duration: f64,
    /// lane of the track the entity belongs to
    pub band: Band,
    /// the part of the surface below the scale
    pub body: Band,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    /// start, in seconds
    time_in: f64,
    /// end, in seconds
    time_out: f64,
    color: Color,
    label: Option<String>,
    /// order of the owning track
    track: usize,
    focused: bool,
    /// handles are only shown while the pointer is over the entity
    hovered: bool,
    drag_mode: DragMode,
    dragging: bool,
    /// vertical position while being dragged, otherwise the top of the track
    drag_y: Option<f64>,
}

impl Entity {
    pub(in crate::timeline_back) fn period(
        id: EntityId,
        time_in: f64,
        time_out: f64,
        color: Color,
        label: Option<String>,
        track: usize,
    ) -> Self {
        Self {
            id,
            kind: EntityKind::Period,
            time_in: time_in.min(time_out),
            time_out: time_out.max(time_in),
            color,
            label,
            track,
            focused: false,
            hovered: false,
            drag_mode: DragMode::None,
            dragging: false,
            drag_y: None,
        }
    }

    pub(in crate::timeline_back) fn marker(
        id: EntityId,
        time: f64,
        span: f64,
        color: Color,
        label: Option<String>,
        track: usize,
    ) -> Self {
        Self {
            kind: EntityKind::Marker,
            ..Self::period(id, time, time + span, color, label, track)
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn time_in(&self) -> f64 {
        self.time_in
    }

    pub fn time_out(&self) -> f64 {
        self.time_out
    }

    pub fn span(&self) -> f64 {
        self.time_out - self.time_in
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn track(&self) -> usize {
        self.track
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_y(&self) -> Option<f64> {
        self.drag_y
    }

    pub(in crate::timeline_back) fn set_track(&mut self, track: usize) {
        self.track = track;
    }

    pub(in crate::timeline_back) fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub(in crate::timeline_back) fn set_drag_mode(&mut self, drag_mode: DragMode) {
        self.drag_mode = drag_mode;
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn unfocus(&mut self) {
        self.focused = false;
    }

    pub fn width(&self, axis: &TimeAxis, config: &Config) -> f64 {
        match self.kind {
            EntityKind::Period => axis.time_to_x(self.time_out) - axis.time_to_x(self.time_in),
            EntityKind::Marker => config.marker_width,
        }
    }

    /// whether `time` lies strictly inside the entity
    pub fn contains_time(&self, time: f64) -> bool {
        self.time_in < time && time < self.time_out
    }

    pub fn handles_inside(&self, axis: &TimeAxis, config: &Config) -> bool {
        handles_inside(
            self.width(axis, config),
            config.handle_width,
            config.handle_min_width,
        )
    }

    pub fn handles(&self, axis: &TimeAxis, config: &Config) -> [Handle; 2] {
        let inside = self.handles_inside(axis, config);
        [Handle::new(Side::Left, inside), Handle::new(Side::Right, inside)]
    }

    /// horizontal extent that reacts to the pointer, handles included
    pub fn x_limits(&self, axis: &TimeAxis, config: &Config) -> (f64, f64) {
        let x1 = axis.time_to_x(self.time_in);
        match self.kind {
            EntityKind::Marker => (x1, x1 + config.marker_width),
            EntityKind::Period => {
                let x2 = axis.time_to_x(self.time_out);
                if self.handles_inside(axis, config) {
                    (x1, x2)
                } else {
                    (x1 - config.handle_width, x2 + config.handle_width)
                }
            }
        }
    }

    pub fn hit_test(&self, x: f64, axis: &TimeAxis, config: &Config) -> bool {
        let (x1, x2) = self.x_limits(axis, config);
        (x1..=x2).contains(&x)
    }

    /// the drag a press at `x` would start
    pub fn hover_mode(&self, x: f64, axis: &TimeAxis, config: &Config) -> DragMode {
        if self.kind == EntityKind::Marker {
            return DragMode::Move;
        }

        let local_x = x - axis.time_to_x(self.time_in);
        let width = self.width(axis, config);
        let [left, right] = self.handles(axis, config);

        if left.contains(local_x, width, config.handle_width) {
            DragMode::ResizeLeft
        } else if right.contains(local_x, width, config.handle_width) {
            DragMode::ResizeRight
        } else {
            DragMode::Move
        }
    }

    pub fn begin_drag(&mut self, pointer: Point, mouse_time: f64) -> DragAnchor {
        self.dragging = true;

        DragAnchor {
            origin: pointer,
            time_in_offset: mouse_time - self.time_in,
            time_out_offset: self.time_out - mouse_time,
        }
    }

    /// applies the pointer position to the bounds of the entity
    ///
    /// returns the vertical position the entity is drawn at while dragged
    pub fn continue_drag(
        &mut self,
        anchor: &DragAnchor,
        pointer: Point,
        mouse_time: f64,
        ctx: &DragContext,
    ) -> f64 {
        let drag_mode = match self.kind {
            EntityKind::Marker => DragMode::Move,
            EntityKind::Period => self.drag_mode,
        };

        let y = match drag_mode {
            DragMode::None => ctx.band.top,
            DragMode::Move => {
                let span = self.span();
                self.time_in = (mouse_time - anchor.time_in_offset)
                    .min(ctx.duration - span)
                    .max(0.0);
                self.time_out = self.time_in + span;

                match self.kind {
                    EntityKind::Marker => ctx.band.top,
                    EntityKind::Period => confine_y(
                        ctx.band.top + pointer.y - anchor.origin.y,
                        ctx.band.height(),
                        ctx.body,
                    ),
                }
            }
            DragMode::ResizeLeft => {
                let time_in = mouse_time - anchor.time_in_offset;
                if self.time_out - time_in >= ctx.min_duration {
                    self.time_in = time_in.max(0.0);
                }
                ctx.band.top
            }
            DragMode::ResizeRight => {
                let time_out = mouse_time + anchor.time_out_offset;
                if time_out - self.time_in >= ctx.min_duration {
                    self.time_out = time_out.min(ctx.duration);
                }
                ctx.band.top
            }
        };

        self.drag_y = Some(y);
        y
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
        self.drag_y = None;
    }

    fn style(&self, config: &Config, current_time: f64) -> (Color, Option<StrokeStyle>) {
        if self.focused {
            (config.focus_fill, config.focus_stroke.or(config.period_stroke))
        } else if self.contains_time(current_time) {
            (
                config.highlight_fill.unwrap_or(self.color),
                config.highlight_stroke.or(config.period_stroke),
            )
        } else {
            (self.color, config.period_stroke)
        }
    }

    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        axis: &TimeAxis,
        config: &Config,
        current_time: f64,
        band: Band,
    ) {
        let x = config.padding_left + axis.time_to_x(self.time_in);
        let y = self.drag_y.unwrap_or(band.top);
        let width = self.width(axis, config);
        let height = band.height();
        let (fill, stroke) = self.style(config, current_time);

        if self.kind == EntityKind::Marker {
            surface.rect(Rect::new(x, y + 1.0, width, height - 1.0), Some(fill), stroke);
            return;
        }

        if width < 1.0 {
            return;
        }

        match config.period_shape {
            PeriodShape::Rectangle => {
                surface.rect(Rect::new(x, y + 1.0, width, height - 1.0), Some(fill), stroke);

                if let Some(label) = self.label.as_ref().filter(|_| config.show_period_labels) {
                    surface.text(TextShape {
                        content: label.clone(),
                        position: Point::new(
                            label_origin(x, width, config.text_label.align, config.text_label.padding),
                            config.font.size.mul_add(0.5, height.mul_add(0.5, y)),
                        ),
                        align: config.text_label.align,
                        color: config.text_label.color,
                        size: config.font.size,
                        bold: config.font.bold,
                    });
                }
            }
            PeriodShape::Bubble => {
                let depth = height * self.track as f64;
                surface.path(&bubble(x, width, config.scale_height, depth), Some(fill), stroke);
            }
        }

        if self.hovered {
            let body = Rect::new(x, y, width, height);
            for handle in self.handles(axis, config) {
                let fill = if handle.inside {
                    config.inside_handle_fill
                } else {
                    config.outside_handle_fill
                };
                surface.rect(handle.rect(body, config.handle_width), Some(fill), None);
            }
        }
    }
}
