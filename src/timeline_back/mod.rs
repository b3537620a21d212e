mod color;
pub use color::Color;

mod config;
pub use config::{AnchorHeights, AnchorStep, Config, FontSpec, Mode, PeriodShape, TextLabel};

mod entity;
pub use entity::{DragAnchor, DragContext, DragMode, Entity, EntityKind};

mod error;
pub use error::TimelineError;

mod geometry;
pub use geometry::{
    bubble, confine_y, dashed_line, format_timecode, label_origin, Band, Path, PathCommand,
    Point, Rect, TextAlign,
};

mod handle;
pub use handle::{handles_inside, Handle, Side};

mod id;
pub use id::{EntityId, IdSource};

mod interaction;
pub use interaction::{CursorIcon, DragSession, Interaction, Key, PointerEvent};

mod media;
pub use media::{Media, PlaybackClock};

mod needle;
pub use needle::Needle;

mod scale;
pub use scale::{Scale, Tick};

mod surface;
pub use surface::{RecordingSurface, Shape, StrokeStyle, Surface, TextShape};

mod time_axis;
pub use time_axis::TimeAxis;

mod timeline;
pub use timeline::Timeline;

mod track;
pub use track::Track;
