use serde::Deserialize;
use strum::{Display, EnumString};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// a horizontal strip of the surface, such as the lane of a track
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    pub top: f64,
    pub bottom: f64,
}

impl Band {
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, to: Point },
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn move_to(mut self, to: Point) -> Self {
        self.commands.push(PathCommand::MoveTo(to));
        self
    }

    #[must_use]
    pub fn line_to(mut self, to: Point) -> Self {
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    #[must_use]
    pub fn quad_to(mut self, control: Point, to: Point) -> Self {
        self.commands.push(PathCommand::QuadTo { control, to });
        self
    }

    #[must_use]
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, EnumString, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Middle,
    Right,
}

/// the outline of a period hanging from the bottom of the scale
///
/// `depth` is how far below the scale the bubble reaches
pub fn bubble(x: f64, width: f64, scale_height: f64, depth: f64) -> Path {
    let bottom = scale_height + depth;

    Path::new()
        .move_to(Point::new(x, scale_height))
        .quad_to(
            Point::new(x, bottom),
            Point::new(width.mul_add(0.5, x), bottom),
        )
        .quad_to(Point::new(x + width, bottom), Point::new(x + width, scale_height))
        .move_to(Point::new(x, scale_height))
        .close()
}

/// a horizontal line made of dashes, one pixel below `y`
///
/// a non-positive `dash` draws a solid line
pub fn dashed_line(x1: f64, x2: f64, y: f64, dash: f64) -> Path {
    let y = y + 1.0;

    if dash <= 0.0 {
        return Path::new()
            .move_to(Point::new(x1, y))
            .line_to(Point::new(x2, y));
    }

    let mut path = Path::new();
    let mut x = x1;
    while x < x2 {
        path = path
            .move_to(Point::new(x, y))
            .line_to(Point::new((x + dash).min(x2), y));
        x += 2.0 * dash;
    }
    path
}

/// the x coordinate a label inside `[x, x + width]` is anchored at
pub fn label_origin(x: f64, width: f64, align: TextAlign, padding: f64) -> f64 {
    match align {
        TextAlign::Left => x + padding,
        TextAlign::Middle => width.mul_add(0.5, x),
        TextAlign::Right => x + width - padding,
    }
}

/// keeps a shape of `height` starting at `y` inside `body`
pub fn confine_y(y: f64, height: f64, body: Band) -> f64 {
    if y + height > body.bottom {
        body.bottom - height
    } else if y < body.top {
        body.top
    } else {
        y
    }
}

/// `HH:MM:SS`, wrapping around after a day
pub fn format_timecode(seconds: u32) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        (seconds / 3600) % 24,
        (seconds / 60) % 60,
        seconds % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let rect = Rect::new(10.0, 12.0, 5.0, 4.0);

        assert!((rect.right() - 15.0).abs() < f64::EPSILON);
        assert!((rect.bottom() - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bubble_hangs_from_the_scale() {
        let path = bubble(100.0, 50.0, 30.0, 40.0);

        assert_eq!(
            path.commands(),
            [
                PathCommand::MoveTo(Point::new(100.0, 30.0)),
                PathCommand::QuadTo {
                    control: Point::new(100.0, 70.0),
                    to: Point::new(125.0, 70.0),
                },
                PathCommand::QuadTo {
                    control: Point::new(150.0, 70.0),
                    to: Point::new(150.0, 30.0),
                },
                PathCommand::MoveTo(Point::new(100.0, 30.0)),
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn dashes_alternate_with_gaps() {
        let path = dashed_line(0.0, 25.0, 9.0, 5.0);
        let segments = path
            .commands()
            .chunks(2)
            .map(|pair| match pair {
                [PathCommand::MoveTo(from), PathCommand::LineTo(to)] => (from.x, to.x),
                _ => panic!("unexpected commands {pair:?}"),
            })
            .collect::<Vec<_>>();

        assert_eq!(segments, [(0.0, 5.0), (10.0, 15.0), (20.0, 25.0)]);
        assert!(path.commands().iter().all(|command| match command {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => (p.y - 10.0).abs() < f64::EPSILON,
            _ => false,
        }));
    }

    #[test]
    fn zero_dash_is_a_solid_line() {
        assert_eq!(dashed_line(0.0, 600.0, 50.0, 0.0).commands().len(), 2);
    }

    #[test]
    fn labels_follow_alignment() {
        assert!((label_origin(100.0, 50.0, TextAlign::Left, 10.0) - 110.0).abs() < f64::EPSILON);
        assert!((label_origin(100.0, 50.0, TextAlign::Middle, 10.0) - 125.0).abs() < f64::EPSILON);
        assert!((label_origin(100.0, 50.0, TextAlign::Right, 10.0) - 140.0).abs() < f64::EPSILON);
    }

    #[test]
    fn confines_to_the_body() {
        let body = Band {
            top: 30.0,
            bottom: 160.0,
        };

        assert!((confine_y(10.0, 20.0, body) - 30.0).abs() < f64::EPSILON);
        assert!((confine_y(150.0, 20.0, body) - 140.0).abs() < f64::EPSILON);
        assert!((confine_y(60.0, 20.0, body) - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn timecodes_wrap_hours() {
        assert_eq!(format_timecode(0), "00:00:00");
        assert_eq!(format_timecode(3_725), "01:02:05");
        assert_eq!(format_timecode(90_061), "01:01:01");
    }
}
