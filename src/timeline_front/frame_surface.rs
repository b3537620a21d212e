use crate::timeline_back::{self, PathCommand, StrokeStyle, Surface, TextAlign, TextShape};
use iced::{
    alignment::{Horizontal, Vertical},
    font::{Family, Weight},
    widget::canvas::{Frame, Path, Stroke, Text},
    Color, Font, Pixels, Point, Size,
};
use std::fmt::{Debug, Formatter};

/// draws timeline shapes into an iced canvas frame
pub struct FrameSurface<'a> {
    frame: &'a mut Frame,
    family: Family,
}

impl Debug for FrameSurface<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameSurface")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl<'a> FrameSurface<'a> {
    pub fn new(frame: &'a mut Frame, family: Family) -> Self {
        Self { frame, family }
    }

    fn paint(&mut self, path: &Path, fill: Option<timeline_back::Color>, stroke: Option<StrokeStyle>) {
        if let Some(fill) = fill {
            self.frame.fill(path, color(fill));
        }
        if let Some(stroke) = stroke {
            self.frame.stroke(path, self::stroke(stroke));
        }
    }
}

/// the iced font family for a configured family name
///
/// iced keeps family names as `&'static str`, so a named family is leaked,
/// call this once per config rather than per frame
pub fn font_family(name: &str) -> Family {
    match name.trim().to_ascii_lowercase().as_str() {
        "" | "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(Box::leak(name.trim().to_owned().into_boxed_str())),
    }
}

fn point(point: timeline_back::Point) -> Point {
    Point::new(point.x as f32, point.y as f32)
}

fn color(color: timeline_back::Color) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn stroke(stroke: StrokeStyle) -> Stroke<'static> {
    Stroke::default()
        .with_color(color(stroke.color))
        .with_width(stroke.width as f32)
}

impl Surface for FrameSurface<'_> {
    fn rect(
        &mut self,
        rect: timeline_back::Rect,
        fill: Option<timeline_back::Color>,
        stroke: Option<StrokeStyle>,
    ) {
        let path = Path::rectangle(
            Point::new(rect.x as f32, rect.y as f32),
            Size::new(rect.width as f32, rect.height as f32),
        );
        self.paint(&path, fill, stroke);
    }

    fn line(&mut self, from: timeline_back::Point, to: timeline_back::Point, stroke: StrokeStyle) {
        self.frame
            .stroke(&Path::line(point(from), point(to)), self::stroke(stroke));
    }

    fn path(
        &mut self,
        path: &timeline_back::Path,
        fill: Option<timeline_back::Color>,
        stroke: Option<StrokeStyle>,
    ) {
        let path = Path::new(|builder| {
            for command in path.commands() {
                match *command {
                    PathCommand::MoveTo(to) => builder.move_to(point(to)),
                    PathCommand::LineTo(to) => builder.line_to(point(to)),
                    PathCommand::QuadTo { control, to } => {
                        builder.quadratic_curve_to(point(control), point(to));
                    }
                    PathCommand::Close => builder.close(),
                }
            }
        });
        self.paint(&path, fill, stroke);
    }

    fn text(&mut self, text: TextShape) {
        let font = Font {
            family: self.family,
            weight: if text.bold {
                Weight::Bold
            } else {
                Weight::Normal
            },
            ..Font::DEFAULT
        };

        self.frame.fill_text(Text {
            content: text.content,
            position: point(text.position),
            color: color(text.color),
            size: Pixels(text.size as f32),
            font,
            horizontal_alignment: match text.align {
                TextAlign::Left => Horizontal::Left,
                TextAlign::Middle => Horizontal::Center,
                TextAlign::Right => Horizontal::Right,
            },
            vertical_alignment: Vertical::Bottom,
            ..Text::default()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_families_map_to_iced_ones() {
        assert_eq!(font_family("serif"), Family::Serif);
        assert_eq!(font_family(" Monospace "), Family::Monospace);
        assert_eq!(font_family(""), Family::SansSerif);
        assert_eq!(font_family("Arial"), Family::Name("Arial"));
    }
}
