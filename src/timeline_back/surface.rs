use super::{
    color::Color,
    geometry::{Path, Point, Rect, TextAlign},
};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    #[serde(default = "default_stroke_width")]
    pub width: f64,
}

impl StrokeStyle {
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

fn default_stroke_width() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextShape {
    pub content: String,
    /// anchor of the text, on its baseline
    pub position: Point,
    pub align: TextAlign,
    pub color: Color,
    pub size: f64,
    pub bold: bool,
}

/// the drawing capabilities the timeline needs from a graphics backend
pub trait Surface {
    fn rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<StrokeStyle>);

    fn line(&mut self, from: Point, to: Point, stroke: StrokeStyle);

    fn path(&mut self, path: &Path, fill: Option<Color>, stroke: Option<StrokeStyle>);

    fn text(&mut self, text: TextShape);

    /// width of `content` once drawn at `size`
    ///
    /// backends that can't measure text fall back to an average glyph width
    fn measure_text(&self, content: &str, size: f64) -> f64 {
        content.chars().count() as f64 * size * 0.6
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: StrokeStyle,
    },
    Path {
        path: Path,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    Text(TextShape),
}

/// keeps every drawn shape, in drawing order
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub shapes: Vec<Shape>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextShape> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Text(text) => Some(text),
            _ => None,
        })
    }

    /// the last filled rectangle whose horizontal extent starts at `x`
    pub fn rect_at(&self, x: f64) -> Option<(Rect, Option<Color>)> {
        self.shapes.iter().rev().find_map(|shape| match shape {
            Shape::Rect { rect, fill, .. } if (rect.x - x).abs() < 1e-6 => Some((*rect, *fill)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<StrokeStyle>) {
        self.shapes.push(Shape::Rect { rect, fill, stroke });
    }

    fn line(&mut self, from: Point, to: Point, stroke: StrokeStyle) {
        self.shapes.push(Shape::Line { from, to, stroke });
    }

    fn path(&mut self, path: &Path, fill: Option<Color>, stroke: Option<StrokeStyle>) {
        self.shapes.push(Shape::Path {
            path: path.clone(),
            fill,
            stroke,
        });
    }

    fn text(&mut self, text: TextShape) {
        self.shapes.push(Shape::Text(text));
    }
}
