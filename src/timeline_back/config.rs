use super::{
    color::Color,
    geometry::{Band, TextAlign},
    surface::StrokeStyle,
    TimelineError,
};
use serde::Deserialize;
use std::{fs::read_to_string, path::Path};
use strum::{Display, EnumString, VariantArray};

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, EnumString, Eq, PartialEq, VariantArray)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PeriodShape {
    #[default]
    Rectangle,
    Bubble,
}

/// which edits pointer gestures are allowed to make
#[derive(Clone, Copy, Debug, Default, Deserialize, Display, EnumString, Eq, PartialEq, VariantArray)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// seeking and selecting only
    Read,
    /// dragging empty space creates periods, clicking it creates markers
    Create,
    /// moving, resizing and reassigning entities
    #[default]
    Update,
    /// clicking an entity removes it
    Delete,
}

impl Mode {
    pub fn allows_editing(self) -> bool {
        self != Self::Read
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontSpec {
    pub family: String,
    /// in pixels
    pub size: f64,
    pub bold: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Arial".to_owned(),
            size: 11.0,
            bold: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextLabel {
    pub color: Color,
    pub align: TextAlign,
    pub padding: f64,
}

impl Default for TextLabel {
    fn default() -> Self {
        Self {
            color: Color::from_rgb(0xee, 0xee, 0xee),
            align: TextAlign::Left,
            padding: 10.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct AnchorStep {
    /// the anchor of every second divisible by this is raised
    pub every: u32,
    pub height: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnchorHeights {
    pub default: f64,
    pub steps: Vec<AnchorStep>,
}

impl AnchorHeights {
    /// height of the scale anchor of `second`, the coarsest matching step wins
    pub fn at(&self, second: u32) -> f64 {
        self.steps
            .iter()
            .filter(|step| step.every != 0 && second % step.every == 0)
            .max_by_key(|step| step.every)
            .map_or(self.default, |step| step.height)
    }
}

impl Default for AnchorHeights {
    fn default() -> Self {
        Self {
            default: 5.0,
            steps: vec![
                AnchorStep {
                    every: 10,
                    height: 10.0,
                },
                AnchorStep {
                    every: 30,
                    height: 14.0,
                },
                AnchorStep {
                    every: 60,
                    height: 18.0,
                },
            ],
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// height of the whole surface, in pixels
    pub height: f64,
    /// width of the whole surface, in pixels
    pub width: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub number_of_tracks: usize,
    pub period_shape: PeriodShape,
    pub mode: Mode,
    /// height of the time ruler at the top of the surface
    pub scale_height: f64,
    pub cursor_height: f64,
    pub max_scale_factor: f64,
    /// shortest span a resize may leave, also the span of every marker, in seconds
    pub min_duration: f64,
    pub handle_width: f64,
    pub handle_min_width: f64,
    pub marker_width: f64,
    /// whether track lanes stop at the horizontal padding
    pub tracks_padding: bool,
    pub text_margin: f64,
    pub show_scale_labels: bool,
    pub show_period_labels: bool,
    pub anchor_heights: AnchorHeights,
    pub font: FontSpec,
    pub text_label: TextLabel,

    pub background_color: Color,
    pub scale_background_color: Color,
    pub scale_color: Color,
    pub scale_label_color: Color,
    pub track_separator_color: Option<Color>,
    /// dash length of the track separators, 0 for solid lines
    pub track_separator_dotted_width: f64,
    pub cursor_color: Color,
    pub focus_fill: Color,
    pub focus_stroke: Option<StrokeStyle>,
    pub highlight_fill: Option<Color>,
    pub highlight_stroke: Option<StrokeStyle>,
    pub highlight_track_fill: Option<Color>,
    pub period_stroke: Option<StrokeStyle>,
    pub new_period_color: Color,
    pub inside_handle_fill: Color,
    pub outside_handle_fill: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            height: 160.0,
            width: 600.0,
            padding_left: 20.0,
            padding_right: 20.0,
            number_of_tracks: 3,
            period_shape: PeriodShape::default(),
            mode: Mode::default(),
            scale_height: 30.0,
            cursor_height: 100.0,
            max_scale_factor: 5.0,
            min_duration: 0.05,
            handle_width: 10.0,
            handle_min_width: 10.0,
            marker_width: 3.0,
            tracks_padding: false,
            text_margin: 5.0,
            show_scale_labels: true,
            show_period_labels: true,
            anchor_heights: AnchorHeights::default(),
            font: FontSpec::default(),
            text_label: TextLabel::default(),

            background_color: Color::from_rgb(0xdd, 0xdd, 0xdd),
            scale_background_color: Color::from_rgb(0x11, 0x11, 0x11),
            scale_color: Color::from_rgb(0xcc, 0xcc, 0xcc),
            scale_label_color: Color::from_rgb(0xee, 0xee, 0xee),
            track_separator_color: Some(Color::WHITE),
            track_separator_dotted_width: 0.0,
            cursor_color: Color::from_rgb(0xff, 0x00, 0x00),
            focus_fill: Color::from_rgb(0xa6, 0x6b, 0x00),
            focus_stroke: None,
            highlight_fill: Some(Color::from_rgb(0xae, 0xae, 0xae)),
            highlight_stroke: Some(StrokeStyle::new(Color::from_rgb(0xff, 0xff, 0x00), 1.0)),
            highlight_track_fill: Some(Color::from_rgb(0xee, 0xee, 0xee)),
            period_stroke: None,
            new_period_color: Color::from_rgb(0x0a, 0x3a, 0xee),
            inside_handle_fill: Color::from_rgba(255, 255, 255, 0.3),
            outside_handle_fill: Color::from_rgba(180, 180, 180, 0.3),
        }
    }
}

impl Config {
    pub fn read(path: &Path) -> Result<Self, TimelineError> {
        let contents = read_to_string(path).map_err(|source| TimelineError::Io {
            path: path.to_owned(),
            source,
        })?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, TimelineError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TimelineError> {
        if self.number_of_tracks == 0 {
            return Err(TimelineError::InvalidConfig("numberOfTracks must be at least 1"));
        }
        if !(self.scale_height >= 0.0 && self.height > self.scale_height) {
            return Err(TimelineError::InvalidConfig(
                "height must be greater than scaleHeight",
            ));
        }
        if !(self.width > self.padding_left + self.padding_right) {
            return Err(TimelineError::InvalidConfig(
                "width must be greater than the horizontal padding",
            ));
        }
        if !(self.max_scale_factor >= 1.0) {
            return Err(TimelineError::InvalidConfig("maxScaleFactor must be at least 1"));
        }
        if !(self.min_duration.is_finite() && self.min_duration > 0.0) {
            return Err(TimelineError::InvalidConfig("minDuration must be positive"));
        }
        if !(self.handle_width >= 0.0 && self.marker_width > 0.0) {
            return Err(TimelineError::InvalidConfig(
                "handleWidth must not be negative and markerWidth must be positive",
            ));
        }

        Ok(())
    }

    pub fn inner_width(&self) -> f64 {
        self.width - self.padding_left - self.padding_right
    }

    /// the part of the surface below the scale
    pub fn body(&self) -> Band {
        Band {
            top: self.scale_height,
            bottom: self.height,
        }
    }
}
