use super::TimelineError;
use serde::Deserialize;
use std::str::FromStr;

/// an sRGB color with straight alpha
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// opacity, between 0 and 1
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::from_rgba(0, 0, 0, 0.0);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 1.0)
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl FromStr for Color {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimelineError::InvalidColor(s.to_owned());

        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        let short = |i: usize| channel(i..i + 1).map(|c| c * 17);

        match hex.len() {
            3 => Ok(Self::from_rgb(short(0)?, short(1)?, short(2)?)),
            6 => Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::from_rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                f32::from(channel(6..8)?) / 255.0,
            )),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = TimelineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
