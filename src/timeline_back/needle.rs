use super::{
    config::Config,
    geometry::Point,
    surface::{StrokeStyle, Surface},
    time_axis::TimeAxis,
};

/// the playback cursor
#[derive(Clone, Copy, Debug, Default)]
pub struct Needle;

impl Needle {
    pub fn x(axis: &TimeAxis, config: &Config, time: f64) -> f64 {
        config.padding_left + axis.time_to_x(time)
    }

    pub fn draw(surface: &mut dyn Surface, axis: &TimeAxis, config: &Config, time: f64) {
        let x = Self::x(axis, config, time);

        surface.line(
            Point::new(x, 0.0),
            Point::new(x, config.cursor_height),
            StrokeStyle::new(config.cursor_color, 1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline_back::surface::{RecordingSurface, Shape};

    #[test]
    fn spans_the_cursor_height_at_the_current_time() {
        let axis = TimeAxis::new(30.0, 710.0).unwrap();
        let config = Config::default();
        let mut surface = RecordingSurface::new();

        Needle::draw(&mut surface, &axis, &config, 15.0);

        assert_eq!(
            surface.shapes,
            [Shape::Line {
                from: Point::new(375.0, 0.0),
                to: Point::new(375.0, 100.0),
                stroke: StrokeStyle::new(config.cursor_color, 1.0),
            }]
        );
    }
}
