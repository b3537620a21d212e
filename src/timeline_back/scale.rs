use super::{
    config::Config,
    geometry::{format_timecode, Point, Rect, TextAlign},
    surface::{StrokeStyle, Surface, TextShape},
    time_axis::TimeAxis,
};

/// baseline of the scale labels
const LABEL_Y: f64 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub second: u32,
    /// relative to the left padding
    pub x: f64,
    pub height: f64,
    pub label: Option<String>,
}

/// the time ruler along the top of the timeline
#[derive(Clone, Copy, Debug, Default)]
pub struct Scale;

impl Scale {
    pub fn height(config: &Config) -> f64 {
        config.scale_height
    }

    pub fn contains_y(y: f64, config: &Config) -> bool {
        0.0 < y && y < Self::height(config)
    }

    /// one tick per visible second, as long as seconds are at least a pixel apart
    ///
    /// labels are dropped where they would collide with the previous one
    pub fn ticks(
        axis: &TimeAxis,
        config: &Config,
        measure: impl Fn(&str) -> f64,
    ) -> Vec<Tick> {
        let mut ticks = Vec::new();
        if axis.pixels_per_second() < 1.0 {
            return ticks;
        }

        let mut last_label_x = f64::NEG_INFINITY;
        let mut last_label_width = 0.0;

        for second in 0..=axis.duration().ceil() as u32 {
            let x = axis.time_to_x(f64::from(second));
            if x >= axis.inner_width() {
                break;
            }
            if x < 0.0 {
                continue;
            }

            let label = (config.show_scale_labels
                && x - last_label_x > 2.0f64.mul_add(config.text_margin, last_label_width))
            .then(|| format_timecode(second));

            if let Some(label) = &label {
                last_label_x = x;
                last_label_width = measure(label);
            }

            ticks.push(Tick {
                second,
                x,
                height: config.anchor_heights.at(second),
                label,
            });
        }

        ticks
    }

    pub fn draw(surface: &mut dyn Surface, axis: &TimeAxis, config: &Config) {
        let height = Self::height(config);

        surface.rect(
            Rect::new(0.0, 0.0, config.width, height),
            Some(config.scale_background_color),
            None,
        );

        let ticks = Self::ticks(axis, config, |label| {
            surface.measure_text(label, config.font.size)
        });

        for tick in ticks {
            let x = config.padding_left + tick.x;
            surface.line(
                Point::new(x, height),
                Point::new(x, height - tick.height),
                StrokeStyle::new(config.scale_color, 1.0),
            );

            if let Some(content) = tick.label {
                surface.text(TextShape {
                    content,
                    position: Point::new(x, LABEL_Y),
                    align: TextAlign::Left,
                    color: config.scale_label_color,
                    size: config.font.size,
                    bold: config.font.bold,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline_back::surface::RecordingSurface;

    fn ticks(duration: f64, inner_width: f64, config: &Config) -> Vec<Tick> {
        let axis = TimeAxis::new(duration, inner_width).unwrap();
        Scale::ticks(&axis, config, |label| label.len() as f64 * 6.0)
    }

    #[test]
    fn one_tick_per_second() {
        let ticks = ticks(30.0, 710.0, &Config::default());

        assert_eq!(ticks.len(), 30);
        assert_eq!(ticks[10].second, 10);
        assert!((ticks[10].height - 10.0).abs() < f64::EPSILON);
        assert!((ticks[11].height - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn labels_leave_room_for_the_previous_one() {
        let ticks = ticks(30.0, 710.0, &Config::default());
        let labelled = ticks
            .iter()
            .filter_map(|tick| tick.label.as_deref())
            .collect::<Vec<_>>();

        // labels are 48 px wide, seconds 23.67 px apart
        assert_eq!(labelled.first(), Some(&"00:00:00"));
        assert_eq!(labelled.get(1), Some(&"00:00:03"));
        assert_eq!(labelled.len(), 10);
    }

    #[test]
    fn labels_can_be_hidden() {
        let config = Config {
            show_scale_labels: false,
            ..Config::default()
        };

        assert!(ticks(30.0, 710.0, &config).iter().all(|tick| tick.label.is_none()));
    }

    #[test]
    fn no_ticks_below_a_pixel_per_second() {
        assert!(ticks(3_600.0, 710.0, &Config::default()).is_empty());
    }

    #[test]
    fn band_is_exclusive_at_both_ends() {
        let config = Config::default();

        assert!(Scale::contains_y(15.0, &config));
        assert!(!Scale::contains_y(0.0, &config));
        assert!(!Scale::contains_y(30.0, &config));
    }

    #[test]
    fn draws_background_anchors_and_labels() {
        let axis = TimeAxis::new(30.0, 710.0).unwrap();
        let config = Config::default();
        let mut surface = RecordingSurface::new();

        Scale::draw(&mut surface, &axis, &config);

        assert_eq!(
            surface.rect_at(0.0),
            Some((Rect::new(0.0, 0.0, 600.0, 30.0), Some(config.scale_background_color)))
        );
        assert!(surface.texts().all(|text| (text.position.y - LABEL_Y).abs() < f64::EPSILON));
        assert!((surface.texts().next().unwrap().position.x - 20.0).abs() < f64::EPSILON);
    }
}
