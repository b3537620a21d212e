use super::TimelineError;

/// the mapping between media time and horizontal pixels
///
/// x coordinates are relative to the left padding of the surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeAxis {
    /// length of the media, in seconds
    duration: f64,
    /// drawable width between the left and right padding, in pixels
    inner_width: f64,
    /// horizontal magnification, at least 1
    zoom: f64,
    /// time at the left edge of the visible window, in seconds
    scroll: f64,
}

impl TimeAxis {
    pub fn new(duration: f64, inner_width: f64) -> Result<Self, TimelineError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TimelineError::InvalidDuration(duration));
        }

        Ok(Self {
            duration,
            inner_width: inner_width.max(1.0),
            zoom: 1.0,
            scroll: 0.0,
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn inner_width(&self) -> f64 {
        self.inner_width
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    /// base pixels per second, before zooming
    pub fn ratio(&self) -> f64 {
        self.inner_width / self.duration
    }

    pub fn pixels_per_second(&self) -> f64 {
        self.zoom * self.ratio()
    }

    pub fn visible_time(&self) -> f64 {
        self.duration / self.zoom
    }

    pub fn max_scroll(&self) -> f64 {
        (self.duration - self.visible_time()).max(0.0)
    }

    pub fn set_inner_width(&mut self, inner_width: f64) {
        self.inner_width = inner_width.max(1.0);
    }

    pub fn set_zoom(&mut self, zoom: f64, max_zoom: f64) {
        self.zoom = zoom.clamp(1.0, max_zoom.max(1.0));
        self.set_scroll(self.scroll);
    }

    pub fn set_scroll(&mut self, scroll: f64) {
        self.scroll = scroll.clamp(0.0, self.max_scroll());
    }

    pub fn time_to_x(&self, time: f64) -> f64 {
        if self.visible_time() < self.duration {
            (time - self.scroll) * self.pixels_per_second()
        } else {
            time * self.pixels_per_second()
        }
    }

    pub fn x_to_time(&self, x: f64) -> f64 {
        x / self.pixels_per_second() + self.scroll.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn axis() -> TimeAxis {
        TimeAxis::new(30.0, 710.0).unwrap()
    }

    #[test]
    fn rejects_invalid_durations() {
        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                TimeAxis::new(duration, 100.0),
                Err(TimelineError::InvalidDuration(_))
            ));
        }
    }

    #[test]
    fn maps_the_whole_duration_onto_the_inner_width() {
        let axis = axis();

        assert!(axis.time_to_x(0.0).abs() < EPSILON);
        assert!((axis.time_to_x(30.0) - 710.0).abs() < EPSILON);
        assert!((axis.visible_time() - 30.0).abs() < EPSILON);
    }

    #[test]
    fn round_trips_at_every_zoom_and_scroll() {
        let mut axis = axis();

        for zoom in [1.0, 1.5, 2.0, 4.0, 5.0] {
            axis.set_zoom(zoom, 5.0);
            for scroll in [0.0, 3.3, 10.0, 100.0] {
                axis.set_scroll(scroll);
                for time in [0.0, 0.05, 7.25, 15.0, 29.99, 30.0] {
                    let back = axis.x_to_time(axis.time_to_x(time));
                    assert!(
                        (back - time).abs() < EPSILON,
                        "zoom {zoom}, scroll {scroll}: expected {time}, got {back}"
                    );
                }
            }
        }
    }

    #[test]
    fn zoom_is_clamped_and_narrows_the_scroll_range() {
        let mut axis = axis();

        axis.set_zoom(10.0, 5.0);
        assert!((axis.zoom() - 5.0).abs() < EPSILON);
        assert!((axis.max_scroll() - 24.0).abs() < EPSILON);

        axis.set_scroll(20.0);
        axis.set_zoom(2.0, 5.0);
        assert!((axis.scroll() - 15.0).abs() < EPSILON);

        axis.set_zoom(0.5, 5.0);
        assert!((axis.zoom() - 1.0).abs() < EPSILON);
        assert!(axis.scroll().abs() < EPSILON);
    }

    #[test]
    fn scroll_has_no_effect_without_zoom() {
        let mut axis = axis();
        axis.set_scroll(12.0);

        assert!(axis.scroll().abs() < EPSILON);
        assert!((axis.time_to_x(15.0) - 355.0).abs() < EPSILON);
    }

    #[test]
    fn zoomed_axis_starts_at_the_scroll_offset() {
        let mut axis = axis();
        axis.set_zoom(2.0, 5.0);
        axis.set_scroll(10.0);

        assert!(axis.time_to_x(10.0).abs() < EPSILON);
        assert!((axis.time_to_x(25.0) - 710.0).abs() < EPSILON);
        assert!(axis.time_to_x(5.0) < 0.0);
    }

    #[test]
    fn is_monotonic() {
        let axis = axis();
        let xs = (0..=300).map(|t| axis.time_to_x(f64::from(t) / 10.0));

        xs.clone()
            .zip(xs.skip(1))
            .for_each(|(a, b)| assert!(a < b, "{a} should be left of {b}"));
    }
}
