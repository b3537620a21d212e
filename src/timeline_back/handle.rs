use super::geometry::Rect;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

/// one of the two resize grips of a period
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Handle {
    pub side: Side,
    /// whether the grip sits inside the body of the period or next to it
    pub inside: bool,
}

impl Handle {
    pub const fn new(side: Side, inside: bool) -> Self {
        Self { side, inside }
    }

    /// horizontal offset of the grip relative to the left edge of the period
    pub fn offset(side: Side, inside: bool, body_width: f64, handle_width: f64) -> f64 {
        match (side, inside) {
            (Side::Left, true) => 1.0,
            (Side::Left, false) => -1.0 - handle_width,
            (Side::Right, true) => body_width - handle_width - 1.0,
            (Side::Right, false) => body_width + 1.0,
        }
    }

    /// the grip of a period drawn at `body`
    pub fn rect(self, body: Rect, handle_width: f64) -> Rect {
        Rect::new(
            body.x + Self::offset(self.side, self.inside, body.width, handle_width),
            body.y + 2.0,
            handle_width,
            body.height - 3.0,
        )
    }

    /// whether `local_x`, measured from the left edge of the period, is on the grip
    pub fn contains(self, local_x: f64, body_width: f64, handle_width: f64) -> bool {
        let start = Self::offset(self.side, self.inside, body_width, handle_width);
        (start..=start + handle_width).contains(&local_x)
    }
}

/// grips move outside once a period is too narrow to hold both of them
pub fn handles_inside(body_width: f64, handle_width: f64, handle_min_width: f64) -> bool {
    body_width > 2.0f64.mul_add(handle_width, handle_min_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_per_side_and_placement() {
        assert!((Handle::offset(Side::Left, true, 100.0, 10.0) - 1.0).abs() < f64::EPSILON);
        assert!((Handle::offset(Side::Left, false, 100.0, 10.0) + 11.0).abs() < f64::EPSILON);
        assert!((Handle::offset(Side::Right, true, 100.0, 10.0) - 89.0).abs() < f64::EPSILON);
        assert!((Handle::offset(Side::Right, false, 100.0, 10.0) - 101.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rect_is_inset_vertically() {
        let rect = Handle::new(Side::Right, true).rect(Rect::new(50.0, 30.0, 100.0, 40.0), 10.0);

        assert_eq!(rect, Rect::new(139.0, 32.0, 10.0, 37.0));
    }

    #[test]
    fn hit_range_spans_the_handle_width() {
        let left = Handle::new(Side::Left, false);

        assert!(left.contains(-11.0, 100.0, 10.0));
        assert!(left.contains(-1.0, 100.0, 10.0));
        assert!(!left.contains(0.5, 100.0, 10.0));
    }

    #[test]
    fn narrow_periods_get_outside_handles() {
        assert!(handles_inside(31.0, 10.0, 10.0));
        assert!(!handles_inside(30.0, 10.0, 10.0));
    }
}
