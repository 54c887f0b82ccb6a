use derive_more::{
    Add, AddAssign, Display, Div, DivAssign, From, Into, Mul, MulAssign, Neg,
    Sub, SubAssign,
};
use serde::{Deserialize, Serialize};

/// A 2D point in screen space. See the module-level docs in [crate::grid]
/// for a description of what screen space means. This also doubles as a 2D
/// vector, e.g. for offsets relative to some origin.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", "self.x", "self.y")]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Length of this point, treated as a vector from the origin
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points
    pub fn distance_to(self, other: Self) -> f64 {
        (other - self).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_arithmetic() {
        let p = Point2::new(1.0, 2.0);
        assert_eq!(p + Point2::new(0.5, -1.0), Point2::new(1.5, 1.0));
        assert_eq!(p - p, Point2::ORIGIN);
        assert_eq!(p * 2.0, Point2::new(2.0, 4.0));
        assert_eq!(-p, Point2::new(-1.0, -2.0));
        assert_eq!(Point2::from((3.0, 4.0)), Point2::new(3.0, 4.0));
    }

    #[test]
    fn test_distance() {
        assert_approx_eq!(Point2::new(3.0, 4.0).length(), 5.0);
        assert_approx_eq!(
            Point2::new(1.0, 1.0).distance_to(Point2::new(4.0, -3.0)),
            5.0
        );
    }
}
