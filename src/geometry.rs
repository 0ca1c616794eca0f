//! Geometry value types and coordinate-space conversions.
//!
//! A point lives in one of three spaces: *actual* (intrinsic image
//! pixels), *displayed* (the scaled frame on screen), and *container*
//! (the viewport). The conversions here are pure functions; the engine
//! decides when a conversion is valid.

use serde::{Deserialize, Serialize};

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The uninitialized size used before an image has loaded.
    pub fn zero() -> Self {
        Self::default()
    }

    /// True until both dimensions are positive.
    pub fn is_zero(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check whether this size fits entirely within `other` on both axes.
    pub fn fits_within(&self, other: Size) -> bool {
        self.width <= other.width && self.height <= other.height
    }
}

/// A 2D position relative to the viewport origin. May be negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// A marker's own anchor compensation (e.g. an icon's visual center vs.
/// its drag handle). Subtracted before scaling and re-added after.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub left: f32,
    pub top: f32,
}

impl Offset {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// Project a point from actual image pixels into displayed space.
pub fn to_displayed(actual: Position, position: Position, scale: f32) -> Position {
    Position::new(actual.x * scale + position.x, actual.y * scale + position.y)
}

/// Inverse-project a displayed point back to actual image pixels.
///
/// Returns `None` when the scale is not positive (image not laid out
/// yet), so the division never produces NaN or infinity.
pub fn to_actual(displayed: Position, position: Position, scale: f32) -> Option<Position> {
    if scale <= 0.0 {
        return None;
    }
    Some(Position::new(
        (displayed.x - position.x) / scale,
        (displayed.y - position.y) / scale,
    ))
}

/// Project a whole vertex path into displayed space.
pub fn path_to_displayed(path: &[Position], position: Position, scale: f32) -> Vec<Position> {
    path.iter().map(|p| to_displayed(*p, position, scale)).collect()
}

/// Inverse-project a whole vertex path back to actual image pixels.
pub fn path_to_actual(path: &[Position], position: Position, scale: f32) -> Option<Vec<Position>> {
    path.iter().map(|p| to_actual(*p, position, scale)).collect()
}

/// Round to two decimal places for coordinate reporting.
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_to_displayed() {
        let p = to_displayed(Position::new(100.0, 100.0), Position::new(0.0, 0.0), 0.5);
        assert!(approx_eq(p.x, 50.0));
        assert!(approx_eq(p.y, 50.0));

        let p = to_displayed(Position::new(10.0, 20.0), Position::new(-5.0, 30.0), 2.0);
        assert!(approx_eq(p.x, 15.0));
        assert!(approx_eq(p.y, 70.0));
    }

    #[test]
    fn test_round_trip() {
        // to_actual(to_displayed(p)) == p within tolerance
        let position = Position::new(-37.5, 12.25);
        let scale = 0.63;
        for (x, y) in [(0.0, 0.0), (123.4, 567.8), (999.9, 0.1)] {
            let actual = Position::new(x, y);
            let displayed = to_displayed(actual, position, scale);
            let back = to_actual(displayed, position, scale).unwrap();
            assert!(approx_eq(back.x, actual.x));
            assert!(approx_eq(back.y, actual.y));
        }
    }

    #[test]
    fn test_to_actual_zero_scale_guarded() {
        assert!(to_actual(Position::new(10.0, 10.0), Position::zero(), 0.0).is_none());
        assert!(to_actual(Position::new(10.0, 10.0), Position::zero(), -1.0).is_none());
    }

    #[test]
    fn test_path_conversions() {
        let path = vec![Position::new(0.0, 0.0), Position::new(100.0, 50.0)];
        let position = Position::new(10.0, 20.0);
        let displayed = path_to_displayed(&path, position, 0.5);
        assert!(approx_eq(displayed[0].x, 10.0));
        assert!(approx_eq(displayed[1].x, 60.0));
        assert!(approx_eq(displayed[1].y, 45.0));

        let back = path_to_actual(&displayed, position, 0.5).unwrap();
        assert!(approx_eq(back[1].x, 100.0));
        assert!(approx_eq(back[1].y, 50.0));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(100.004), 100.0);
        assert_eq!(round2(99.996), 100.0);
        assert_eq!(round2(0.625), 0.63);
    }

    #[test]
    fn test_size_fits_within() {
        assert!(Size::new(500.0, 250.0).fits_within(Size::new(842.0, 462.0)));
        assert!(!Size::new(900.0, 250.0).fits_within(Size::new(842.0, 462.0)));
        assert!(Size::new(842.0, 462.0).fits_within(Size::new(842.0, 462.0)));
    }
}
