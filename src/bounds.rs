//! Boundary clamping for the displayed frame and for individual overlays.

use crate::geometry::{Offset, Position, Size};

/// Axis-wise clamp of the displayed frame against the container.
///
/// When the frame is no larger than the container on an axis, the frame
/// is centered on that axis and dragging has no effect there. Otherwise
/// the frame edge may never retreat past the container edge:
/// `-(frame - container) <= pos <= 0`.
///
/// The flag reports whether clamping moved the frame.
pub fn clamp_frame(frame: Size, container: Size, position: Position) -> (Position, bool) {
    let mut corrected = position;

    if frame.width <= container.width {
        corrected.x = (container.width - frame.width) / 2.0;
    } else if position.x > 0.0 {
        corrected.x = 0.0;
    } else if position.x < -(frame.width - container.width) {
        corrected.x = -(frame.width - container.width);
    }

    if frame.height <= container.height {
        corrected.y = (container.height - frame.height) / 2.0;
    } else if position.y > 0.0 {
        corrected.y = 0.0;
    } else if position.y < -(frame.height - container.height) {
        corrected.y = -(frame.height - container.height);
    }

    let moved = corrected != position;
    (corrected, moved)
}

/// The rectangle a point overlay may occupy: the displayed frame's four
/// edges, each shifted by the overlay's own anchor offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

pub fn point_bounds(frame: Size, frame_position: Position, offset: Offset) -> PointBounds {
    PointBounds {
        left: frame_position.x - offset.left,
        top: frame_position.y - offset.top,
        right: frame_position.x + frame.width - offset.left,
        bottom: frame_position.y + frame.height - offset.top,
    }
}

/// Clamp a point into `bounds`; the flag reports whether it was outside.
pub fn clamp_point(position: Position, bounds: PointBounds) -> (Position, bool) {
    let mut corrected = position;
    let mut out_of_bounds = false;

    if position.x > bounds.right || position.x < bounds.left {
        corrected.x = if position.x > bounds.right {
            bounds.right
        } else {
            bounds.left
        };
        out_of_bounds = true;
    }
    if position.y > bounds.bottom || position.y < bounds.top {
        corrected.y = if position.y > bounds.bottom {
            bounds.bottom
        } else {
            bounds.top
        };
        out_of_bounds = true;
    }

    (corrected, out_of_bounds)
}
