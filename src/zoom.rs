//! Scale snapping and anchor-preserving wheel-zoom math.
//!
//! Split out from the engine as pure functions for testability.

use crate::bounds::clamp_frame;
use crate::geometry::{Position, Size, round2};

/// Snap a candidate displayed width to the usable scale range.
///
/// The width/actual ratio is rounded to two decimals first. A value
/// within `snap_threshold` of `max` (or above it) snaps to `max`; a value
/// within `snap_threshold` of 1.0 snaps to 1.0; anything else is floored
/// at `min`.
pub fn calculate_scale(width: f32, max: f32, actual_width: f32, min: f32, snap_threshold: f32) -> f32 {
    let value = round2(width / actual_width);
    if (value - max).abs() < snap_threshold || value > max {
        return max;
    }
    if (value - 1.0).abs() < snap_threshold {
        return 1.0;
    }
    if value < min { min } else { value }
}

/// Inputs of a single wheel tick.
#[derive(Debug, Clone, Copy)]
pub struct ZoomRequest {
    /// Multiplicative size step (above 1.0 zooms in)
    pub step: f32,
    /// Anchor point relative to the displayed frame origin
    pub anchor: Position,
    /// Displayed size before the tick
    pub current_size: Size,
    /// Frame position before the tick
    pub position: Position,
    /// Intrinsic image size
    pub actual: Size,
    /// Viewport size
    pub container: Size,
    /// Scale of the initial fit, the lower zoom bound
    pub min_scale: f32,
    /// Upper zoom bound
    pub max_zoom: f32,
    /// Scale before the tick
    pub scale_num: f32,
    /// Snap distance for [`calculate_scale`]
    pub snap_threshold: f32,
}

/// Outcome of a wheel tick that was not rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomOutcome {
    /// New displayed size
    pub size: Size,
    /// New scale
    pub scale_num: f32,
    /// New frame position, clamped to the container
    pub position: Position,
    /// The anchor's position inside the resized frame, recorded so the
    /// next tick can reuse it while the cursor is stationary
    pub frame_anchor: Position,
    /// Whether the clamp left at least one axis at the anchor-implied
    /// position (panning would have a visible effect)
    pub can_drag: bool,
}

/// Compute one anchor-preserving zoom step.
///
/// Returns `None` when the tick is rejected: already at `max_zoom` and
/// zooming in, or already at `min_scale` and zooming out.
pub fn compute(req: &ZoomRequest) -> Option<ZoomOutcome> {
    let last_size = req.current_size;

    // Anchor as a fraction of the current frame. Unclamped above 1: a
    // cursor outside the frame extrapolates the pan.
    let scale_x = req.anchor.x / last_size.width;
    let scale_y = req.anchor.y / last_size.height;

    if (req.scale_num >= req.max_zoom && req.step > 1.0)
        || (req.scale_num <= req.min_scale && req.step < 1.0)
    {
        return None;
    }

    let scale_num = calculate_scale(
        req.step * last_size.width,
        req.max_zoom,
        req.actual.width,
        req.min_scale,
        req.snap_threshold,
    );
    let size = Size::new(req.actual.width * scale_num, req.actual.height * scale_num);

    let grown = Size::new(size.width - last_size.width, size.height - last_size.height);

    // Keep the anchor point visually fixed.
    let wanted = Position::new(
        req.position.x - grown.width * scale_x,
        req.position.y - grown.height * scale_y,
    );

    let (position, _) = clamp_frame(size, req.container, wanted);
    let shift = Position::new(wanted.x - position.x, wanted.y - position.y);

    let can_drag = (shift.x == 0.0 || shift.y == 0.0) && req.scale_num != req.min_scale;

    let frame_anchor = Position::new(
        size.width * scale_x + shift.x,
        size.height * scale_y + shift.y,
    );

    Some(ZoomOutcome {
        size,
        scale_num,
        position,
        frame_anchor,
        can_drag,
    })
}
