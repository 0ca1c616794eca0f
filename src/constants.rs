//! Tuned default constants for the pan/zoom engine.
//!
//! All of these can be overridden through [`crate::EngineConfig`]; the
//! values here are the defaults.

use std::time::Duration;

/// Multiplicative step applied to the displayed size per zoom-in tick.
pub const ZOOM_IN_STEP: f32 = 1.25;

/// Multiplicative step applied to the displayed size per zoom-out tick.
pub const ZOOM_OUT_STEP: f32 = 0.8;

/// Default upper bound on the zoom scale (2.0 = 200% of actual size).
pub const DEFAULT_MAX_ZOOM: f32 = 2.0;

/// A computed scale within this distance of the maximum or of 1.0 snaps
/// to that value.
pub const SCALE_SNAP_THRESHOLD: f32 = 0.10;

/// How long the zoom-percentage indicator stays visible after a tick.
pub const SCALE_INDICATOR_DURATION: Duration = Duration::from_millis(500);

/// Floor applied to reported container dimensions of zero, keeping the
/// fit divisions well-defined.
pub const CONTAINER_MIN_EXTENT: f32 = 10.0;

/// Default frame size below which drag-start is reported as suppressed.
pub const DRAG_CUTOFF_WIDTH: f32 = 842.0;

/// See [`DRAG_CUTOFF_WIDTH`].
pub const DRAG_CUTOFF_HEIGHT: f32 = 462.0;
