//! Engine configuration.
//!
//! All behavior toggles and tuned constants live here, with JSON
//! import/export so hosts can persist user-facing settings.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_ZOOM, DRAG_CUTOFF_HEIGHT, DRAG_CUTOFF_WIDTH, SCALE_SNAP_THRESHOLD, ZOOM_IN_STEP,
    ZOOM_OUT_STEP,
};
use crate::geometry::Size;

/// Configuration for a [`crate::Dragzoom`] engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on the zoom scale relative to actual size
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f32,

    /// Whether wheel zoom is enabled
    #[serde(default = "default_true")]
    pub zoomable: bool,

    /// Whether image panning is enabled
    #[serde(default = "default_true")]
    pub pannable: bool,

    /// Whether whole-polygon dragging is enabled
    #[serde(default)]
    pub polygon_drag_enabled: bool,

    /// Suppresses all point drag-stop reports when set
    #[serde(default)]
    pub disabled: bool,

    /// Multiplicative displayed-size step per zoom-in tick
    #[serde(default = "default_zoom_in_step")]
    pub zoom_in_step: f32,

    /// Multiplicative displayed-size step per zoom-out tick
    #[serde(default = "default_zoom_out_step")]
    pub zoom_out_step: f32,

    /// Snap distance around the maximum scale and around 1.0
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold: f32,

    /// Displayed sizes fitting inside this report drag-start as
    /// suppressed; `None` disables the cutoff
    #[serde(default = "default_drag_start_cutoff")]
    pub drag_start_cutoff: Option<Size>,
}

fn default_max_zoom() -> f32 {
    DEFAULT_MAX_ZOOM
}

fn default_true() -> bool {
    true
}

fn default_zoom_in_step() -> f32 {
    ZOOM_IN_STEP
}

fn default_zoom_out_step() -> f32 {
    ZOOM_OUT_STEP
}

fn default_snap_threshold() -> f32 {
    SCALE_SNAP_THRESHOLD
}

fn default_drag_start_cutoff() -> Option<Size> {
    Some(Size::new(DRAG_CUTOFF_WIDTH, DRAG_CUTOFF_HEIGHT))
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_zoom: default_max_zoom(),
            zoomable: true,
            pannable: true,
            polygon_drag_enabled: false,
            disabled: false,
            zoom_in_step: default_zoom_in_step(),
            zoom_out_step: default_zoom_out_step(),
            snap_threshold: default_snap_threshold(),
            drag_start_cutoff: default_drag_start_cutoff(),
        }
    }
}

impl EngineConfig {
    /// Export the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import a configuration from JSON. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
