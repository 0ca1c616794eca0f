//! dragzoom - pan/zoom viewport engine with synchronized overlays.
//!
//! Keeps a large image's transform consistent across three coordinate
//! spaces (intrinsic image pixels, the displayed frame, and the
//! viewport) while the user pans and zooms, and moves registered point
//! markers and dragged polygons in lock-step with every change. The
//! engine is headless: rendering, gesture recognition, and event
//! listener plumbing are external collaborators that feed it events and
//! consume [`EngineEvent`] values.

mod bounds;
mod config;
mod constants;
mod engine;
mod error;
mod event;
mod geometry;
mod overlay;
mod polygon;
mod zoom;

pub use config::EngineConfig;
pub use engine::Dragzoom;
pub use error::EngineError;
pub use event::{ActualPoint, EngineEvent, WheelDirection};
pub use geometry::{Offset, Position, Size};
pub use overlay::{OverlayPoint, OverlayStore};
pub use polygon::PolygonDrag;
