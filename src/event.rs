//! Input and output event types for the engine.
//!
//! Mutating handlers return the state changes they caused as
//! [`EngineEvent`] values; the host forwards them to whatever is
//! listening.

use serde::{Deserialize, Serialize};

use crate::geometry::{Position, Size};

/// Direction of a wheel zoom tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    In,
    Out,
}

impl WheelDirection {
    /// Derive the direction from a raw wheel delta (negative scrolls in).
    pub fn from_delta(delta_y: f32) -> Self {
        if delta_y < 0.0 {
            WheelDirection::In
        } else {
            WheelDirection::Out
        }
    }
}

/// A tracked point reported in actual image coordinates, rounded to two
/// decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualPoint {
    pub id: String,
    pub x: f32,
    pub y: f32,
}

/// State changes emitted by the mutating handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The displayed frame was resized and/or re-laid out
    SizeChanged {
        /// Size of the initial fit
        initial: Size,
        /// Size after the change
        current: Size,
        /// Frame position after the change
        position: Position,
    },
    /// A point drag ended; actual coordinates of every tracked point
    DragStopped { points: Vec<ActualPoint> },
    /// A point drag ended; actual coordinates of the point that moved
    SingleDragStopped { point: ActualPoint },
    /// A point was pushed back inside the frame during clamping
    PointClamped { id: String },
    /// A polygon drag committed; the new vertex list in actual coordinates
    PolygonDragStopped {
        id: String,
        vertices: Vec<Position>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_direction_from_delta() {
        assert_eq!(WheelDirection::from_delta(-120.0), WheelDirection::In);
        assert_eq!(WheelDirection::from_delta(120.0), WheelDirection::Out);
        assert_eq!(WheelDirection::from_delta(0.0), WheelDirection::Out);
    }
}
