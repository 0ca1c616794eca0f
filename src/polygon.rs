//! Rigid-body polygon dragging.
//!
//! While a polygon is dragged, the whole shape rides an isolated layer
//! that starts at the image frame's offset; the vertices themselves are
//! left untouched until the gesture commits. The per-vertex redraw path
//! stays suspended for the whole gesture so the shape moves as one body.

use crate::error::EngineError;
use crate::geometry::Position;

/// Lifecycle of the isolated polygon-drag layer.
///
/// At most one polygon can be mid-gesture; [`PolygonDrag::start`]
/// enforces that by refusing to leave `Idle` twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PolygonDrag {
    /// No polygon drag in progress.
    #[default]
    Idle,
    /// The layer follows the pointer; vertices stay untouched.
    Dragging {
        id: String,
        /// Vertex list captured at drag start, in actual image pixels.
        vertices: Vec<Position>,
        /// Layer position at drag start (the image frame's offset).
        layer_origin: Position,
        /// Current layer position.
        layer_position: Position,
    },
    /// The gesture ended; the accumulated layer delta awaits conversion
    /// back to actual coordinates.
    Committing {
        id: String,
        vertices: Vec<Position>,
        layer_origin: Position,
        layer_position: Position,
    },
}

impl PolygonDrag {
    pub fn is_idle(&self) -> bool {
        matches!(self, PolygonDrag::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, PolygonDrag::Dragging { .. })
    }

    /// The per-vertex redraw path is suspended for the whole gesture.
    pub fn redraw_suspended(&self) -> bool {
        !self.is_idle()
    }

    /// Current position of the isolated layer, if a gesture is active.
    pub fn layer_position(&self) -> Option<Position> {
        match self {
            PolygonDrag::Idle => None,
            PolygonDrag::Dragging { layer_position, .. }
            | PolygonDrag::Committing { layer_position, .. } => Some(*layer_position),
        }
    }

    /// Begin a gesture. `layer_origin` is the image frame's current
    /// offset, where the isolated layer starts.
    pub fn start(
        &mut self,
        id: String,
        vertices: Vec<Position>,
        layer_origin: Position,
    ) -> Result<(), EngineError> {
        if !self.is_idle() {
            return Err(EngineError::PolygonDragActive);
        }
        *self = PolygonDrag::Dragging {
            id,
            vertices,
            layer_origin,
            layer_position: layer_origin,
        };
        Ok(())
    }

    /// Move the isolated layer. Ignored unless a drag is in progress.
    pub fn move_layer(&mut self, position: Position) {
        if let PolygonDrag::Dragging { layer_position, .. } = self {
            *layer_position = position;
        }
    }

    /// Freeze the gesture for conversion. No-op unless dragging.
    pub fn begin_commit(&mut self) {
        if let PolygonDrag::Dragging {
            id,
            vertices,
            layer_origin,
            layer_position,
        } = std::mem::take(self)
        {
            *self = PolygonDrag::Committing {
                id,
                vertices,
                layer_origin,
                layer_position,
            };
        }
    }

    /// Consume the frozen gesture, returning the captured vertices and
    /// the accumulated layer delta, and go back to idle.
    pub fn finish(&mut self) -> Option<(String, Vec<Position>, Position)> {
        match std::mem::take(self) {
            PolygonDrag::Committing {
                id,
                vertices,
                layer_origin,
                layer_position,
            } => {
                let delta = Position::new(
                    layer_position.x - layer_origin.x,
                    layer_position.y - layer_origin.y,
                );
                Some((id, vertices, delta))
            }
            other => {
                // A finish without a preceding commit leaves the state alone.
                *self = other;
                None
            }
        }
    }
}
