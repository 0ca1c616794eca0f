//! Tracked point overlays and their synchronization with the image frame.
//!
//! Every registered point stores its *displayed* position. Whenever the
//! frame's transform changes, the store reprojects each point so that its
//! fractional location inside the image is preserved; plain pans shift
//! every point by the frame delta instead, which avoids drift while the
//! size is unchanged.

use std::collections::BTreeMap;

use crate::bounds::{clamp_point, point_bounds};
use crate::event::ActualPoint;
use crate::geometry::{Offset, Position, Size, round2};

/// A tracked point marker in displayed coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPoint {
    pub id: String,
    /// Current displayed position, with the anchor offset applied.
    pub position: Position,
    /// The marker's own anchor compensation. Added back before any
    /// scaling computation and re-subtracted afterwards.
    pub offset: Offset,
}

/// Storage for point overlays, keyed by caller-supplied id.
///
/// `BTreeMap` keeps report order deterministic.
#[derive(Debug, Clone, Default)]
pub struct OverlayStore {
    points: BTreeMap<String, OverlayPoint>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&OverlayPoint> {
        self.points.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlayPoint> {
        self.points.values()
    }

    /// Register a point on first reference; idempotent for a known id.
    ///
    /// `actual` is the point's location in intrinsic image pixels; the
    /// stored position is its displayed projection with the anchor
    /// offset applied. Returns the displayed position either way.
    pub fn ensure_registered(
        &mut self,
        id: impl Into<String>,
        actual: Position,
        offset: Offset,
        frame_position: Position,
        scale: f32,
    ) -> Position {
        let id = id.into();
        self.points
            .entry(id.clone())
            .or_insert_with(|| {
                let position = Position::new(
                    actual.x * scale + frame_position.x - offset.left,
                    actual.y * scale + frame_position.y - offset.top,
                );
                log::trace!("registered point {id} at displayed ({}, {})", position.x, position.y);
                OverlayPoint { id, position, offset }
            })
            .position
    }

    /// Direct write during an active point drag. Unknown ids are ignored.
    pub fn set_position(&mut self, id: &str, position: Position) -> bool {
        match self.points.get_mut(id) {
            Some(point) => {
                point.position = position;
                true
            }
            None => false,
        }
    }

    /// Shift every point by the frame's pan delta.
    pub fn shift_all(&mut self, dx: f32, dy: f32) {
        for point in self.points.values_mut() {
            point.position.x += dx;
            point.position.y += dy;
        }
    }

    /// Reproject every point from the old frame into the new one,
    /// preserving each point's fractional location inside the image.
    ///
    /// This is the single rule used by both the zoom and the
    /// container-resize paths.
    pub fn reproject(
        &mut self,
        old_position: Position,
        old_size: Size,
        new_position: Position,
        new_size: Size,
    ) {
        if self.points.is_empty() || old_size.is_zero() {
            return;
        }
        for point in self.points.values_mut() {
            let held_x = point.position.x + point.offset.left;
            let held_y = point.position.y + point.offset.top;
            let frac_x = (held_x - old_position.x) / old_size.width;
            let frac_y = (held_y - old_position.y) / old_size.height;
            point.position.x = new_size.width * frac_x + new_position.x - point.offset.left;
            point.position.y = new_size.height * frac_y + new_position.y - point.offset.top;
        }
    }

    /// Inverse-project one point to actual image pixels, rounded to two
    /// decimals for reporting.
    pub fn to_actual(&self, id: &str, frame_position: Position, scale: f32) -> Option<ActualPoint> {
        if scale <= 0.0 {
            return None;
        }
        let point = self.points.get(id)?;
        let width = point.position.x - frame_position.x + point.offset.left;
        let height = point.position.y - frame_position.y + point.offset.top;
        Some(ActualPoint {
            id: point.id.clone(),
            x: round2(width / scale),
            y: round2(height / scale),
        })
    }

    /// Report every tracked point in actual coordinates.
    pub fn all_actual(&self, frame_position: Position, scale: f32) -> Vec<ActualPoint> {
        self.points
            .keys()
            .filter_map(|id| self.to_actual(id, frame_position, scale))
            .collect()
    }

    /// Clamp one point to the frame's edges; true when the stored
    /// position was corrected.
    pub fn clamp_to_bounds(&mut self, id: &str, frame: Size, frame_position: Position) -> bool {
        let Some(point) = self.points.get_mut(id) else {
            return false;
        };
        let bounds = point_bounds(frame, frame_position, point.offset);
        let (corrected, out_of_bounds) = clamp_point(point.position, bounds);
        if out_of_bounds {
            point.position = corrected;
        }
        out_of_bounds
    }

    /// Explicitly remove one point.
    pub fn remove(&mut self, id: &str) -> Option<OverlayPoint> {
        self.points.remove(id)
    }

    /// Drop every tracked point (image swap).
    pub fn clear(&mut self) {
        self.points.clear();
    }
}
