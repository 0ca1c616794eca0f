//! The pan/zoom engine: session state and event handlers.
//!
//! One [`Dragzoom`] instance owns the transform for one image inside one
//! viewport. Callers feed it discrete events (image load, resize, wheel,
//! drag) and receive the resulting state changes as
//! [`EngineEvent`] values; handlers run to completion, so overlay state
//! is never observable mid-transform. The instance is the single writer
//! of its own state.

use web_time::Instant;

use crate::bounds::clamp_frame;
use crate::config::EngineConfig;
use crate::constants::{CONTAINER_MIN_EXTENT, SCALE_INDICATOR_DURATION};
use crate::error::EngineError;
use crate::event::{ActualPoint, EngineEvent, WheelDirection};
use crate::geometry::{self, Offset, Position, Size};
use crate::overlay::OverlayStore;
use crate::polygon::PolygonDrag;
use crate::zoom::{self, ZoomRequest};

/// Cross-event session state. Everything that survives between handler
/// calls is a named field here.
#[derive(Debug, Clone)]
struct Session {
    /// Viewport dimensions, floored to [`CONTAINER_MIN_EXTENT`] per axis.
    container: Size,
    /// Intrinsic image size; zero until an image loads.
    actual: Size,
    /// Displayed size of the initial fit; fixes the minimum scale.
    init_size: Size,
    /// Centered position of the initial fit.
    init_position: Position,
    /// Displayed size after the latest transform.
    current_size: Size,
    /// Displayed size before the latest transform, the reprojection
    /// baseline.
    last_size: Size,
    /// Committed frame position, the overlay baseline.
    current_position: Position,
    /// Scale relative to the actual size (1.0 = 100%).
    scale_num: f32,
    /// Advisory: whether panning would have a visible effect after the
    /// latest zoom.
    can_drag: bool,
    /// Cursor position of the previous wheel tick, container-relative.
    last_wheel_cursor: Option<Position>,
    /// The anchor's frame position recorded after the previous zoom,
    /// reused while the cursor is stationary.
    frame_anchor: Option<Position>,
    /// When the zoom-percentage indicator was last shown.
    indicator_shown: Option<Instant>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            container: Size::zero(),
            actual: Size::zero(),
            init_size: Size::zero(),
            init_position: Position::zero(),
            current_size: Size::zero(),
            last_size: Size::zero(),
            current_position: Position::zero(),
            scale_num: 1.0,
            can_drag: true,
            last_wheel_cursor: None,
            frame_anchor: None,
            indicator_shown: None,
        }
    }
}

/// Pan/zoom engine for one image inside one viewport.
#[derive(Debug, Default)]
pub struct Dragzoom {
    config: EngineConfig,
    session: Session,
    overlays: OverlayStore,
    polygon: PolygonDrag,
}

impl Dragzoom {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// True once an image with positive dimensions has loaded.
    pub fn is_loaded(&self) -> bool {
        !self.session.actual.is_zero()
    }

    /// Current scale relative to the actual image size.
    pub fn scale_num(&self) -> f32 {
        self.session.scale_num
    }

    /// Scale of the initial fit, the lower zoom bound.
    pub fn min_scale(&self) -> f32 {
        if self.is_loaded() {
            self.session.init_size.width / self.session.actual.width
        } else {
            1.0
        }
    }

    pub fn current_size(&self) -> Size {
        self.session.current_size
    }

    pub fn current_position(&self) -> Position {
        self.session.current_position
    }

    pub fn container_size(&self) -> Size {
        self.session.container
    }

    pub fn init_size(&self) -> Size {
        self.session.init_size
    }

    /// Advisory flag for the host's cursor styling: whether panning
    /// would visibly move the frame.
    pub fn can_drag(&self) -> bool {
        self.session.can_drag
    }

    /// Whether an image-drag gesture may start at all.
    ///
    /// False when panning is disabled or the displayed frame fits inside
    /// the configured drag-start cutoff.
    pub fn can_start_drag(&self) -> bool {
        if !self.config.pannable {
            return false;
        }
        match self.config.drag_start_cutoff {
            Some(cutoff) => !self.session.current_size.fits_within(cutoff),
            None => true,
        }
    }

    /// Whether the transient zoom-percentage indicator is still within
    /// its display window.
    pub fn scale_indicator_visible(&self) -> bool {
        self.session
            .indicator_shown
            .is_some_and(|shown| shown.elapsed() < SCALE_INDICATOR_DURATION)
    }

    /// The indicator text, e.g. `"63%"`.
    pub fn scale_percent(&self) -> String {
        format!("{:.0}%", self.session.scale_num * 100.0)
    }

    /// True while a polygon gesture suspends the per-vertex redraw path.
    pub fn redraw_suspended(&self) -> bool {
        self.polygon.redraw_suspended()
    }

    /// Position of the isolated polygon-drag layer, if a gesture is
    /// active.
    pub fn polygon_layer_position(&self) -> Option<Position> {
        self.polygon.layer_position()
    }

    // ------------------------------------------------------------------
    // Initialization and layout
    // ------------------------------------------------------------------

    /// Load a new image's intrinsic dimensions and lay out the initial
    /// fit. Degenerate dimensions are ignored.
    pub fn load_image(&mut self, actual: Size) -> Vec<EngineEvent> {
        if actual.is_zero() {
            log::warn!(
                "ignoring image load with degenerate size {}x{}",
                actual.width,
                actual.height
            );
            return Vec::new();
        }
        if self.session.container.is_zero() {
            self.session.container = Size::new(CONTAINER_MIN_EXTENT, CONTAINER_MIN_EXTENT);
        }
        self.session.actual = actual;
        log::debug!("image loaded at {}x{}", actual.width, actual.height);
        vec![self.layout_initial()]
    }

    /// Forget the current image and every overlay (image swap). The next
    /// [`Self::load_image`] re-initializes the layout.
    pub fn reset(&mut self) {
        self.session.actual = Size::zero();
        self.session.current_size = Size::zero();
        self.session.last_size = Size::zero();
        self.session.last_wheel_cursor = None;
        self.session.frame_anchor = None;
        self.overlays.clear();
        self.polygon = PolygonDrag::Idle;
        log::debug!("session reset for image swap");
    }

    /// Viewport resize notification. Zero axes are floored to keep the
    /// fit divisions well-defined; an unchanged size is a no-op.
    pub fn set_container_size(&mut self, size: Size) -> Vec<EngineEvent> {
        let floored = Size::new(
            if size.width > 0.0 { size.width } else { CONTAINER_MIN_EXTENT },
            if size.height > 0.0 { size.height } else { CONTAINER_MIN_EXTENT },
        );
        if floored == self.session.container && !self.session.current_size.is_zero() {
            return Vec::new();
        }
        self.session.container = floored;
        if !self.is_loaded() {
            return Vec::new();
        }
        vec![self.relayout_for_container()]
    }

    /// The initial fit: scaled down to fit an overflowing image, used
    /// as-is otherwise.
    fn compute_fit(&self) -> (Size, f32) {
        let container = self.session.container;
        let actual = self.session.actual;
        if actual.width > container.width || actual.height > container.height {
            let scale_max =
                (actual.width / container.width).max(actual.height / container.height);
            let size = Size::new(actual.width / scale_max, actual.height / scale_max);
            let min = self.session.init_size.width / actual.width;
            let scale_num = zoom::calculate_scale(
                size.width,
                self.config.max_zoom,
                actual.width,
                min,
                self.config.snap_threshold,
            );
            (size, scale_num)
        } else {
            (actual, 1.0)
        }
    }

    fn centered(&self, size: Size) -> Position {
        Position::new(
            (self.session.container.width - size.width) / 2.0,
            (self.session.container.height - size.height) / 2.0,
        )
    }

    /// Image-load path: fit, center, and rebase the overlay positions on
    /// the new frame position by delta.
    fn layout_initial(&mut self) -> EngineEvent {
        let (size, scale_num) = self.compute_fit();
        let position = self.centered(size);

        let session = &mut self.session;
        session.init_size = size;
        session.init_position = position;
        session.current_size = size;
        session.last_size = size;
        session.scale_num = scale_num;
        session.can_drag = false;
        session.last_wheel_cursor = None;
        session.frame_anchor = None;

        let dx = position.x - session.current_position.x;
        let dy = position.y - session.current_position.y;
        self.overlays.shift_all(dx, dy);
        self.session.current_position = position;

        EngineEvent::SizeChanged {
            initial: size,
            current: size,
            position,
        }
    }

    /// Container-resize path: refit and reproject every overlay from the
    /// previous frame into the new one.
    fn relayout_for_container(&mut self) -> EngineEvent {
        let old_position = self.session.current_position;
        let old_size = self.session.last_size;

        let (size, scale_num) = self.compute_fit();
        let position = self.centered(size);

        let session = &mut self.session;
        session.init_size = size;
        session.init_position = position;
        session.current_size = size;
        session.scale_num = scale_num;
        session.can_drag = false;
        session.last_wheel_cursor = None;
        session.frame_anchor = None;

        self.overlays.reproject(old_position, old_size, position, size);
        self.session.last_size = size;
        self.session.current_position = position;

        EngineEvent::SizeChanged {
            initial: size,
            current: size,
            position,
        }
    }

    /// Commit a new frame size/position and reproject every overlay.
    fn apply_transform(&mut self, size: Size, position: Position) -> EngineEvent {
        let old_position = self.session.current_position;
        let old_size = self.session.last_size;

        self.overlays.reproject(old_position, old_size, position, size);
        self.session.current_position = position;
        self.session.current_size = size;
        self.session.last_size = size;

        EngineEvent::SizeChanged {
            initial: self.session.init_size,
            current: size,
            position,
        }
    }

    /// Ratio between the displayed and the actual size. Zero before an
    /// image is laid out; conversions are guarded on it.
    fn layout_scale(&self) -> f32 {
        if self.is_loaded() {
            self.session.current_size.width / self.session.actual.width
        } else {
            0.0
        }
    }

    // ------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------

    /// One wheel tick. `cursor` is container-relative; the point under it
    /// stays visually fixed across the zoom.
    pub fn on_wheel(&mut self, cursor: Position, direction: WheelDirection) -> Vec<EngineEvent> {
        if !self.config.zoomable || !self.is_loaded() || !self.polygon.is_idle() {
            return Vec::new();
        }
        let step = match direction {
            WheelDirection::In => self.config.zoom_in_step,
            WheelDirection::Out => self.config.zoom_out_step,
        };

        let session = &self.session;
        // While the cursor is stationary across ticks, reuse the frame
        // anchor recorded after the previous zoom; wheel events outrun
        // pointer-move events during continuous zooming.
        let anchor = match session.frame_anchor {
            Some(anchor) if session.last_wheel_cursor == Some(cursor) => anchor,
            _ => Position::new(
                (cursor.x - session.current_position.x).max(0.0),
                (cursor.y - session.current_position.y).max(0.0),
            ),
        };

        let request = ZoomRequest {
            step,
            anchor,
            current_size: session.current_size,
            position: session.current_position,
            actual: session.actual,
            container: session.container,
            min_scale: self.min_scale(),
            max_zoom: self.config.max_zoom,
            scale_num: session.scale_num,
            snap_threshold: self.config.snap_threshold,
        };
        let Some(outcome) = zoom::compute(&request) else {
            log::trace!("zoom tick rejected at scale {:.2}", session.scale_num);
            return Vec::new();
        };

        self.session.last_wheel_cursor = Some(cursor);
        self.session.frame_anchor = Some(outcome.frame_anchor);
        self.session.scale_num = outcome.scale_num;
        self.session.can_drag = outcome.can_drag;
        self.session.indicator_shown = Some(Instant::now());
        log::debug!("zoomed to scale {:.2}", outcome.scale_num);

        vec![self.apply_transform(outcome.size, outcome.position)]
    }

    // ------------------------------------------------------------------
    // Image pan
    // ------------------------------------------------------------------

    /// Image-drag move. The proposed position is clamped against the
    /// container and every overlay follows by the same delta.
    pub fn on_drag_move(&mut self, position: Position) {
        if !self.config.pannable || !self.is_loaded() || !self.polygon.is_idle() {
            return;
        }
        let (clamped, _) =
            clamp_frame(self.session.current_size, self.session.container, position);
        self.commit_position(clamped);
    }

    /// Image-drag end. The position is already committed on every move;
    /// kept for gesture symmetry.
    pub fn on_drag_stop(&mut self) {
        let position = self.session.current_position;
        self.commit_position(position);
    }

    fn commit_position(&mut self, position: Position) {
        let dx = position.x - self.session.current_position.x;
        let dy = position.y - self.session.current_position.y;
        if dx != 0.0 || dy != 0.0 {
            self.overlays.shift_all(dx, dy);
        }
        self.session.current_position = position;
    }

    // ------------------------------------------------------------------
    // Point overlays
    // ------------------------------------------------------------------

    /// Register a point on first use and return its displayed position.
    ///
    /// `actual` is in intrinsic image pixels. `None` until an image is
    /// laid out (a zero scale cannot be projected).
    pub fn ensure_point(
        &mut self,
        id: impl Into<String>,
        actual: Position,
        offset: Offset,
    ) -> Option<Position> {
        let scale = self.layout_scale();
        if scale <= 0.0 {
            return None;
        }
        Some(self.overlays.ensure_registered(
            id,
            actual,
            offset,
            self.session.current_position,
            scale,
        ))
    }

    /// Direct position write during an active point drag. Unknown ids
    /// are ignored.
    pub fn move_point(&mut self, id: &str, position: Position) {
        self.overlays.set_position(id, position);
    }

    /// A point drag ended: clamp the point to the frame and report
    /// actual coordinates. Suppressed entirely by `config.disabled`.
    pub fn end_point_drag(&mut self, id: &str) -> Vec<EngineEvent> {
        if self.config.disabled || self.overlays.get(id).is_none() {
            return Vec::new();
        }

        let mut events = Vec::new();
        if self
            .overlays
            .clamp_to_bounds(id, self.session.current_size, self.session.current_position)
        {
            log::debug!("point {id} clamped back inside the frame");
            events.push(EngineEvent::PointClamped { id: id.to_string() });
        }

        let scale = self.layout_scale();
        if let Some(point) = self
            .overlays
            .to_actual(id, self.session.current_position, scale)
        {
            events.push(EngineEvent::SingleDragStopped { point });
        }
        if !self.overlays.is_empty() {
            events.push(EngineEvent::DragStopped {
                points: self
                    .overlays
                    .all_actual(self.session.current_position, scale),
            });
        }
        events
    }

    /// Explicitly remove one point.
    pub fn remove_point(&mut self, id: &str) {
        self.overlays.remove(id);
    }

    /// Displayed position of a tracked point.
    pub fn point_displayed(&self, id: &str) -> Option<Position> {
        self.overlays.get(id).map(|p| p.position)
    }

    /// Actual-coordinate report for one tracked point.
    pub fn point_actual(&self, id: &str) -> Option<ActualPoint> {
        self.overlays
            .to_actual(id, self.session.current_position, self.layout_scale())
    }

    /// Actual-coordinate report for every tracked point.
    pub fn points_actual(&self) -> Vec<ActualPoint> {
        self.overlays
            .all_actual(self.session.current_position, self.layout_scale())
    }

    // ------------------------------------------------------------------
    // Path conversions for the rendering collaborator
    // ------------------------------------------------------------------

    /// Project a vertex path from actual image pixels into displayed
    /// space. Empty until an image is laid out.
    pub fn displayed_path(&self, path: &[Position]) -> Vec<Position> {
        let scale = self.layout_scale();
        if scale <= 0.0 {
            return Vec::new();
        }
        geometry::path_to_displayed(path, self.session.current_position, scale)
    }

    /// Inverse-project a displayed vertex path back to actual image
    /// pixels.
    pub fn actual_path(&self, path: &[Position]) -> Option<Vec<Position>> {
        geometry::path_to_actual(path, self.session.current_position, self.layout_scale())
    }

    // ------------------------------------------------------------------
    // Polygon drag
    // ------------------------------------------------------------------

    /// Begin a rigid polygon drag. `vertices` are in actual image
    /// pixels; the isolated layer starts at the frame's current offset.
    pub fn start_polygon_drag(
        &mut self,
        id: impl Into<String>,
        vertices: Vec<Position>,
    ) -> Result<(), EngineError> {
        if !self.config.polygon_drag_enabled {
            return Err(EngineError::PolygonDragDisabled);
        }
        if !self.is_loaded() {
            return Err(EngineError::ImageNotLoaded);
        }
        let id = id.into();
        self.polygon
            .start(id.clone(), vertices, self.session.current_position)?;
        log::debug!("polygon {id} drag started");
        Ok(())
    }

    /// Move the isolated polygon layer. Vertices are not reprojected
    /// until the gesture ends.
    pub fn polygon_drag_move(&mut self, position: Position) {
        if !self.is_loaded() {
            return;
        }
        self.polygon.move_layer(position);
    }

    /// Commit the gesture: the accumulated layer delta is applied to the
    /// captured path in displayed space and converted back to actual
    /// coordinates.
    pub fn stop_polygon_drag(&mut self) -> Vec<EngineEvent> {
        self.polygon.begin_commit();
        let Some((id, vertices, delta)) = self.polygon.finish() else {
            return Vec::new();
        };

        let scale = self.layout_scale();
        let position = self.session.current_position;
        let displayed: Vec<Position> = geometry::path_to_displayed(&vertices, position, scale)
            .into_iter()
            .map(|p| Position::new(p.x + delta.x, p.y + delta.y))
            .collect();
        let Some(vertices) = geometry::path_to_actual(&displayed, position, scale) else {
            return Vec::new();
        };

        log::debug!("polygon {id} drag committed");
        vec![EngineEvent::PolygonDragStopped { id, vertices }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.01;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// 1000x500 image inside a 500x500 viewport: fit 500x250 at (0, 125).
    fn fitted_engine() -> Dragzoom {
        let mut engine = Dragzoom::new(EngineConfig::default());
        assert!(engine.set_container_size(Size::new(500.0, 500.0)).is_empty());
        let events = engine.load_image(Size::new(1000.0, 500.0));
        assert_eq!(events.len(), 1);
        engine
    }

    #[test]
    fn test_initial_fit() {
        let engine = fitted_engine();
        assert!(engine.is_loaded());
        assert_eq!(engine.current_size(), Size::new(500.0, 250.0));
        assert_eq!(engine.current_position(), Position::new(0.0, 125.0));
        assert_eq!(engine.scale_num(), 0.5);
        assert_eq!(engine.min_scale(), 0.5);
        assert!(!engine.can_drag());
    }

    #[test]
    fn test_initial_fit_small_image_is_unscaled() {
        let mut engine = Dragzoom::new(EngineConfig::default());
        engine.set_container_size(Size::new(500.0, 500.0));
        engine.load_image(Size::new(200.0, 100.0));
        assert_eq!(engine.current_size(), Size::new(200.0, 100.0));
        assert_eq!(engine.current_position(), Position::new(150.0, 200.0));
        assert_eq!(engine.scale_num(), 1.0);
        assert_eq!(engine.min_scale(), 1.0);
    }

    #[test]
    fn test_degenerate_image_load_ignored() {
        let mut engine = Dragzoom::new(EngineConfig::default());
        engine.set_container_size(Size::new(500.0, 500.0));
        assert!(engine.load_image(Size::new(0.0, 100.0)).is_empty());
        assert!(!engine.is_loaded());
    }

    #[test]
    fn test_zero_container_floored() {
        let mut engine = Dragzoom::new(EngineConfig::default());
        engine.set_container_size(Size::new(0.0, 0.0));
        assert_eq!(engine.container_size(), Size::new(10.0, 10.0));
    }

    #[test]
    fn test_zoom_in_from_fit() {
        let mut engine = fitted_engine();
        let events = engine.on_wheel(Position::zero(), WheelDirection::In);

        assert!(approx_eq(engine.scale_num(), 0.63));
        assert!(approx_eq(engine.current_size().width, 630.0));
        assert!(approx_eq(engine.current_size().height, 315.0));
        // Anchor at the origin: x pinned, y recentered (315 < 500).
        assert!(approx_eq(engine.current_position().x, 0.0));
        assert!(approx_eq(engine.current_position().y, 92.5));

        match &events[0] {
            EngineEvent::SizeChanged { initial, current, .. } => {
                assert_eq!(*initial, Size::new(500.0, 250.0));
                assert!(approx_eq(current.width, 630.0));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_zoom_out_at_min_scale_rejected() {
        let mut engine = fitted_engine();
        let events = engine.on_wheel(Position::zero(), WheelDirection::Out);
        assert!(events.is_empty());
        assert_eq!(engine.scale_num(), 0.5);
        assert_eq!(engine.current_size(), Size::new(500.0, 250.0));
        assert_eq!(engine.current_position(), Position::new(0.0, 125.0));
    }

    #[test]
    fn test_scale_stays_in_range_over_any_sequence() {
        let mut engine = fitted_engine();
        let cursor = Position::new(250.0, 250.0);
        for _ in 0..10 {
            engine.on_wheel(cursor, WheelDirection::In);
            assert!(engine.scale_num() >= engine.min_scale() - 1e-6);
            assert!(engine.scale_num() <= engine.config().max_zoom + 1e-6);
        }
        assert_eq!(engine.scale_num(), 2.0);
        for _ in 0..20 {
            engine.on_wheel(cursor, WheelDirection::Out);
            assert!(engine.scale_num() >= engine.min_scale() - 1e-6);
            assert!(engine.scale_num() <= engine.config().max_zoom + 1e-6);
        }
        assert_eq!(engine.scale_num(), 0.5);
    }

    #[test]
    fn test_continuous_zoom_keeps_cursor_point_fixed() {
        let mut engine = fitted_engine();
        let cursor = Position::new(250.0, 250.0);

        // Image point under the cursor before zooming: the center.
        let before = (
            (cursor.x - engine.current_position().x) / engine.scale_num(),
            (cursor.y - engine.current_position().y) / engine.scale_num(),
        );
        engine.on_wheel(cursor, WheelDirection::In);
        engine.on_wheel(cursor, WheelDirection::In);
        let after = (
            (cursor.x - engine.current_position().x) / engine.scale_num(),
            (cursor.y - engine.current_position().y) / engine.scale_num(),
        );
        assert!(approx_eq(before.0, after.0));
        assert!(approx_eq(before.1, after.1));
    }

    #[test]
    fn test_zoom_before_load_ignored() {
        let mut engine = Dragzoom::new(EngineConfig::default());
        engine.set_container_size(Size::new(500.0, 500.0));
        assert!(engine.on_wheel(Position::zero(), WheelDirection::In).is_empty());
    }

    #[test]
    fn test_zoomable_false_ignores_wheel() {
        let mut engine = Dragzoom::new(EngineConfig {
            zoomable: false,
            ..EngineConfig::default()
        });
        engine.set_container_size(Size::new(500.0, 500.0));
        engine.load_image(Size::new(1000.0, 500.0));
        assert!(engine.on_wheel(Position::zero(), WheelDirection::In).is_empty());
    }

    #[test]
    fn test_scale_indicator_after_zoom() {
        let mut engine = fitted_engine();
        assert!(!engine.scale_indicator_visible());
        engine.on_wheel(Position::zero(), WheelDirection::In);
        assert!(engine.scale_indicator_visible());
        assert_eq!(engine.scale_percent(), "63%");
    }

    #[test]
    fn test_pan_centers_fitting_axis_and_clamps_covering_axis() {
        let mut engine = fitted_engine();
        engine.on_wheel(Position::zero(), WheelDirection::In); // 630x315

        // y fits (315 <= 500): forced center regardless of the drag.
        engine.on_drag_move(Position::new(-50.0, 300.0));
        assert!(approx_eq(engine.current_position().x, -50.0));
        assert!(approx_eq(engine.current_position().y, 92.5));

        // x covers the viewport: the frame edge may not retreat inside.
        engine.on_drag_move(Position::new(40.0, 92.5));
        assert!(approx_eq(engine.current_position().x, 0.0));
        engine.on_drag_move(Position::new(-500.0, 92.5));
        assert!(approx_eq(engine.current_position().x, -130.0));

        engine.on_drag_stop();
        assert!(approx_eq(engine.current_position().x, -130.0));
    }

    #[test]
    fn test_pan_disabled_or_unloaded_ignored() {
        let mut engine = Dragzoom::new(EngineConfig {
            pannable: false,
            ..EngineConfig::default()
        });
        engine.set_container_size(Size::new(500.0, 500.0));
        engine.load_image(Size::new(1000.0, 500.0));
        engine.on_drag_move(Position::new(-50.0, 0.0));
        assert_eq!(engine.current_position(), Position::new(0.0, 125.0));

        let mut engine = Dragzoom::new(EngineConfig::default());
        engine.set_container_size(Size::new(500.0, 500.0));
        engine.on_drag_move(Position::new(-50.0, 0.0));
        assert_eq!(engine.current_position(), Position::zero());
    }

    #[test]
    fn test_point_follows_zoom_and_pan_without_actual_drift() {
        let mut engine = Dragzoom::new(EngineConfig::default());
        engine.set_container_size(Size::new(500.0, 250.0));
        engine.load_image(Size::new(1000.0, 500.0));
        assert_eq!(engine.current_position(), Position::zero());
        assert_eq!(engine.scale_num(), 0.5);

        // Registered at actual (100, 100): displayed (50, 50).
        let displayed = engine
            .ensure_point("m", Position::new(100.0, 100.0), Offset::default())
            .unwrap();
        assert_eq!(displayed, Position::new(50.0, 50.0));

        // Zoom at the frame origin: position stays (0, 0), scale 0.63.
        engine.on_wheel(Position::zero(), WheelDirection::In);
        let p = engine.point_displayed("m").unwrap();
        assert!(approx_eq(p.x, 63.0));
        assert!(approx_eq(p.y, 63.0));

        // Pan left, then +20 back to the right: the point follows the
        // frame, the actual coordinates never move.
        engine.on_drag_move(Position::new(-40.0, -30.0));
        engine.on_drag_move(Position::new(-20.0, -30.0));
        let p = engine.point_displayed("m").unwrap();
        assert!(approx_eq(p.x, 43.0));
        assert!(approx_eq(p.y, 33.0));

        let actual = engine.point_actual("m").unwrap();
        assert_eq!(actual.x, 100.0);
        assert_eq!(actual.y, 100.0);
    }

    #[test]
    fn test_point_fraction_preserved_across_container_resize() {
        let mut engine = fitted_engine();
        // Center of the image.
        engine.ensure_point("c", Position::new(500.0, 250.0), Offset::default());
        assert_eq!(
            engine.point_displayed("c").unwrap(),
            Position::new(250.0, 250.0)
        );

        let events = engine.set_container_size(Size::new(1000.0, 1000.0));
        assert_eq!(events.len(), 1);
        assert_eq!(engine.current_size(), Size::new(1000.0, 500.0));
        assert_eq!(engine.scale_num(), 1.0);

        // Still the center: fraction (0.5, 0.5) of the new frame.
        let p = engine.point_displayed("c").unwrap();
        assert!(approx_eq(p.x, 500.0));
        assert!(approx_eq(p.y, 500.0));
        let actual = engine.point_actual("c").unwrap();
        assert_eq!(actual.x, 500.0);
        assert_eq!(actual.y, 250.0);
    }

    #[test]
    fn test_unchanged_container_resize_is_noop() {
        let mut engine = fitted_engine();
        assert!(engine.set_container_size(Size::new(500.0, 500.0)).is_empty());
    }

    #[test]
    fn test_ensure_point_before_load_refused() {
        let mut engine = Dragzoom::new(EngineConfig::default());
        assert!(engine
            .ensure_point("m", Position::new(100.0, 100.0), Offset::default())
            .is_none());
    }

    #[test]
    fn test_end_point_drag_reports() {
        let mut engine = fitted_engine();
        engine.ensure_point("a", Position::new(100.0, 100.0), Offset::default());
        engine.ensure_point("b", Position::new(900.0, 400.0), Offset::default());

        // Drag "a" outside the left edge of the frame.
        engine.move_point("a", Position::new(-30.0, 150.0));
        let events = engine.end_point_drag("a");
        assert_eq!(events.len(), 3);

        assert_eq!(events[0], EngineEvent::PointClamped { id: "a".into() });
        match &events[1] {
            EngineEvent::SingleDragStopped { point } => {
                assert_eq!(point.id, "a");
                assert_eq!(point.x, 0.0);
                assert_eq!(point.y, 50.0);
            }
            other => panic!("unexpected event {other:?}"),
        }
        match &events[2] {
            EngineEvent::DragStopped { points } => {
                assert_eq!(points.len(), 2);
                assert_eq!(points[0].id, "a");
                assert_eq!(points[1].id, "b");
                assert_eq!(points[1].x, 900.0);
                assert_eq!(points[1].y, 400.0);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_end_point_drag_inside_frame_has_no_clamp_event() {
        let mut engine = fitted_engine();
        engine.ensure_point("a", Position::new(100.0, 100.0), Offset::default());
        engine.move_point("a", Position::new(120.0, 180.0));
        let events = engine.end_point_drag("a");
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], EngineEvent::SingleDragStopped { .. }));
        assert!(matches!(events[1], EngineEvent::DragStopped { .. }));
    }

    #[test]
    fn test_disabled_suppresses_point_reports() {
        let mut engine = Dragzoom::new(EngineConfig {
            disabled: true,
            ..EngineConfig::default()
        });
        engine.set_container_size(Size::new(500.0, 500.0));
        engine.load_image(Size::new(1000.0, 500.0));
        engine.ensure_point("a", Position::new(100.0, 100.0), Offset::default());
        engine.move_point("a", Position::new(-30.0, 150.0));
        assert!(engine.end_point_drag("a").is_empty());
    }

    #[test]
    fn test_end_point_drag_unknown_id_is_noop() {
        let mut engine = fitted_engine();
        engine.ensure_point("a", Position::new(100.0, 100.0), Offset::default());
        assert!(engine.end_point_drag("ghost").is_empty());
    }

    #[test]
    fn test_remove_point() {
        let mut engine = fitted_engine();
        engine.ensure_point("a", Position::new(100.0, 100.0), Offset::default());
        engine.remove_point("a");
        assert!(engine.point_displayed("a").is_none());
        assert!(engine.points_actual().is_empty());
    }

    #[test]
    fn test_reset_clears_session_and_overlays() {
        let mut engine = fitted_engine();
        engine.ensure_point("a", Position::new(100.0, 100.0), Offset::default());
        engine.reset();
        assert!(!engine.is_loaded());
        assert!(engine.points_actual().is_empty());
        assert!(engine
            .ensure_point("b", Position::new(1.0, 1.0), Offset::default())
            .is_none());

        // A fresh load re-initializes the fit.
        let events = engine.load_image(Size::new(500.0, 500.0));
        assert_eq!(events.len(), 1);
        assert_eq!(engine.current_size(), Size::new(500.0, 500.0));
        assert_eq!(engine.scale_num(), 1.0);
    }

    #[test]
    fn test_polygon_drag_rigid_commit() {
        let mut engine = Dragzoom::new(EngineConfig {
            polygon_drag_enabled: true,
            ..EngineConfig::default()
        });
        engine.set_container_size(Size::new(500.0, 500.0));
        engine.load_image(Size::new(1000.0, 500.0));

        let square = vec![
            Position::new(100.0, 100.0),
            Position::new(200.0, 100.0),
            Position::new(200.0, 200.0),
            Position::new(100.0, 200.0),
        ];
        engine.start_polygon_drag("poly", square.clone()).unwrap();
        assert!(engine.redraw_suspended());
        assert_eq!(
            engine.polygon_layer_position(),
            Some(Position::new(0.0, 125.0))
        );

        // Drag the layer by (30, 20) in displayed space: at scale 0.5
        // that is (60, 40) in actual pixels.
        engine.polygon_drag_move(Position::new(30.0, 145.0));
        let events = engine.stop_polygon_drag();
        assert!(!engine.redraw_suspended());

        match &events[0] {
            EngineEvent::PolygonDragStopped { id, vertices } => {
                assert_eq!(id, "poly");
                for (v, original) in vertices.iter().zip(&square) {
                    assert!(approx_eq(v.x, original.x + 60.0));
                    assert!(approx_eq(v.y, original.y + 40.0));
                }
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_polygon_drag_contract_errors() {
        let mut engine = Dragzoom::new(EngineConfig::default());
        engine.set_container_size(Size::new(500.0, 500.0));
        engine.load_image(Size::new(1000.0, 500.0));
        assert_eq!(
            engine.start_polygon_drag("p", vec![]),
            Err(EngineError::PolygonDragDisabled)
        );

        let mut engine = Dragzoom::new(EngineConfig {
            polygon_drag_enabled: true,
            ..EngineConfig::default()
        });
        assert_eq!(
            engine.start_polygon_drag("p", vec![]),
            Err(EngineError::ImageNotLoaded)
        );

        engine.set_container_size(Size::new(500.0, 500.0));
        engine.load_image(Size::new(1000.0, 500.0));
        engine.start_polygon_drag("p", vec![Position::zero()]).unwrap();
        assert_eq!(
            engine.start_polygon_drag("q", vec![Position::zero()]),
            Err(EngineError::PolygonDragActive)
        );
    }

    #[test]
    fn test_polygon_drag_blocks_zoom_and_pan() {
        let mut engine = Dragzoom::new(EngineConfig {
            polygon_drag_enabled: true,
            ..EngineConfig::default()
        });
        engine.set_container_size(Size::new(500.0, 500.0));
        engine.load_image(Size::new(1000.0, 500.0));
        engine
            .start_polygon_drag("p", vec![Position::new(10.0, 10.0)])
            .unwrap();

        assert!(engine.on_wheel(Position::zero(), WheelDirection::In).is_empty());
        assert_eq!(engine.scale_num(), 0.5);

        engine.on_drag_move(Position::new(-50.0, 0.0));
        assert_eq!(engine.current_position(), Position::new(0.0, 125.0));
    }

    #[test]
    fn test_stop_polygon_drag_without_gesture_is_noop() {
        let mut engine = fitted_engine();
        assert!(engine.stop_polygon_drag().is_empty());
    }

    #[test]
    fn test_can_start_drag_cutoff() {
        // 500x250 fits inside the default 842x462 cutoff.
        let engine = fitted_engine();
        assert!(!engine.can_start_drag());

        let mut engine = Dragzoom::new(EngineConfig {
            drag_start_cutoff: None,
            ..EngineConfig::default()
        });
        engine.set_container_size(Size::new(500.0, 500.0));
        engine.load_image(Size::new(1000.0, 500.0));
        assert!(engine.can_start_drag());

        let engine = Dragzoom::new(EngineConfig {
            pannable: false,
            drag_start_cutoff: None,
            ..EngineConfig::default()
        });
        assert!(!engine.can_start_drag());
    }

    #[test]
    fn test_displayed_path_round_trip() {
        let engine = fitted_engine();
        let path = vec![Position::new(100.0, 100.0), Position::new(900.0, 400.0)];
        let displayed = engine.displayed_path(&path);
        assert_eq!(displayed[0], Position::new(50.0, 175.0));
        assert_eq!(displayed[1], Position::new(450.0, 325.0));

        let back = engine.actual_path(&displayed).unwrap();
        assert!(approx_eq(back[0].x, 100.0));
        assert!(approx_eq(back[1].y, 400.0));
    }

    #[test]
    fn test_paths_empty_before_load() {
        let engine = Dragzoom::new(EngineConfig::default());
        assert!(engine.displayed_path(&[Position::zero()]).is_empty());
        assert!(engine.actual_path(&[Position::zero()]).is_none());
    }
}
