use tracing::{debug, warn};

use crate::clock::Clock;
use crate::collision::{self, CollisionScene, ResizeEdge};
use crate::config::TimelineConfig;
use crate::error::{CoreError, Result};
use crate::geometry::{self, Point, Projection, Rect};
use crate::hit::{self, EdgeTest, Edges};
use crate::input::{Key, Modifiers, PointerButton, TimelineEvent};
use crate::render::{self, FrameState, RenderSink};
use crate::selection::{Selection, SelectionChanged};
use crate::staging::Staging;
use crate::timeline::{Segment, SegmentId, Timeline, Track};
use crate::view::{Axis, ScrollBounds, Vec2, ViewState};

/// Public view of the interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Idle,
    Selecting,
    RequestMovingSelection,
    MovingSelection,
    RequestResizingSelection,
    ResizingSelection,
    TimeScrub,
}

#[derive(Debug, Clone)]
enum Mode {
    Idle,
    Selecting {
        origin: Point,
        current: Point,
    },
    RequestMovingSelection {
        origin: Point,
    },
    MovingSelection {
        origin: Point,
        staging: Staging,
        scene: CollisionScene,
    },
    RequestResizingSelection {
        origin: Point,
        edge: ResizeEdge,
    },
    ResizingSelection {
        origin: Point,
        edge: ResizeEdge,
        staging: Staging,
        scene: CollisionScene,
    },
    TimeScrub,
}

impl Mode {
    fn kind(&self) -> ModeKind {
        match self {
            Mode::Idle => ModeKind::Idle,
            Mode::Selecting { .. } => ModeKind::Selecting,
            Mode::RequestMovingSelection { .. } => ModeKind::RequestMovingSelection,
            Mode::MovingSelection { .. } => ModeKind::MovingSelection,
            Mode::RequestResizingSelection { .. } => ModeKind::RequestResizingSelection,
            Mode::ResizingSelection { .. } => ModeKind::ResizingSelection,
            Mode::TimeScrub => ModeKind::TimeScrub,
        }
    }
}

/// Middle-button pan, independent of the primary-button mode.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pan {
    origin: Point,
    offset_before: Vec2,
}

/// Something the host may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    SelectionChanged(SelectionChanged),
    /// The user scrubbed the playhead to this clock value (ms).
    ClockScrubbed(f64),
}

/// Outcome of handling one input event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub redraw: bool,
    pub events: Vec<EditorEvent>,
}

impl Response {
    fn repaint() -> Self {
        Self {
            redraw: true,
            events: Vec::new(),
        }
    }

    fn selection(&mut self, change: SelectionChanged) {
        if change.is_empty() {
            return;
        }
        debug!(
            added = change.added.len(),
            removed = change.removed.len(),
            "selection changed"
        );
        self.redraw = true;
        self.events.push(EditorEvent::SelectionChanged(change));
    }

    pub fn selection_changes(&self) -> impl Iterator<Item = &SelectionChanged> {
        self.events.iter().filter_map(|event| match event {
            EditorEvent::SelectionChanged(change) => Some(change),
            _ => None,
        })
    }
}

/// Pointer shape suggested for a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Move,
    ResizeHorizontal,
    ResizeVertical,
    ResizeDiagonalNwSe,
    ResizeDiagonalNeSw,
    Crosshair,
    Grabbing,
}

impl CursorHint {
    pub fn for_edges(edges: Edges) -> Self {
        let nw_se = (edges.contains(Edges::TOP) && edges.contains(Edges::LEFT))
            || (edges.contains(Edges::BOTTOM) && edges.contains(Edges::RIGHT));
        let ne_sw = (edges.contains(Edges::TOP) && edges.contains(Edges::RIGHT))
            || (edges.contains(Edges::BOTTOM) && edges.contains(Edges::LEFT));
        if nw_se {
            CursorHint::ResizeDiagonalNwSe
        } else if ne_sw {
            CursorHint::ResizeDiagonalNeSw
        } else if edges.horizontal() {
            CursorHint::ResizeHorizontal
        } else if edges.vertical() {
            CursorHint::ResizeVertical
        } else {
            CursorHint::Default
        }
    }
}

/// The embeddable timeline editor: model, view and interaction state.
pub struct TimelineEditor {
    timeline: Timeline,
    config: TimelineConfig,
    view: ViewState,
    scroll: ScrollBounds,
    selection: Selection,
    mode: Mode,
    pan: Option<Pan>,
    clock: Option<Box<dyn Clock>>,
    width: f32,
    height: f32,
}

impl Default for TimelineEditor {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}

impl TimelineEditor {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            timeline: Timeline::new(),
            config,
            view: ViewState::default(),
            scroll: ScrollBounds::default(),
            selection: Selection::new(),
            mode: Mode::Idle,
            pan: None,
            clock: None,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Add a lone segment as its own track and return the row.
    pub fn add_segment(&mut self, segment: Segment) -> usize {
        self.add_track(Track::simple(segment))
    }

    pub fn add_track(&mut self, track: Track) -> usize {
        let index = self.timeline.add_track(track);
        self.refresh_scroll_bounds();
        index
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.timeline.segment(id)
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut TimelineConfig {
        &mut self.config
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn scroll_bounds(&self) -> &ScrollBounds {
        &self.scroll
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn current_mode(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Staged edits of the running move or resize gesture.
    pub fn staged(&self) -> Option<&Staging> {
        match &self.mode {
            Mode::MovingSelection { staging, .. } | Mode::ResizingSelection { staging, .. } => {
                Some(staging)
            }
            _ => None,
        }
    }

    /// Live selection rectangle while a rectangle selection is running.
    pub fn selection_rect(&self) -> Option<Rect> {
        match &self.mode {
            Mode::Selecting { origin, current } => Some(Rect::from_corners(*origin, *current)),
            _ => None,
        }
    }

    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.clock = Some(clock);
    }

    pub fn clock(&self) -> Option<&dyn Clock> {
        self.clock.as_deref()
    }

    pub fn clock_mut(&mut self) -> Option<&mut (dyn Clock + 'static)> {
        self.clock.as_deref_mut()
    }

    /// Widget size in pixels; the track area is derived from it.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.refresh_scroll_bounds();
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn track_area(&self) -> Rect {
        geometry::track_area(&self.config, self.width, self.height)
    }

    pub fn projection(&self) -> Projection<'_> {
        Projection::new(&self.config, &self.view, self.track_area())
    }

    /// Advance the clock. Returns true when a redraw is due.
    pub fn tick(&mut self) -> bool {
        match self.clock.as_deref_mut() {
            Some(clock) => {
                clock.update();
                clock.is_running()
            }
            None => false,
        }
    }

    pub fn scroll_to(&mut self, axis: Axis, value: f32) {
        self.view = self.view.scrolled_to(axis, value, &self.scroll);
        self.refresh_scroll_bounds();
    }

    pub fn handle(&mut self, event: TimelineEvent) -> Result<Response> {
        match event {
            TimelineEvent::PointerPressed {
                button: PointerButton::Primary,
                position,
                modifiers,
            } => Ok(self.primary_pressed(position, modifiers)),
            TimelineEvent::PointerPressed {
                button: PointerButton::Middle,
                position,
                ..
            } => {
                self.pan = Some(Pan {
                    origin: position,
                    offset_before: self.view.offset,
                });
                Ok(Response::default())
            }
            TimelineEvent::PointerMoved {
                position,
                buttons,
                modifiers,
            } => {
                let mut response = if buttons.primary {
                    self.primary_moved(position, modifiers)?
                } else {
                    // The release never arrived; close the gesture where it stands.
                    self.primary_released(position, modifiers)?
                };
                if !buttons.middle {
                    self.pan = None;
                }
                if let Some(pan) = self.pan {
                    let delta = Vec2::new(position.x - pan.origin.x, position.y - pan.origin.y);
                    self.view = self.view.panned(pan.offset_before, delta, &self.scroll);
                    self.refresh_scroll_bounds();
                    response.redraw = true;
                }
                Ok(response)
            }
            TimelineEvent::PointerReleased {
                button: PointerButton::Primary,
                position,
                modifiers,
            } => self.primary_released(position, modifiers),
            TimelineEvent::PointerReleased {
                button: PointerButton::Middle,
                ..
            } => {
                self.pan = None;
                Ok(Response::default())
            }
            TimelineEvent::PointerPressed { .. } | TimelineEvent::PointerReleased { .. } => {
                Ok(Response::default())
            }
            TimelineEvent::WheelScrolled {
                delta,
                position,
                modifiers,
            } => {
                self.wheel(delta, position, modifiers);
                Ok(Response::repaint())
            }
            TimelineEvent::KeyPressed { key, modifiers } => Ok(self.key_pressed(key, modifiers)),
        }
    }

    /// Select every segment of every track.
    pub fn select_all(&mut self) -> SelectionChanged {
        let removed = self.selection.clear();
        let added: Vec<SegmentId> = self.timeline.segments().map(|(_, s)| s.id).collect();
        for &id in &added {
            self.selection.insert(id);
        }
        SelectionChanged { added, removed }
    }

    pub fn deselect_all(&mut self) -> SelectionChanged {
        SelectionChanged {
            added: Vec::new(),
            removed: self.selection.clear(),
        }
    }

    /// Abandon the running gesture without committing staged edits.
    ///
    /// Returns false when there was nothing to cancel.
    pub fn cancel_gesture(&mut self) -> bool {
        match std::mem::replace(&mut self.mode, Mode::Idle) {
            Mode::Idle => false,
            Mode::MovingSelection { staging, .. } | Mode::ResizingSelection { staging, .. } => {
                staging.discard();
                true
            }
            other => {
                debug!(mode = ?other.kind(), "cancelled gesture");
                true
            }
        }
    }

    /// Pointer shape for `point` given the current mode.
    pub fn cursor_hint(&self, point: Point) -> CursorHint {
        if self.pan.is_some() {
            return CursorHint::Grabbing;
        }
        match self.mode {
            Mode::MovingSelection { .. } => return CursorHint::Move,
            Mode::ResizingSelection { .. } => return CursorHint::ResizeHorizontal,
            Mode::Selecting { .. } => return CursorHint::Crosshair,
            _ => {}
        }
        let projection = self.projection();
        match hit::hit_test_segment(&self.timeline, &projection, point) {
            Some(hit) => {
                let edges = hit::edge_proximity(
                    &hit.rect,
                    point,
                    self.config.edge_tolerance,
                    EdgeTest::LeftRight,
                );
                match CursorHint::for_edges(edges) {
                    CursorHint::Default => CursorHint::Move,
                    hint => hint,
                }
            }
            None => CursorHint::Default,
        }
    }

    pub fn render(&self, sink: &mut impl RenderSink) {
        let frame = FrameState {
            timeline: &self.timeline,
            selection: &self.selection,
            staging: self.staged(),
            projection: self.projection(),
            selection_rect: self.selection_rect(),
            playhead: self.clock.as_deref().map(|clock| clock.value()),
            width: self.width,
            height: self.height,
        };
        render::draw_frame(&frame, sink);
    }

    fn refresh_scroll_bounds(&mut self) {
        self.scroll = ScrollBounds::measure(&self.timeline, &self.config, &self.view);
    }

    fn primary_pressed(&mut self, position: Point, modifiers: Modifiers) -> Response {
        // A press without a matching release leaves a stale gesture behind.
        if let Err(err) = self.settle_stale_gesture() {
            warn!("dropped a stale gesture: {err}");
        }

        let mut response = Response::repaint();
        let projection = Projection::new(&self.config, &self.view, self.track_area());

        if let Some(hit) = hit::hit_test_segment(&self.timeline, &projection, position) {
            let mut change = SelectionChanged::default();
            if !self.selection.contains(hit.id) {
                if !modifiers.additive() {
                    change.removed = self.selection.clear();
                }
                self.selection.insert(hit.id);
                change.added.push(hit.id);
            } else if modifiers.additive() {
                self.selection.remove(hit.id);
                change.removed.push(hit.id);
            }
            response.selection(change);

            let edges = hit::edge_proximity(
                &hit.rect,
                position,
                self.config.edge_tolerance,
                EdgeTest::LeftRight,
            );
            self.mode = if edges.contains(Edges::LEFT) {
                Mode::RequestResizingSelection {
                    origin: position,
                    edge: ResizeEdge::Start,
                }
            } else if edges.contains(Edges::RIGHT) {
                Mode::RequestResizingSelection {
                    origin: position,
                    edge: ResizeEdge::End,
                }
            } else {
                Mode::RequestMovingSelection { origin: position }
            };
        } else if position.y < self.config.playhead_height {
            self.mode = Mode::TimeScrub;
            self.scrub_to(position.x, &mut response);
        } else {
            if !modifiers.additive() {
                let removed = self.selection.clear();
                response.selection(SelectionChanged {
                    added: Vec::new(),
                    removed,
                });
            }
            self.mode = Mode::Selecting {
                origin: position,
                current: position,
            };
        }
        response
    }

    fn primary_moved(&mut self, position: Point, modifiers: Modifiers) -> Result<Response> {
        match &mut self.mode {
            Mode::Idle => return Ok(Response::default()),
            Mode::Selecting { current, .. } => *current = position,
            Mode::TimeScrub => {
                let mut response = Response::repaint();
                self.scrub_to(position.x, &mut response);
                return Ok(response);
            }
            Mode::RequestMovingSelection { origin } => {
                let origin = *origin;
                if position.distance(origin) <= self.config.drag_threshold {
                    return Ok(Response::default());
                }
                let (staging, scene) = self.stage_selection()?;
                debug!(segments = staging.len(), "moving selection");
                self.mode = Mode::MovingSelection {
                    origin,
                    staging,
                    scene,
                };
                self.drag_to(position, modifiers);
            }
            Mode::RequestResizingSelection { origin, edge } => {
                let (origin, edge) = (*origin, *edge);
                if position.distance(origin) <= self.config.drag_threshold {
                    return Ok(Response::default());
                }
                let (staging, scene) = self.stage_selection()?;
                debug!(segments = staging.len(), ?edge, "resizing selection");
                self.mode = Mode::ResizingSelection {
                    origin,
                    edge,
                    staging,
                    scene,
                };
                self.drag_to(position, modifiers);
            }
            Mode::MovingSelection { .. } | Mode::ResizingSelection { .. } => {
                self.drag_to(position, modifiers);
            }
        }
        Ok(Response::repaint())
    }

    fn primary_released(&mut self, position: Point, modifiers: Modifiers) -> Result<Response> {
        let mut response = Response::repaint();
        if matches!(self.mode, Mode::Selecting { .. }) {
            let change = self.finish_selecting(position, modifiers)?;
            response.selection(change);
        }

        match std::mem::replace(&mut self.mode, Mode::Idle) {
            Mode::MovingSelection { staging, .. } | Mode::ResizingSelection { staging, .. } => {
                if let Err(err) = staging.commit(&mut self.timeline) {
                    warn!("failed to commit staged edits: {err}");
                    return Err(err);
                }
                self.refresh_scroll_bounds();
            }
            Mode::Idle => response.redraw = false,
            _ => {}
        }
        Ok(response)
    }

    /// Commit a move or resize left open by a lost release; drop anything else.
    fn settle_stale_gesture(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.mode, Mode::Idle) {
            Mode::Idle => {}
            Mode::MovingSelection { staging, .. } | Mode::ResizingSelection { staging, .. } => {
                staging.commit(&mut self.timeline)?;
                self.refresh_scroll_bounds();
            }
            other => debug!(mode = ?other.kind(), "dropped stale gesture"),
        }
        Ok(())
    }

    /// Toggle everything the selection rectangle picked.
    ///
    /// Releasing over a track label toggles that whole track instead.
    fn finish_selecting(&mut self, release: Point, modifiers: Modifiers) -> Result<SelectionChanged> {
        let Mode::Selecting { origin, .. } = self.mode else {
            debug_assert!(false, "selection finished outside Selecting mode");
            return Err(CoreError::InvalidState(
                "selection finished without a recorded origin",
            ));
        };

        let projection = Projection::new(&self.config, &self.view, self.track_area());
        let mut change = SelectionChanged::default();

        if let Some(track_index) = hit::hit_test_track_label(&self.timeline, &projection, release) {
            let track = self.timeline.track(track_index)?;
            for segment in track.elements() {
                self.selection.toggle(segment.id, &mut change);
            }
            return Ok(change);
        }

        let rect = Rect::from_corners(origin, release);
        for (track_index, segment) in self.timeline.segments() {
            let bounds = projection.segment_rect(track_index, segment.start, segment.end);
            let picked = if modifiers.containment() {
                rect.contains_rect(&bounds)
            } else {
                rect.intersects(&bounds)
            };
            if picked {
                self.selection.toggle(segment.id, &mut change);
            }
        }
        Ok(change)
    }

    fn stage_selection(&self) -> Result<(Staging, CollisionScene)> {
        let staging = Staging::from_selection(&self.timeline, &self.selection)?;
        let scene = CollisionScene::capture(&self.timeline, |id| self.selection.contains(id));
        Ok((staging, scene))
    }

    /// Re-stage the running move or resize for the pointer at `position`.
    fn drag_to(&mut self, position: Point, modifiers: Modifiers) {
        let scale = self.view.scale.x;
        let snap = !modifiers.free_movement();
        match &mut self.mode {
            Mode::MovingSelection {
                origin,
                staging,
                scene,
            } => {
                let movers = staging.movers();
                let delta = collision::resolve_move(scene, &movers, position.x - origin.x, scale);
                staging.apply_move(scene, delta / scale, snap);
            }
            Mode::ResizingSelection {
                origin,
                edge,
                staging,
                scene,
            } => {
                let movers = staging.movers();
                let delta = collision::resolve_resize(
                    scene,
                    &movers,
                    position.x - origin.x,
                    scale,
                    *edge,
                );
                staging.apply_resize(scene, delta / scale, *edge, snap);
            }
            _ => {}
        }
    }

    fn scrub_to(&mut self, x: f32, response: &mut Response) {
        let value = Projection::new(&self.config, &self.view, self.track_area())
            .clock_at(x)
            .max(0.0);
        if let Some(clock) = self.clock.as_deref_mut() {
            clock.set_value(value);
            response.events.push(EditorEvent::ClockScrubbed(value));
        }
    }

    fn wheel(&mut self, delta: f32, position: Point, modifiers: Modifiers) {
        if modifiers.zoom() {
            let amount = delta / self.config.wheel_zoom_divisor;
            let area = self.track_area();
            let (axis, cursor, area_origin) = if modifiers.horizontal() {
                (Axis::Horizontal, position.x, area.x)
            } else {
                (Axis::Vertical, position.y, area.y)
            };
            self.view = self
                .view
                .zoomed_at(axis, cursor, area_origin, amount, self.config.min_scale);
            self.refresh_scroll_bounds();
        } else {
            let axis = if modifiers.horizontal() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            let value = self.scroll.get(axis).value - delta / self.config.wheel_scroll_divisor;
            self.scroll_to(axis, value);
        }
    }

    fn key_pressed(&mut self, key: Key, modifiers: Modifiers) -> Response {
        let mut response = Response::default();
        match key {
            Key::A if modifiers.command() => {
                let change = self.select_all();
                response.selection(change);
            }
            Key::D if modifiers.command() => {
                let change = self.deselect_all();
                response.selection(change);
            }
            Key::Escape => response.redraw = self.cancel_gesture(),
            _ => {}
        }
        response
    }
}
