//! Mapping between model space (track index, time) and screen pixels.
//!
//! Everything here is a pure function of the layout constants, the view
//! state and the track area; nothing is cached.

use crate::config::TimelineConfig;
use crate::view::ViewState;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned rectangle with origin at the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two corners given in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment: the left and top edges are inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Strict intersection: rectangles sharing only an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Shrink by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }
}

/// Model-to-screen transform for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Projection<'a> {
    pub config: &'a TimelineConfig,
    pub view: &'a ViewState,
    pub area: Rect,
}

impl<'a> Projection<'a> {
    pub fn new(config: &'a TimelineConfig, view: &'a ViewState, area: Rect) -> Self {
        Self { config, view, area }
    }

    /// Screen pixels between the tops of adjacent rows, never below 1.
    pub fn row_pitch(&self) -> f32 {
        ((self.config.track_height + self.config.track_spacing) * self.view.scale.y).max(1.0)
    }

    pub fn row_height(&self) -> f32 {
        self.config.track_height * self.view.scale.y
    }

    pub fn row_top(&self, track_index: usize) -> f32 {
        self.area.y + self.row_pitch() * track_index as f32 + self.view.offset.y
    }

    pub fn x_at(&self, time: f32) -> f32 {
        self.area.x + time * self.view.scale.x + self.view.offset.x
    }

    /// Inverse of [`Projection::x_at`].
    pub fn time_at(&self, x: f32) -> f32 {
        (x - self.view.offset.x - self.area.x) / self.view.scale.x
    }

    pub fn segment_rect(&self, track_index: usize, start: f32, end: f32) -> Rect {
        Rect::new(
            self.x_at(start),
            self.row_top(track_index),
            ((end - start) * self.view.scale.x).max(0.0),
            self.row_height(),
        )
    }

    /// Inner rectangle used for the border stroke.
    pub fn border_rect(&self, outer: &Rect) -> Rect {
        outer.inset(self.config.track_border_size / 2.0)
    }

    /// Playhead x for a clock value in milliseconds.
    pub fn playhead_x(&self, clock_ms: f64) -> f32 {
        self.x_at((clock_ms * 0.001) as f32)
    }

    /// Clock value in milliseconds under screen x.
    pub fn clock_at(&self, x: f32) -> f64 {
        f64::from(self.time_at(x)) * 1000.0
    }
}

/// The track area of a widget of the given size: everything not taken by
/// the label column, playhead strip and scrollbars.
pub fn track_area(config: &TimelineConfig, width: f32, height: f32) -> Rect {
    let x = config.track_label_width;
    let y = config.playhead_height;
    Rect::new(
        x,
        y,
        (width - config.scrollbar_width - x).max(0.0),
        (height - config.scrollbar_height - y).max(0.0),
    )
}
