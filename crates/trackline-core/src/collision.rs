//! Drag-delta resolution.
//!
//! Given a raw pointer delta for a group of dragged segments, find the
//! largest delta in the same direction that keeps every dragged segment
//! clear of the non-dragged segments on its row. Dragged segments never
//! block each other.
//!
//! Deltas going in and out are screen pixels; positions are model time.
//! Nothing here reads or writes editor state.

use tracing::trace;

use crate::staging::StagedEdit;
use crate::timeline::{SegmentId, Timeline};

/// Resolution passes before giving up and refusing the move.
pub const MAX_PASSES: usize = 32;

/// Deltas smaller than this (pixels) resolve to no movement.
const MIN_DELTA: f32 = 0.001;

/// Overlap (model units) tolerated from float round-off.
const OVERLAP_EPSILON: f32 = 1e-4;

/// Which edge a resize gesture moves. The other edge stays pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Start,
    End,
}

/// A segment that dragged segments must not overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: SegmentId,
    pub start: f32,
    pub end: f32,
}

/// A dragged segment at its position when the gesture began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mover {
    pub id: SegmentId,
    pub track_index: usize,
    pub start: f32,
    pub end: f32,
}

impl Mover {
    pub fn length(&self) -> f32 {
        self.end - self.start
    }
}

impl From<&StagedEdit> for Mover {
    fn from(edit: &StagedEdit) -> Self {
        Self {
            id: edit.original,
            track_index: edit.track_index,
            start: edit.original_start,
            end: edit.original_end,
        }
    }
}

pub fn spans_overlap(a_start: f32, a_end: f32, b_start: f32, b_end: f32) -> bool {
    a_start < b_end - OVERLAP_EPSILON && b_start < a_end - OVERLAP_EPSILON
}

/// Obstacles per row, each row sorted by start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionScene {
    rows: Vec<Vec<Obstacle>>,
}

impl CollisionScene {
    /// Snapshot every segment of `timeline` for which `dragged` is false.
    pub fn capture(timeline: &Timeline, dragged: impl Fn(SegmentId) -> bool) -> Self {
        let rows = timeline
            .tracks
            .iter()
            .map(|track| {
                track
                    .elements()
                    .filter(|s| !dragged(s.id))
                    .map(|s| Obstacle {
                        id: s.id,
                        start: s.start,
                        end: s.end,
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(rows)
    }

    pub fn from_rows(mut rows: Vec<Vec<Obstacle>>) -> Self {
        for row in &mut rows {
            row.sort_by(|a, b| {
                a.start
                    .total_cmp(&b.start)
                    .then(a.end.total_cmp(&b.end))
                    .then(a.id.cmp(&b.id))
            });
        }
        Self { rows }
    }

    pub fn row(&self, track_index: usize) -> &[Obstacle] {
        self.rows.get(track_index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when `[start, end]` on the row overlaps no obstacle.
    pub fn is_clear(&self, track_index: usize, start: f32, end: f32) -> bool {
        !self
            .row(track_index)
            .iter()
            .any(|o| spans_overlap(start, end, o.start, o.end))
    }
}

/// Largest acceptable horizontal move delta, in pixels.
pub fn resolve_move(scene: &CollisionScene, movers: &[Mover], delta: f32, scale: f32) -> f32 {
    resolve(movers, delta, |mover, delta| {
        move_one(scene.row(mover.track_index), mover, delta, scale)
    })
    .filter(|&delta| {
        movers.iter().all(|m| {
            let start = (m.start + delta / scale).max(0.0);
            scene.is_clear(m.track_index, start, start + m.length())
        })
    })
    .unwrap_or(0.0)
}

/// Largest acceptable delta for the moving edge of a resize, in pixels.
pub fn resolve_resize(
    scene: &CollisionScene,
    movers: &[Mover],
    delta: f32,
    scale: f32,
    edge: ResizeEdge,
) -> f32 {
    resolve(movers, delta, |mover, delta| {
        resize_one(scene.row(mover.track_index), mover, delta, scale, edge)
    })
    .filter(|&delta| {
        movers.iter().all(|m| {
            let (start, end) = resized_span(m, delta / scale, edge);
            scene.is_clear(m.track_index, start, end)
        })
    })
    .unwrap_or(0.0)
}

/// Span of a mover after its moving edge shifts by `delta` model units.
///
/// Neither edge goes below 0 and the moving edge never crosses the pinned one.
pub fn resized_span(mover: &Mover, delta: f32, edge: ResizeEdge) -> (f32, f32) {
    match edge {
        ResizeEdge::Start => {
            let start = (mover.start + delta).max(0.0).min(mover.end.max(0.0));
            (start, mover.end)
        }
        ResizeEdge::End => {
            let end = (mover.end + delta).max(0.0).max(mover.start);
            (mover.start, end)
        }
    }
}

/// Feed the running delta through every mover until it stops changing.
///
/// Returns `None` when the passes run out without settling.
fn resolve(movers: &[Mover], delta: f32, mut step: impl FnMut(&Mover, f32) -> f32) -> Option<f32> {
    let mut resolved = delta;
    for pass in 0..MAX_PASSES {
        let before = resolved;
        for mover in movers {
            resolved = step(mover, resolved);
        }
        if resolved.abs() < MIN_DELTA {
            return Some(0.0);
        }
        if resolved == before {
            if resolved != delta {
                trace!(requested = delta, resolved, passes = pass + 1, "clamped drag delta");
            }
            return Some(resolved);
        }
    }
    trace!(requested = delta, "drag delta did not settle");
    None
}

fn move_one(row: &[Obstacle], mover: &Mover, mut delta: f32, scale: f32) -> f32 {
    let length = mover.length();
    let mut proposed = (mover.start + delta / scale).max(0.0);
    if proposed <= 0.0 {
        delta = -mover.start * scale;
        proposed = 0.0;
    }

    let blocked = row
        .iter()
        .any(|o| spans_overlap(proposed, proposed + length, o.start, o.end));
    if !blocked {
        return delta;
    }

    if delta < 0.0 {
        // Slide right past blockers, starting from the leftmost one.
        for (i, obstacle) in row.iter().enumerate() {
            if obstacle.end < proposed {
                continue;
            }
            proposed = obstacle.end;
            match row.get(i + 1) {
                Some(next) if next.start < proposed + length - OVERLAP_EPSILON => continue,
                _ => break,
            }
        }
        delta.max((proposed - mover.start) * scale).min(0.0)
    } else if delta > 0.0 {
        for i in (0..row.len()).rev() {
            let obstacle = &row[i];
            if obstacle.start > proposed + length {
                continue;
            }
            proposed = obstacle.start - length;
            if i > 0 && row[i - 1].end > proposed + OVERLAP_EPSILON {
                continue;
            }
            break;
        }
        delta.min((proposed - mover.start) * scale).max(0.0)
    } else {
        delta
    }
}

fn resize_one(
    row: &[Obstacle],
    mover: &Mover,
    delta: f32,
    scale: f32,
    edge: ResizeEdge,
) -> f32 {
    let (start, end) = resized_span(mover, delta / scale, edge);
    let moved = match edge {
        ResizeEdge::Start => start - mover.start,
        ResizeEdge::End => end - mover.end,
    };
    // Carry the 0 and pinned-edge clamps back into the delta.
    let mut delta = if (moved * scale - delta).abs() > MIN_DELTA {
        moved * scale
    } else {
        delta
    };

    if !row.iter().any(|o| spans_overlap(start, end, o.start, o.end)) {
        return delta;
    }

    match edge {
        ResizeEdge::Start if delta < 0.0 => {
            let nearest = row
                .iter()
                .rev()
                .find(|o| o.end <= mover.start + OVERLAP_EPSILON);
            let limit = nearest.map_or(0.0, |o| o.end);
            delta = delta.max((limit - mover.start) * scale).min(0.0);
        }
        ResizeEdge::End if delta > 0.0 => {
            let nearest = row
                .iter()
                .find(|o| o.start >= mover.end - OVERLAP_EPSILON);
            if let Some(o) = nearest {
                delta = delta.min((o.start - mover.end) * scale).max(0.0);
            }
        }
        // Shrinking cannot run into a neighbor.
        _ => {}
    }
    delta
}
