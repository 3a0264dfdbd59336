use tracing::debug;

use crate::collision::{CollisionScene, Mover, ResizeEdge, resized_span};
use crate::error::{CoreError, Result};
use crate::selection::Selection;
use crate::timeline::{SegmentId, Timeline};

/// In-progress values for one selected segment during a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedEdit {
    pub original: SegmentId,
    pub track_index: usize,
    pub name: String,
    /// Values of the segment when the gesture began.
    pub original_start: f32,
    pub original_end: f32,
    pub start: f32,
    pub end: f32,
}

impl StagedEdit {
    pub fn length(&self) -> f32 {
        self.original_end - self.original_start
    }

    pub fn is_unchanged(&self) -> bool {
        self.start == self.original_start && self.end == self.original_end
    }
}

/// Staged edits for every selected segment, keyed by segment handle.
///
/// Built once when a drag is promoted, mutated while it runs and either
/// committed to the timeline or dropped when it ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Staging {
    edits: Vec<StagedEdit>,
}

impl Staging {
    /// Snapshot every selected segment.
    ///
    /// Edits are ordered by track index, then start, then id, which is the
    /// order collision passes walk them in.
    pub fn from_selection(timeline: &Timeline, selection: &Selection) -> Result<Self> {
        let mut edits = Vec::with_capacity(selection.len());
        for id in selection.iter() {
            let track_index = timeline
                .track_index_of(id)
                .ok_or(CoreError::SegmentNotFound(id))?;
            let segment = timeline
                .segment(id)
                .ok_or(CoreError::SegmentNotFound(id))?;
            edits.push(StagedEdit {
                original: id,
                track_index,
                name: segment.name.clone(),
                original_start: segment.start,
                original_end: segment.end,
                start: segment.start,
                end: segment.end,
            });
        }
        edits.sort_by(|a, b| {
            a.track_index
                .cmp(&b.track_index)
                .then(a.original_start.total_cmp(&b.original_start))
                .then(a.original.cmp(&b.original))
        });
        Ok(Self { edits })
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StagedEdit> {
        self.edits.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StagedEdit> {
        self.edits.iter_mut()
    }

    pub fn get(&self, id: SegmentId) -> Option<&StagedEdit> {
        self.edits.iter().find(|e| e.original == id)
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.get(id).is_some()
    }

    /// Positions at gesture start, as collision input.
    pub fn movers(&self) -> Vec<Mover> {
        self.edits.iter().map(Mover::from).collect()
    }

    /// Shift every edit by `delta` model units from its original position.
    ///
    /// With `snap`, starts land on whole units unless that would overlap an
    /// obstacle, in which case the unsnapped position is kept.
    pub fn apply_move(&mut self, scene: &CollisionScene, delta: f32, snap: bool) {
        for edit in &mut self.edits {
            let length = edit.length();
            let mut start = (edit.original_start + delta).max(0.0);
            if snap {
                let rounded = start.round();
                if scene.is_clear(edit.track_index, rounded, rounded + length) {
                    start = rounded;
                }
            }
            edit.start = start;
            edit.end = start + length;
        }
    }

    /// Shift only the `edge` of every edit by `delta` model units.
    pub fn apply_resize(
        &mut self,
        scene: &CollisionScene,
        delta: f32,
        edge: ResizeEdge,
        snap: bool,
    ) {
        for edit in &mut self.edits {
            let mover = Mover::from(&*edit);
            let (mut start, mut end) = resized_span(&mover, delta, edge);
            if snap {
                match edge {
                    ResizeEdge::Start => {
                        let rounded = start.round().max(0.0);
                        if rounded <= end && scene.is_clear(edit.track_index, rounded, end) {
                            start = rounded;
                        }
                    }
                    ResizeEdge::End => {
                        let rounded = end.round();
                        if rounded >= start && scene.is_clear(edit.track_index, start, rounded) {
                            end = rounded;
                        }
                    }
                }
            }
            edit.start = start;
            edit.end = end;
        }
    }

    /// Write every staged value back to its segment.
    ///
    /// All targets are checked before the first write, so a missing segment
    /// leaves the timeline untouched.
    pub fn commit(self, timeline: &mut Timeline) -> Result<usize> {
        if let Some(missing) = self
            .edits
            .iter()
            .find(|e| timeline.segment(e.original).is_none())
        {
            return Err(CoreError::SegmentNotFound(missing.original));
        }

        let mut changed = 0;
        for edit in &self.edits {
            if let Some(segment) = timeline.segment_mut(edit.original) {
                if segment.start != edit.start || segment.end != edit.end {
                    segment.start = edit.start;
                    segment.end = edit.end;
                    changed += 1;
                }
            }
        }
        debug!(staged = self.edits.len(), changed, "committed staged edits");
        Ok(changed)
    }

    /// Drop all staged values without touching the timeline.
    pub fn discard(self) {
        debug!(staged = self.edits.len(), "discarded staged edits");
    }
}
