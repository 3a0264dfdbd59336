use crate::timeline::SegmentId;

/// Segments added to and removed from the selection by one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChanged {
    pub added: Vec<SegmentId>,
    pub removed: Vec<SegmentId>,
}

impl SelectionChanged {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// The set of selected segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<SegmentId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.ids.iter().copied()
    }

    /// Returns false when `id` was already selected.
    pub fn insert(&mut self, id: SegmentId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: SegmentId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&selected| selected != id);
        self.ids.len() != before
    }

    /// Flip membership of `id`, recording the flip in `delta`.
    pub fn toggle(&mut self, id: SegmentId, delta: &mut SelectionChanged) {
        if self.remove(id) {
            delta.removed.push(id);
        } else {
            self.ids.push(id);
            delta.added.push(id);
        }
    }

    /// Empty the selection, returning what was removed.
    pub fn clear(&mut self) -> Vec<SegmentId> {
        std::mem::take(&mut self.ids)
    }
}
