use crate::geometry::{Point, Projection, Rect};
use crate::timeline::{SegmentId, Timeline};

/// Bitset of rectangle edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Edges(u8);

impl Edges {
    pub const NONE: Edges = Edges(0);
    pub const TOP: Edges = Edges(1);
    pub const BOTTOM: Edges = Edges(1 << 1);
    pub const LEFT: Edges = Edges(1 << 2);
    pub const RIGHT: Edges = Edges(1 << 3);

    pub fn contains(self, other: Edges) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn horizontal(self) -> bool {
        self.contains(Edges::LEFT) || self.contains(Edges::RIGHT)
    }

    pub fn vertical(self) -> bool {
        self.contains(Edges::TOP) || self.contains(Edges::BOTTOM)
    }
}

impl std::ops::BitOr for Edges {
    type Output = Edges;

    fn bitor(self, rhs: Edges) -> Edges {
        Edges(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Edges {
    fn bitor_assign(&mut self, rhs: Edges) {
        self.0 |= rhs.0;
    }
}

/// Which edges an edge-proximity query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeTest {
    TopBottom,
    LeftRight,
    All,
}

impl EdgeTest {
    fn top_bottom(self) -> bool {
        matches!(self, EdgeTest::TopBottom | EdgeTest::All)
    }

    fn left_right(self) -> bool {
        matches!(self, EdgeTest::LeftRight | EdgeTest::All)
    }
}

/// Edges of `rect` that `point` lies within `tolerance` pixels of.
///
/// The point has to be inside the rectangle; a point outside never
/// detects an edge.
pub fn edge_proximity(rect: &Rect, point: Point, tolerance: f32, test: EdgeTest) -> Edges {
    let mut detected = Edges::NONE;
    if !rect.contains(point) {
        return detected;
    }

    if test.top_bottom() {
        if point.y - rect.top() <= tolerance {
            detected |= Edges::TOP;
        }
        if rect.bottom() - point.y <= tolerance {
            detected |= Edges::BOTTOM;
        }
    }
    if test.left_right() {
        if point.x - rect.left() <= tolerance {
            detected |= Edges::LEFT;
        }
        if rect.right() - point.x <= tolerance {
            detected |= Edges::RIGHT;
        }
    }
    detected
}

/// A segment under a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    pub id: SegmentId,
    pub track_index: usize,
    pub rect: Rect,
}

/// First segment whose rectangle contains `point`, in track then element
/// order. Later segments are not drawn on top for hit purposes.
pub fn hit_test_segment(
    timeline: &Timeline,
    projection: &Projection<'_>,
    point: Point,
) -> Option<SegmentHit> {
    timeline.segments().find_map(|(track_index, segment)| {
        let rect = projection.segment_rect(track_index, segment.start, segment.end);
        rect.contains(point).then_some(SegmentHit {
            id: segment.id,
            track_index,
            rect,
        })
    })
}

/// Row whose label sits under `point`, if the point is in the label column.
pub fn hit_test_track_label(
    timeline: &Timeline,
    projection: &Projection<'_>,
    point: Point,
) -> Option<usize> {
    if point.x < 0.0 || point.x >= projection.config.track_label_width {
        return None;
    }
    (0..timeline.tracks.len()).find(|&index| {
        let top = projection.row_top(index);
        point.y >= top && point.y < top + projection.row_height()
    })
}
