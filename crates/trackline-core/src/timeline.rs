use std::fmt;

use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Stable handle identifying a segment for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(Uuid);

impl SegmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SegmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A time-ranged item placed on a track.
///
/// `end >= start` is expected but not enforced; collision handling and
/// rendering treat an inverted segment as zero-width.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: SegmentId,
    pub start: f32,
    pub end: f32,
    pub name: String,
}

impl Segment {
    pub fn new(name: impl Into<String>, start: f32, end: f32) -> Self {
        Self {
            id: SegmentId::new(),
            start,
            end,
            name: name.into(),
        }
    }

    pub fn length(&self) -> f32 {
        self.end - self.start
    }

    /// Strict overlap: segments that only touch do not overlap.
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A segment carrying a curve between two normalized values.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineSegment {
    pub segment: Segment,
    pub start_value: f32,
    pub end_value: f32,
    pub tangent_start: f32,
    pub tangent_end: f32,
}

impl SplineSegment {
    pub fn new(segment: Segment, start_value: f32, end_value: f32) -> Self {
        Self {
            segment,
            start_value,
            end_value,
            tangent_start: 0.0,
            tangent_end: 0.0,
        }
    }

    pub fn with_tangents(mut self, start: f32, end: f32) -> Self {
        self.tangent_start = start;
        self.tangent_end = end;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackKind {
    /// A lone segment occupying its own row.
    Simple(Segment),
    Composite(Vec<Segment>),
    Spline(Vec<SplineSegment>),
}

/// One row of the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub name: String,
    pub kind: TrackKind,
}

impl Track {
    pub fn simple(segment: Segment) -> Self {
        Self {
            name: segment.name.clone(),
            kind: TrackKind::Simple(segment),
        }
    }

    pub fn composite(name: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            name: name.into(),
            kind: TrackKind::Composite(segments),
        }
    }

    pub fn spline(name: impl Into<String>, segments: Vec<SplineSegment>) -> Self {
        Self {
            name: name.into(),
            kind: TrackKind::Spline(segments),
        }
    }

    /// Elements in insertion order, regardless of track shape.
    pub fn elements(&self) -> impl Iterator<Item = &Segment> {
        let (single, many, splines): (Option<&Segment>, &[Segment], &[SplineSegment]) =
            match &self.kind {
                TrackKind::Simple(segment) => (Some(segment), &[], &[]),
                TrackKind::Composite(segments) => (None, segments.as_slice(), &[]),
                TrackKind::Spline(splines) => (None, &[], splines.as_slice()),
            };
        single
            .into_iter()
            .chain(many.iter())
            .chain(splines.iter().map(|s| &s.segment))
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Segment> {
        let (single, many, splines): (
            Option<&mut Segment>,
            &mut [Segment],
            &mut [SplineSegment],
        ) = match &mut self.kind {
            TrackKind::Simple(segment) => (Some(segment), Default::default(), Default::default()),
            TrackKind::Composite(segments) => {
                (None, segments.as_mut_slice(), Default::default())
            }
            TrackKind::Spline(splines) => (None, Default::default(), splines.as_mut_slice()),
        };
        single
            .into_iter()
            .chain(many.iter_mut())
            .chain(splines.iter_mut().map(|s| &mut s.segment))
    }

    pub fn splines(&self) -> &[SplineSegment] {
        match &self.kind {
            TrackKind::Spline(splines) => splines,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.elements().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.elements().any(|s| s.id == id)
    }
}

/// The ordered collection of tracks; track index is the row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    pub tracks: Vec<Track>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track and return its row index.
    pub fn add_track(&mut self, track: Track) -> usize {
        self.tracks.push(track);
        self.tracks.len() - 1
    }

    pub fn track(&self, index: usize) -> Result<&Track> {
        self.tracks
            .get(index)
            .ok_or(CoreError::TrackNotFound(index))
    }

    /// Every segment with its row index, tracks first then elements.
    pub fn segments(&self) -> impl Iterator<Item = (usize, &Segment)> {
        self.tracks
            .iter()
            .enumerate()
            .flat_map(|(index, track)| track.elements().map(move |s| (index, s)))
    }

    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments().map(|(_, s)| s).find(|s| s.id == id)
    }

    pub fn segment_mut(&mut self, id: SegmentId) -> Option<&mut Segment> {
        self.tracks
            .iter_mut()
            .flat_map(|track| track.elements_mut())
            .find(|s| s.id == id)
    }

    /// Row of the track holding `id`, found by linear search.
    pub fn track_index_of(&self, id: SegmentId) -> Option<usize> {
        self.tracks.iter().position(|track| track.contains(id))
    }

    /// Largest segment end across all tracks, or 0 for an empty timeline.
    pub fn content_end(&self) -> f32 {
        self.segments()
            .map(|(_, s)| s.end)
            .fold(0.0_f32, f32::max)
    }
}
