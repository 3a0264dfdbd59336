use trackline_core::TimelineEditor;
use trackline_core::config::TimelineConfig;
use trackline_core::timeline::{Segment, SplineSegment, Timeline, Track};

/// Builder for creating test Segments with sensible defaults.
pub struct SegmentBuilder {
    name: String,
    start: f32,
    length: f32,
}

impl SegmentBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            start: 0.0,
            length: 10.0,
        }
    }

    pub fn at(mut self, start: f32) -> Self {
        self.start = start;
        self
    }

    pub fn length(mut self, length: f32) -> Self {
        self.length = length;
        self
    }

    pub fn build(self) -> Segment {
        Segment::new(self.name, self.start, self.start + self.length)
    }
}

/// Builder for a composite track, or a spline track once a spline is added.
pub struct TrackBuilder {
    name: String,
    segments: Vec<Segment>,
    splines: Vec<SplineSegment>,
}

impl TrackBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            segments: Vec::new(),
            splines: Vec::new(),
        }
    }

    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Add a segment spanning `[start, end]` named after the track.
    pub fn span(self, start: f32, end: f32) -> Self {
        let name = format!("{} {}", self.name, self.segments.len());
        self.with_segment(Segment::new(name, start, end))
    }

    pub fn with_spline(mut self, spline: SplineSegment) -> Self {
        self.splines.push(spline);
        self
    }

    pub fn build(self) -> Track {
        if !self.splines.is_empty() {
            return Track::spline(self.name, self.splines);
        }
        Track::composite(self.name, self.segments)
    }
}

/// Build a timeline, and optionally an editor around it.
pub struct TimelineBuilder {
    tracks: Vec<Track>,
    config: TimelineConfig,
    viewport: (f32, f32),
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self {
            tracks: Vec::new(),
            config: TimelineConfig::default(),
            viewport: (916.0, 416.0),
        }
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn config(mut self, config: TimelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = (width, height);
        self
    }

    pub fn build(self) -> Timeline {
        Timeline {
            tracks: self.tracks,
        }
    }

    /// Editor holding the tracks, sized to the viewport.
    pub fn build_editor(self) -> TimelineEditor {
        let mut editor = TimelineEditor::new(self.config);
        for track in self.tracks {
            editor.add_track(track);
        }
        editor.set_viewport(self.viewport.0, self.viewport.1);
        editor
    }
}
