use trackline_core::TimelineEditor;
use trackline_core::timeline::{Segment, SegmentId, SplineSegment, Track};

use crate::builders::{SegmentBuilder, TimelineBuilder, TrackBuilder};

/// Segments at [0,50], [60,100] and [110,150] on a single track.
///
/// In the default 916x416 viewport they cover x 100..150, 160..200 and
/// 210..250, with row 0 spanning y 16..36.
pub fn three_on_one_track() -> (TimelineEditor, [SegmentId; 3]) {
    let a = Segment::new("a", 0.0, 50.0);
    let b = Segment::new("b", 60.0, 100.0);
    let c = Segment::new("c", 110.0, 150.0);
    let ids = [a.id, b.id, c.id];
    let editor = TimelineBuilder::new()
        .with_track(
            TrackBuilder::new("track")
                .with_segment(a)
                .with_segment(b)
                .with_segment(c)
                .build(),
        )
        .build_editor();
    (editor, ids)
}

/// Two tracks of three 10-unit segments, 20 units apart.
pub fn two_by_three() -> TimelineEditor {
    let mut builder = TimelineBuilder::new();
    for row in 0..2 {
        let track = (0..3).fold(TrackBuilder::new(&format!("row {row}")), |track, i| {
            let start = i as f32 * 20.0;
            track.span(start, start + 10.0)
        });
        builder = builder.with_track(track.build());
    }
    builder.build_editor()
}

/// The demo content shown by the binary: plain, composite and spline tracks.
pub fn demo_timeline() -> TimelineEditor {
    let mut builder = TimelineBuilder::new();

    for i in 0..4 {
        let start = i as f32 * 35.0;
        let segment = SegmentBuilder::new(&format!("clip {i}"))
            .at(start)
            .length(30.0)
            .build();
        builder = builder.with_track(Track::simple(segment));
    }

    let mut composite = TrackBuilder::new("composite");
    for i in 0..6 {
        let start = i as f32 * 45.0;
        composite = composite.span(start, start + 40.0);
    }
    builder = builder.with_track(composite.build());

    let ramp = TrackBuilder::new("automation")
        .with_spline(SplineSegment::new(Segment::new("fade in", 0.0, 60.0), 0.0, 1.0))
        .with_spline(
            SplineSegment::new(Segment::new("fade out", 80.0, 140.0), 1.0, 0.0)
                .with_tangents(0.0, -1.0),
        );
    builder.with_track(ramp.build()).build_editor()
}
