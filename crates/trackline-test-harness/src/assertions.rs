use trackline_core::TimelineEditor;
use trackline_core::timeline::{SegmentId, Timeline};

/// Assert that no two segments overlap on a given track.
pub fn assert_no_overlaps(timeline: &Timeline, track_index: usize) {
    let track = &timeline.tracks[track_index];
    let segments: Vec<_> = track.elements().collect();
    for (i, a) in segments.iter().enumerate() {
        for b in segments.iter().skip(i + 1) {
            assert!(
                !a.overlaps(b),
                "segments {} [{}, {}] and {} [{}, {}] overlap on track {}",
                a.name,
                a.start,
                a.end,
                b.name,
                b.start,
                b.end,
                track_index
            );
        }
    }
}

/// Assert that no segment anywhere starts before time zero.
pub fn assert_non_negative_starts(timeline: &Timeline) {
    for (track_index, segment) in timeline.segments() {
        assert!(
            segment.start >= 0.0,
            "segment {} on track {track_index} starts at {}",
            segment.name,
            segment.start
        );
    }
}

/// Assert a segment's bounds, within a small tolerance.
pub fn assert_segment_bounds(timeline: &Timeline, id: SegmentId, start: f32, end: f32) {
    let segment = timeline
        .segment(id)
        .unwrap_or_else(|| panic!("segment {id} not in timeline"));
    assert!(
        (segment.start - start).abs() < 1e-3 && (segment.end - end).abs() < 1e-3,
        "segment {} is [{}, {}], expected [{start}, {end}]",
        segment.name,
        segment.start,
        segment.end
    );
}

/// Assert how many segments the editor has selected.
pub fn assert_selection_len(editor: &TimelineEditor, expected: usize) {
    assert_eq!(
        editor.selection().len(),
        expected,
        "{} segments selected, expected {}",
        editor.selection().len(),
        expected
    );
}
