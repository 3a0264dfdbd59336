use trackline_core::error::CoreError;
use trackline_core::timeline::*;

fn make_segment(name: &str, start: f32, end: f32) -> Segment {
    Segment::new(name, start, end)
}

#[test]
fn test_simple_track_wraps_single_segment() {
    let segment = make_segment("Intro", 0.0, 10.0);
    let id = segment.id;
    let track = Track::simple(segment);

    assert_eq!(track.name, "Intro");
    assert_eq!(track.len(), 1);
    assert!(track.contains(id));
}

#[test]
fn test_elements_keep_insertion_order() {
    let track = Track::composite(
        "Dialogue",
        vec![
            make_segment("b", 50.0, 60.0),
            make_segment("a", 0.0, 10.0),
            make_segment("c", 20.0, 30.0),
        ],
    );

    let names: Vec<&str> = track.elements().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn test_spline_track_exposes_segments_as_elements() {
    let track = Track::spline(
        "Opacity",
        vec![
            SplineSegment::new(make_segment("fade in", 0.0, 5.0), 0.0, 1.0),
            SplineSegment::new(make_segment("fade out", 20.0, 25.0), 1.0, 0.0)
                .with_tangents(0.5, -0.5),
        ],
    );

    assert_eq!(track.len(), 2);
    assert_eq!(track.splines()[1].tangent_start, 0.5);
    let starts: Vec<f32> = track.elements().map(|s| s.start).collect();
    assert_eq!(starts, vec![0.0, 20.0]);
}

#[test]
fn test_track_index_found_by_segment() {
    let mut timeline = Timeline::new();
    let first = make_segment("one", 0.0, 10.0);
    let second = make_segment("two", 0.0, 10.0);
    let second_id = second.id;
    timeline.add_track(Track::simple(first));
    timeline.add_track(Track::composite("many", vec![make_segment("x", 0.0, 1.0), second]));

    assert_eq!(timeline.track_index_of(second_id), Some(1));
    assert_eq!(timeline.track_index_of(SegmentId::new()), None);
}

#[test]
fn test_segment_mut_updates_any_track_shape() {
    let mut timeline = Timeline::new();
    let spline = SplineSegment::new(make_segment("curve", 10.0, 20.0), 0.0, 1.0);
    let id = spline.segment.id;
    timeline.add_track(Track::spline("curves", vec![spline]));

    let segment = timeline.segment_mut(id).unwrap();
    segment.start = 12.0;
    segment.end = 30.0;

    assert_eq!(timeline.segment(id).unwrap().start, 12.0);
    assert_eq!(timeline.tracks[0].splines()[0].segment.end, 30.0);
}

#[test]
fn test_segments_iterate_tracks_then_elements() {
    let mut timeline = Timeline::new();
    timeline.add_track(Track::composite(
        "a",
        vec![make_segment("a1", 0.0, 1.0), make_segment("a2", 2.0, 3.0)],
    ));
    timeline.add_track(Track::simple(make_segment("b1", 0.0, 1.0)));

    let visited: Vec<(usize, &str)> = timeline
        .segments()
        .map(|(index, s)| (index, s.name.as_str()))
        .collect();
    assert_eq!(visited, vec![(0, "a1"), (0, "a2"), (1, "b1")]);
    assert_eq!(timeline.segment_count(), 3);
}

#[test]
fn test_content_end_is_largest_end() {
    let mut timeline = Timeline::new();
    assert_eq!(timeline.content_end(), 0.0);

    timeline.add_track(Track::composite(
        "a",
        vec![make_segment("a1", 0.0, 40.0), make_segment("a2", 50.0, 75.0)],
    ));
    timeline.add_track(Track::simple(make_segment("b1", 10.0, 60.0)));
    assert_eq!(timeline.content_end(), 75.0);
}

#[test]
fn test_track_out_of_range() {
    let timeline = Timeline::new();
    assert!(matches!(timeline.track(3), Err(CoreError::TrackNotFound(3))));
}

#[test]
fn test_touching_segments_do_not_overlap() {
    let a = make_segment("a", 0.0, 10.0);
    let b = make_segment("b", 10.0, 20.0);
    let c = make_segment("c", 5.0, 15.0);

    assert!(!a.overlaps(&b));
    assert!(a.overlaps(&c));
    assert!(c.overlaps(&b));
}
