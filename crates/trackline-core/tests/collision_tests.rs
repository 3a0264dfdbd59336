use proptest::prelude::*;

use trackline_core::collision::{
    CollisionScene, Mover, Obstacle, ResizeEdge, resolve_move, resolve_resize,
};
use trackline_core::selection::Selection;
use trackline_core::staging::Staging;
use trackline_core::timeline::{Segment, SegmentId, Timeline, Track};

fn obstacle(start: f32, end: f32) -> Obstacle {
    Obstacle {
        id: SegmentId::new(),
        start,
        end,
    }
}

fn mover(track_index: usize, start: f32, end: f32) -> Mover {
    Mover {
        id: SegmentId::new(),
        track_index,
        start,
        end,
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_move_stops_against_right_neighbor() {
    let scene = CollisionScene::from_rows(vec![vec![obstacle(0.0, 50.0), obstacle(110.0, 150.0)]]);
    let movers = [mover(0, 60.0, 100.0)];

    let delta = resolve_move(&scene, &movers, 30.0, 1.0);

    assert!(approx(delta, 10.0));
}

#[test]
fn test_move_stops_against_left_neighbor() {
    let scene = CollisionScene::from_rows(vec![vec![obstacle(0.0, 50.0), obstacle(110.0, 150.0)]]);
    let movers = [mover(0, 60.0, 100.0)];

    let delta = resolve_move(&scene, &movers, -25.0, 1.0);

    assert!(approx(delta, -10.0));
}

#[test]
fn test_move_in_free_space_is_unchanged() {
    let scene = CollisionScene::from_rows(vec![vec![obstacle(0.0, 10.0), obstacle(200.0, 210.0)]]);
    let movers = [mover(0, 60.0, 100.0)];

    assert!(approx(resolve_move(&scene, &movers, 40.0, 1.0), 40.0));
    assert!(approx(resolve_move(&scene, &movers, -40.0, 1.0), -40.0));
}

#[test]
fn test_move_scales_between_pixels_and_time() {
    let scene = CollisionScene::from_rows(vec![vec![obstacle(110.0, 150.0)]]);
    let movers = [mover(0, 60.0, 100.0)];

    // 10 time units of room at 2px per unit is 20px.
    let delta = resolve_move(&scene, &movers, 100.0, 2.0);

    assert!(approx(delta, 20.0));
}

#[test]
fn test_move_capped_at_time_zero() {
    let scene = CollisionScene::default();
    let movers = [mover(0, 20.0, 40.0)];

    let delta = resolve_move(&scene, &movers, -100.0, 1.0);

    assert!(approx(delta, -20.0));
}

#[test]
fn test_move_at_zero_cannot_go_left() {
    let scene = CollisionScene::default();
    let movers = [mover(0, 0.0, 40.0)];

    assert_eq!(resolve_move(&scene, &movers, -15.0, 1.0), 0.0);
}

#[test]
fn test_move_jumps_into_wide_enough_gap() {
    // The proposed slot overlaps the far obstacle, the walk settles in the
    // gap right before it.
    let scene = CollisionScene::from_rows(vec![vec![
        obstacle(40.0, 60.0),
        obstacle(100.0, 120.0),
    ]]);
    let movers = [mover(0, 0.0, 20.0)];

    let delta = resolve_move(&scene, &movers, 90.0, 1.0);

    assert!(approx(delta, 80.0));
}

#[test]
fn test_most_restrictive_mover_wins() {
    let scene = CollisionScene::from_rows(vec![
        vec![obstacle(70.0, 80.0)],
        vec![obstacle(65.0, 80.0)],
    ]);
    let movers = [mover(0, 0.0, 50.0), mover(1, 0.0, 50.0)];

    let delta = resolve_move(&scene, &movers, 30.0, 1.0);

    // Row 0 has room for 20 units, row 1 only for 15.
    assert!(approx(delta, 15.0));
}

#[test]
fn test_tiny_delta_resolves_to_zero() {
    let scene = CollisionScene::default();
    let movers = [mover(0, 10.0, 20.0)];

    assert_eq!(resolve_move(&scene, &movers, 0.0005, 1.0), 0.0);
}

#[test]
fn test_resize_end_stops_at_next_neighbor() {
    let scene = CollisionScene::from_rows(vec![vec![obstacle(60.0, 100.0)]]);
    let movers = [mover(0, 0.0, 50.0)];

    let delta = resolve_resize(&scene, &movers, 30.0, 1.0, ResizeEdge::End);

    assert!(approx(delta, 10.0));
}

#[test]
fn test_resize_start_stops_at_previous_neighbor() {
    let scene = CollisionScene::from_rows(vec![vec![
        obstacle(0.0, 50.0),
        obstacle(60.0, 100.0),
    ]]);
    let movers = [mover(0, 110.0, 150.0)];

    let delta = resolve_resize(&scene, &movers, -40.0, 1.0, ResizeEdge::Start);

    assert!(approx(delta, -10.0));
}

#[test]
fn test_resize_start_capped_at_time_zero() {
    let scene = CollisionScene::default();
    let movers = [mover(0, 10.0, 30.0)];

    let delta = resolve_resize(&scene, &movers, -50.0, 1.0, ResizeEdge::Start);

    assert!(approx(delta, -10.0));
}

#[test]
fn test_resize_cannot_cross_pinned_edge() {
    let scene = CollisionScene::default();
    let movers = [mover(0, 10.0, 30.0)];

    let delta = resolve_resize(&scene, &movers, 50.0, 1.0, ResizeEdge::Start);

    assert!(approx(delta, 20.0));
}

#[test]
fn test_shrinking_is_never_blocked() {
    let scene = CollisionScene::from_rows(vec![vec![obstacle(50.0, 60.0)]]);
    let movers = [mover(0, 0.0, 50.0)];

    let delta = resolve_resize(&scene, &movers, -20.0, 1.0, ResizeEdge::End);

    assert!(approx(delta, -20.0));
}

#[test]
fn test_capture_skips_dragged_segments() {
    let dragged = Segment::new("dragged", 0.0, 10.0);
    let dragged_id = dragged.id;
    let mut timeline = Timeline::new();
    timeline.add_track(Track::composite(
        "t",
        vec![Segment::new("late", 50.0, 60.0), dragged, Segment::new("early", 20.0, 30.0)],
    ));

    let scene = CollisionScene::capture(&timeline, |id| id == dragged_id);

    let starts: Vec<f32> = scene.row(0).iter().map(|o| o.start).collect();
    assert_eq!(starts, vec![20.0, 50.0]);
    assert!(scene.row(5).is_empty());
}

/// Non-overlapping segments on one row, built from gaps and lengths.
fn row_strategy() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((0u32..40, 1u32..40), 1..8).prop_map(|parts| {
        let mut cursor = 0.0;
        parts
            .into_iter()
            .map(|(gap, length)| {
                let start = cursor + gap as f32 * 0.5;
                let end = start + length as f32 * 0.5;
                cursor = end;
                (start, end)
            })
            .collect()
    })
}

fn build(rows: &[Vec<(f32, f32)>], picks: &[bool]) -> (Timeline, Selection) {
    let mut timeline = Timeline::new();
    let mut selection = Selection::new();
    let mut pick = picks.iter().cycle();
    for (index, row) in rows.iter().enumerate() {
        let segments: Vec<Segment> = row
            .iter()
            .map(|&(start, end)| Segment::new(format!("s{index}"), start, end))
            .collect();
        for segment in &segments {
            if *pick.next().unwrap_or(&false) {
                selection.insert(segment.id);
            }
        }
        timeline.add_track(Track::composite(format!("track {index}"), segments));
    }
    (timeline, selection)
}

fn assert_clear(staging: &Staging, scene: &CollisionScene) -> Result<(), TestCaseError> {
    for edit in staging.iter() {
        prop_assert!(edit.start >= 0.0, "negative start {}", edit.start);
        for o in scene.row(edit.track_index) {
            let overlap = edit.start < o.end - 1e-3 && o.start < edit.end - 1e-3;
            prop_assert!(
                !overlap,
                "[{}, {}] overlaps [{}, {}]",
                edit.start,
                edit.end,
                o.start,
                o.end
            );
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn moves_never_overlap_unselected_segments(
        rows in prop::collection::vec(row_strategy(), 1..4),
        picks in prop::collection::vec(any::<bool>(), 1..10),
        deltas in prop::collection::vec(-300.0f32..300.0, 1..12),
        scale in 0.25f32..4.0,
        snap in any::<bool>(),
    ) {
        let (mut timeline, selection) = build(&rows, &picks);
        for delta in deltas {
            let mut staging = Staging::from_selection(&timeline, &selection).unwrap();
            let scene = CollisionScene::capture(&timeline, |id| selection.contains(id));
            let resolved = resolve_move(&scene, &staging.movers(), delta, scale);
            staging.apply_move(&scene, resolved / scale, snap);
            assert_clear(&staging, &scene)?;
            staging.commit(&mut timeline).unwrap();
        }
    }

    #[test]
    fn resizes_never_overlap_unselected_segments(
        rows in prop::collection::vec(row_strategy(), 1..4),
        picks in prop::collection::vec(any::<bool>(), 1..10),
        deltas in prop::collection::vec(-300.0f32..300.0, 1..12),
        scale in 0.25f32..4.0,
        from_start in any::<bool>(),
        snap in any::<bool>(),
    ) {
        let edge = if from_start { ResizeEdge::Start } else { ResizeEdge::End };
        let (mut timeline, selection) = build(&rows, &picks);
        for delta in deltas {
            let mut staging = Staging::from_selection(&timeline, &selection).unwrap();
            let scene = CollisionScene::capture(&timeline, |id| selection.contains(id));
            let resolved = resolve_resize(&scene, &staging.movers(), delta, scale, edge);
            staging.apply_resize(&scene, resolved / scale, edge, snap);
            assert_clear(&staging, &scene)?;
            for edit in staging.iter() {
                prop_assert!(edit.end >= edit.start);
            }
            staging.commit(&mut timeline).unwrap();
        }
    }
}
