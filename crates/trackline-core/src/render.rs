//! Display list for one frame.
//!
//! The editor decides what is drawn and in which order; a [`RenderSink`]
//! decides how. Commands arrive back to front: background and grid,
//! committed segments, staged segments, selection rectangle, labels,
//! playhead.

use crate::config::Rgba;
use crate::geometry::{Point, Projection, Rect};
use crate::selection::Selection;
use crate::staging::Staging;
use crate::timeline::{SegmentId, Timeline};

const LABEL_BACKGROUND: Rgba = Rgba::rgb(30, 30, 30);
const LABEL_TEXT: Rgba = Rgba::rgb(211, 211, 211);
const MINOR_TICK: Rgba = Rgba::rgb(30, 30, 30);
const SELECTED_BORDER: Rgba = Rgba::rgb(245, 245, 245);
const UNSELECTED_BORDER: Rgba = Rgba::BLACK.with_alpha(128);
const SELECTION_RECT: Rgba = Rgba::rgb(211, 211, 211);
const PLAYHEAD: Rgba = Rgba::rgb(0, 255, 127);
const STAGED_ALPHA: u8 = 128;

/// Model units between grid columns.
const GRID_STEP: f32 = 10.0;
/// Every this many columns the line is drawn brighter.
const GRID_MAJOR_EVERY: i64 = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: Rect,
        color: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f32,
        dotted: bool,
    },
    Segment {
        id: SegmentId,
        fill: Rect,
        border: Rect,
        fill_color: Rgba,
        border_color: Rgba,
        border_width: f32,
        staged: bool,
    },
    /// Straight-line approximation of a spline segment's curve.
    Curve {
        from: Point,
        to: Point,
        color: Rgba,
    },
    SelectionRect {
        rect: Rect,
        color: Rgba,
    },
    Label {
        rect: Rect,
        text: String,
        background: Rgba,
        color: Rgba,
    },
    Playhead {
        x: f32,
        head: Rect,
        line_top: f32,
        line_bottom: f32,
        color: Rgba,
    },
}

/// Receives draw commands in paint order.
pub trait RenderSink {
    fn draw(&mut self, command: DrawCommand);
}

impl RenderSink for Vec<DrawCommand> {
    fn draw(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

/// Everything a frame depends on.
pub struct FrameState<'a> {
    pub timeline: &'a Timeline,
    pub selection: &'a Selection,
    pub staging: Option<&'a Staging>,
    pub projection: Projection<'a>,
    pub selection_rect: Option<Rect>,
    /// Clock value in milliseconds, absent when no clock is attached.
    pub playhead: Option<f64>,
    pub width: f32,
    pub height: f32,
}

/// Evenly spaced hue for row `index` of `count`.
pub fn track_color(index: usize, count: usize) -> Rgba {
    let hue = 360.0 * index as f32 / count.max(1) as f32;
    Rgba::from_hsv(hue, 0.6, 0.8)
}

pub fn draw_frame(frame: &FrameState<'_>, sink: &mut impl RenderSink) {
    draw_background(frame, sink);
    draw_segments(frame, sink);
    draw_staged(frame, sink);
    if let Some(rect) = frame.selection_rect {
        sink.draw(DrawCommand::SelectionRect {
            rect,
            color: SELECTION_RECT,
        });
    }
    draw_labels(frame, sink);
    draw_playhead(frame, sink);
}

fn draw_background(frame: &FrameState<'_>, sink: &mut impl RenderSink) {
    let projection = &frame.projection;
    let config = projection.config;
    let area = projection.area;

    sink.draw(DrawCommand::Fill {
        rect: Rect::new(0.0, 0.0, frame.width, frame.height),
        color: config.background_color,
    });

    let grid = Rgba::WHITE.with_alpha(config.grid_alpha);
    let bright = Rgba::WHITE.with_alpha(config.grid_alpha.saturating_mul(2));

    // Row separators sit at the bottom of each segment box.
    let pitch = projection.row_pitch();
    let first_line = projection.row_top(0) + projection.row_height();
    let skipped = ((area.top() - first_line) / pitch).ceil().max(0.0);
    let mut y = first_line + skipped * pitch;
    while y < frame.height {
        if y >= area.top() {
            sink.draw(DrawCommand::Line {
                from: Point::new(area.left(), y),
                to: Point::new(area.right(), y),
                color: grid,
                width: 1.0,
                dotted: false,
            });
        }
        y += pitch;
    }

    let scale = projection.view.scale.x;
    let first = projection.time_at(area.left()).max(0.0);
    let last = projection.time_at(area.right());

    // Integer columns: past 2^24 an f32 time no longer advances by one.
    // Never more lines than pixels.
    let limit = area.width.max(0.0) as usize + 1;

    if scale > 5.0 {
        let ticks = (first.ceil() as i64..)
            .take(limit)
            .map(|column| column as f32)
            .take_while(|t| *t <= last);
        for t in ticks {
            vertical_line(frame, sink, projection.x_at(t), MINOR_TICK, true);
        }
    }

    if GRID_STEP * scale >= 1.0 {
        let columns = ((first / GRID_STEP).ceil() as i64..)
            .take(limit)
            .take_while(|column| *column as f32 * GRID_STEP <= last);
        for column in columns {
            let color = if column % GRID_MAJOR_EVERY == 0 { bright } else { grid };
            let x = projection.x_at(column as f32 * GRID_STEP);
            vertical_line(frame, sink, x, color, false);
        }
    }
}

fn vertical_line(
    frame: &FrameState<'_>,
    sink: &mut impl RenderSink,
    x: f32,
    color: Rgba,
    dotted: bool,
) {
    let area = frame.projection.area;
    sink.draw(DrawCommand::Line {
        from: Point::new(x, area.top()),
        to: Point::new(x, area.bottom()),
        color,
        width: 1.0,
        dotted,
    });
}

fn draw_segments(frame: &FrameState<'_>, sink: &mut impl RenderSink) {
    let projection = &frame.projection;
    let count = frame.timeline.tracks.len();

    for (track_index, track) in frame.timeline.tracks.iter().enumerate() {
        let color = track_color(track_index, count);
        for segment in track.elements() {
            let fill = projection.segment_rect(track_index, segment.start, segment.end);
            if !fill.intersects(&projection.area) {
                continue;
            }
            let border_color = if frame.selection.contains(segment.id) {
                SELECTED_BORDER
            } else {
                UNSELECTED_BORDER
            };
            sink.draw(DrawCommand::Segment {
                id: segment.id,
                fill,
                border: projection.border_rect(&fill),
                fill_color: color,
                border_color,
                border_width: projection.config.track_border_size,
                staged: false,
            });
        }

        for spline in track.splines() {
            let fill =
                projection.segment_rect(track_index, spline.segment.start, spline.segment.end);
            if !fill.intersects(&projection.area) {
                continue;
            }
            let value_y = |value: f32| fill.bottom() - value.clamp(0.0, 1.0) * fill.height;
            sink.draw(DrawCommand::Curve {
                from: Point::new(fill.left(), value_y(spline.start_value)),
                to: Point::new(fill.right(), value_y(spline.end_value)),
                color: Rgba::WHITE,
            });
        }
    }
}

fn draw_staged(frame: &FrameState<'_>, sink: &mut impl RenderSink) {
    let Some(staging) = frame.staging else {
        return;
    };
    let projection = &frame.projection;
    let count = frame.timeline.tracks.len();

    for edit in staging.iter() {
        let fill = projection.segment_rect(edit.track_index, edit.start, edit.end);
        if !fill.intersects(&projection.area) {
            continue;
        }
        sink.draw(DrawCommand::Segment {
            id: edit.original,
            fill,
            border: projection.border_rect(&fill),
            fill_color: track_color(edit.track_index, count).with_alpha(STAGED_ALPHA),
            border_color: UNSELECTED_BORDER,
            border_width: projection.config.track_border_size,
            staged: true,
        });
    }
}

fn draw_labels(frame: &FrameState<'_>, sink: &mut impl RenderSink) {
    let projection = &frame.projection;
    for (track_index, track) in frame.timeline.tracks.iter().enumerate() {
        let rect = Rect::new(
            0.0,
            projection.row_top(track_index),
            projection.config.track_label_width,
            projection.row_height(),
        );
        sink.draw(DrawCommand::Label {
            rect,
            text: track.name.clone(),
            background: LABEL_BACKGROUND,
            color: LABEL_TEXT,
        });
    }
}

fn draw_playhead(frame: &FrameState<'_>, sink: &mut impl RenderSink) {
    let Some(value) = frame.playhead else {
        return;
    };
    let projection = &frame.projection;
    let config = projection.config;
    let area = projection.area;

    // The strip covers anything that scrolled up into it.
    sink.draw(DrawCommand::Fill {
        rect: Rect::new(0.0, 0.0, frame.width, config.playhead_height),
        color: Rgba::BLACK,
    });

    let x = projection.playhead_x(value);
    if x < area.left() || x > area.right() {
        return;
    }
    sink.draw(DrawCommand::Playhead {
        x,
        head: Rect::new(
            x - config.playhead_width / 2.0,
            0.0,
            config.playhead_width,
            config.playhead_height,
        ),
        line_top: area.top(),
        line_bottom: area.bottom(),
        color: PLAYHEAD,
    });
}
