use std::time::Duration;

use iced::widget::{button, canvas, column, container, row, text};
use iced::{Element, Length, Subscription, Task};
use tracing::warn;

use trackline_core::clock::{Clock, StopwatchClock};
use trackline_core::timeline::{Segment, SplineSegment, Track};
use trackline_core::{EditorEvent, Response, TimelineEditor};

use crate::message::Message;
use crate::widgets::timeline_canvas::TimelineCanvas;

const TICK_INTERVAL: Duration = Duration::from_millis(16);

pub struct App {
    pub editor: TimelineEditor,
    pub status_message: String,
}

impl Default for App {
    fn default() -> Self {
        let mut editor = TimelineEditor::default();
        editor.set_clock(Box::new(StopwatchClock::new()));
        Self {
            editor,
            status_message: String::new(),
        }
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boot() -> (Self, Task<Message>) {
        let mut app = Self::new();
        for track in demo_tracks() {
            app.editor.add_track(track);
        }
        (app, Task::none())
    }

    pub fn is_playing(&self) -> bool {
        self.editor.clock().is_some_and(|clock| clock.is_running())
    }

    /// Clock value in milliseconds, 0 without a clock.
    pub fn clock_value(&self) -> f64 {
        self.editor.clock().map_or(0.0, |clock| clock.value())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Input { event, viewport } => {
                if self.editor.viewport() != viewport {
                    self.editor.set_viewport(viewport.0, viewport.1);
                }
                match self.editor.handle(event) {
                    Ok(response) => self.report(&response),
                    Err(e) => {
                        warn!("timeline input failed: {e}");
                        self.status_message = format!("Edit failed: {e}");
                    }
                }
                Task::none()
            }
            Message::TogglePlayback => {
                if let Some(clock) = self.editor.clock_mut() {
                    let running = clock.is_running();
                    clock.set_running(!running);
                }
                Task::none()
            }
            Message::ResetClock => {
                if let Some(clock) = self.editor.clock_mut() {
                    clock.set_value(0.0);
                }
                Task::none()
            }
            Message::Tick => {
                self.editor.tick();
                Task::none()
            }
            Message::SelectAll => {
                self.editor.select_all();
                self.report_selection();
                Task::none()
            }
            Message::DeselectAll => {
                self.editor.deselect_all();
                self.report_selection();
                Task::none()
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.is_playing() {
            iced::time::every(TICK_INTERVAL).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let toolbar = self.view_toolbar();

        let timeline = canvas(TimelineCanvas {
            editor: &self.editor,
        })
        .width(Length::Fill)
        .height(Length::Fill);

        let status = text(&self.status_message).size(14);

        let content = column![toolbar, timeline, status].spacing(10).padding(10);

        container(content).into()
    }

    fn view_toolbar(&self) -> Element<'_, Message> {
        let play_pause = if self.is_playing() {
            button(text("Pause").size(14)).on_press(Message::TogglePlayback)
        } else {
            button(text("Play").size(14)).on_press(Message::TogglePlayback)
        };
        let reset = button(text("Reset").size(14)).on_press(Message::ResetClock);
        let select_all = button(text("Select All").size(14)).on_press(Message::SelectAll);
        let deselect_all = button(text("Deselect All").size(14)).on_press(Message::DeselectAll);

        let position = text(format!("{:.2}s", self.clock_value() / 1000.0)).size(14);

        row![play_pause, reset, select_all, deselect_all, position]
            .spacing(8)
            .into()
    }

    fn report(&mut self, response: &Response) {
        for event in &response.events {
            match event {
                EditorEvent::SelectionChanged(_) => self.report_selection(),
                EditorEvent::ClockScrubbed(value) => {
                    self.status_message = format!("Playhead at {:.2}s", value / 1000.0);
                }
            }
        }
    }

    fn report_selection(&mut self) {
        self.status_message = format!("{} selected", self.editor.selection().len());
    }
}

/// Content shown on startup: plain, composite and automation tracks.
fn demo_tracks() -> Vec<Track> {
    let mut tracks: Vec<Track> = (0..4)
        .map(|i| {
            let start = i as f32 * 35.0;
            Track::simple(Segment::new(format!("clip {i}"), start, start + 30.0))
        })
        .collect();

    let parts = (0..6)
        .map(|i| {
            let start = i as f32 * 45.0;
            Segment::new(format!("part {i}"), start, start + 40.0)
        })
        .collect();
    tracks.push(Track::composite("composite", parts));

    tracks.push(Track::spline(
        "automation",
        vec![
            SplineSegment::new(Segment::new("fade in", 0.0, 60.0), 0.0, 1.0),
            SplineSegment::new(Segment::new("fade out", 80.0, 140.0), 1.0, 0.0)
                .with_tangents(0.0, -1.0),
        ],
    ));
    tracks
}
