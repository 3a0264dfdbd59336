use trackline_core::input::TimelineEvent;

#[derive(Debug, Clone)]
pub enum Message {
    /// Input from the timeline canvas, with the canvas size it happened at.
    Input {
        event: TimelineEvent,
        viewport: (f32, f32),
    },

    // Playback
    TogglePlayback,
    ResetClock,
    Tick,

    // Shortcuts
    SelectAll,
    DeselectAll,
}
