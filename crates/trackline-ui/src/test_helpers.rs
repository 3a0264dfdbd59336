use trackline_core::TimelineEditor;
use trackline_core::geometry::Point;
use trackline_core::input::{Modifiers, PointerButton, PointerButtons, TimelineEvent};

use crate::app::App;
use crate::message::Message;

impl App {
    /// Create an App around a prepared editor, keeping its viewport.
    pub fn with_editor(editor: TimelineEditor) -> Self {
        Self {
            editor,
            status_message: String::new(),
        }
    }

    /// Feed one input event through `update`, as the canvas would.
    pub fn send_input(&mut self, event: TimelineEvent) {
        let viewport = self.editor.viewport();
        let _ = self.update(Message::Input { event, viewport });
    }

    /// Press, move and release the primary button.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32), modifiers: Modifiers) {
        self.send_input(TimelineEvent::PointerPressed {
            button: PointerButton::Primary,
            position: Point::new(from.0, from.1),
            modifiers,
        });
        self.send_input(TimelineEvent::PointerMoved {
            position: Point::new(to.0, to.1),
            buttons: PointerButtons::PRIMARY,
            modifiers,
        });
        self.send_input(TimelineEvent::PointerReleased {
            button: PointerButton::Primary,
            position: Point::new(to.0, to.1),
            modifiers,
        });
    }

    /// Press and release the primary button without moving.
    pub fn click(&mut self, at: (f32, f32), modifiers: Modifiers) {
        self.drag(at, at, modifiers);
    }
}
