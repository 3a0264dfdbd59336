use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    A,
    D,
    Escape,
    Other,
}

/// Held modifier keys, read through what they mean to the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
    };
    pub const ALT: Modifiers = Modifiers {
        ctrl: false,
        alt: true,
        shift: false,
    };

    /// Clicks and rectangles toggle membership instead of replacing.
    pub fn additive(&self) -> bool {
        self.ctrl
    }

    /// Rectangle selection requires full containment.
    pub fn containment(&self) -> bool {
        self.ctrl
    }

    /// Disables snapping to whole time units.
    pub fn free_movement(&self) -> bool {
        self.alt
    }

    /// Wheel zooms instead of scrolling.
    pub fn zoom(&self) -> bool {
        self.alt
    }

    /// Wheel acts on the horizontal axis.
    pub fn horizontal(&self) -> bool {
        self.ctrl
    }

    /// Keyboard shortcut chord (select all, deselect all).
    pub fn command(&self) -> bool {
        self.ctrl
    }
}

/// Buttons held down while the pointer moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerButtons {
    pub primary: bool,
    pub middle: bool,
}

impl PointerButtons {
    pub const NONE: PointerButtons = PointerButtons {
        primary: false,
        middle: false,
    };
    pub const PRIMARY: PointerButtons = PointerButtons {
        primary: true,
        middle: false,
    };
    pub const MIDDLE: PointerButtons = PointerButtons {
        primary: false,
        middle: true,
    };

    pub fn contains(&self, button: PointerButton) -> bool {
        match button {
            PointerButton::Primary => self.primary,
            PointerButton::Middle => self.middle,
            PointerButton::Secondary => false,
        }
    }

    pub fn set(&mut self, button: PointerButton, held: bool) {
        match button {
            PointerButton::Primary => self.primary = held,
            PointerButton::Middle => self.middle = held,
            PointerButton::Secondary => {}
        }
    }
}

/// Input delivered to the editor by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineEvent {
    PointerPressed {
        button: PointerButton,
        position: Point,
        modifiers: Modifiers,
    },
    /// A move without the primary button held ends any primary gesture,
    /// and one without the middle button ends panning.
    PointerMoved {
        position: Point,
        buttons: PointerButtons,
        modifiers: Modifiers,
    },
    PointerReleased {
        button: PointerButton,
        position: Point,
        modifiers: Modifiers,
    },
    /// `delta` is in wheel units, 120 per notch, positive away from the user.
    WheelScrolled {
        delta: f32,
        position: Point,
        modifiers: Modifiers,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
}
