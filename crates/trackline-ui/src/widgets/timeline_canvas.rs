use iced::keyboard;
use iced::mouse;
use iced::widget::canvas;
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use trackline_core::TimelineEditor;
use trackline_core::config::Rgba;
use trackline_core::editor::CursorHint;
use trackline_core::geometry;
use trackline_core::input::{Key, Modifiers, PointerButton, PointerButtons, TimelineEvent};
use trackline_core::render::{DrawCommand, RenderSink};

use crate::message::Message;

/// Wheel units reported for one scrolled line.
const WHEEL_UNITS_PER_LINE: f32 = 120.0;
/// Pixel scroll deltas are converted to lines at this rate.
const PIXELS_PER_LINE: f32 = 20.0;
const LABEL_TEXT_SIZE: f32 = 12.0;

#[derive(Default)]
pub struct TimelineCanvasState {
    pub modifiers: keyboard::Modifiers,
    /// Buttons pressed inside the canvas and not yet released.
    pub buttons: PointerButtons,
}

pub struct TimelineCanvas<'a> {
    pub editor: &'a TimelineEditor,
}

impl<'a> TimelineCanvas<'a> {
    /// Translate a canvas event into editor input, if the editor cares.
    pub fn translate(
        &self,
        state: &mut TimelineCanvasState,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<TimelineEvent> {
        if let canvas::Event::Keyboard(event) = event {
            return translate_keyboard(state, event);
        }

        let modifiers = to_modifiers(state.modifiers);

        // Releases and drags keep reaching the editor once the cursor leaves
        // the canvas, so a gesture is always closed.
        match event {
            canvas::Event::Mouse(mouse::Event::ButtonReleased(button)) => {
                let button = to_pointer_button(*button)?;
                if !state.buttons.contains(button) && !cursor.is_over(bounds) {
                    return None;
                }
                state.buttons.set(button, false);
                return Some(TimelineEvent::PointerReleased {
                    button,
                    position: relative_position(cursor, bounds)?,
                    modifiers,
                });
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. })
                if state.buttons != PointerButtons::NONE =>
            {
                return Some(TimelineEvent::PointerMoved {
                    position: relative_position(cursor, bounds)?,
                    buttons: state.buttons,
                    modifiers,
                });
            }
            _ => {}
        }

        let position = cursor.position_in(bounds)?;
        let position = geometry::Point::new(position.x, position.y);

        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(button)) => {
                let button = to_pointer_button(*button)?;
                state.buttons.set(button, true);
                Some(TimelineEvent::PointerPressed {
                    button,
                    position,
                    modifiers,
                })
            }
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                Some(TimelineEvent::PointerMoved {
                    position,
                    buttons: state.buttons,
                    modifiers,
                })
            }
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let lines = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => *y,
                    mouse::ScrollDelta::Pixels { y, .. } => *y / PIXELS_PER_LINE,
                };
                Some(TimelineEvent::WheelScrolled {
                    delta: lines * WHEEL_UNITS_PER_LINE,
                    position,
                    modifiers,
                })
            }
            _ => None,
        }
    }
}

fn translate_keyboard(
    state: &mut TimelineCanvasState,
    event: &keyboard::Event,
) -> Option<TimelineEvent> {
    match event {
        keyboard::Event::ModifiersChanged(modifiers) => {
            state.modifiers = *modifiers;
            None
        }
        keyboard::Event::KeyPressed { key, modifiers, .. } => Some(TimelineEvent::KeyPressed {
            key: to_key(key.as_ref())?,
            modifiers: to_modifiers(*modifiers),
        }),
        _ => None,
    }
}

fn to_key(key: keyboard::Key<&str>) -> Option<Key> {
    match key {
        keyboard::Key::Character("a") => Some(Key::A),
        keyboard::Key::Character("d") => Some(Key::D),
        keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Key::Escape),
        _ => None,
    }
}

fn to_modifiers(modifiers: keyboard::Modifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.control(),
        alt: modifiers.alt(),
        shift: modifiers.shift(),
    }
}

fn to_pointer_button(button: mouse::Button) -> Option<PointerButton> {
    match button {
        mouse::Button::Left => Some(PointerButton::Primary),
        mouse::Button::Middle => Some(PointerButton::Middle),
        mouse::Button::Right => Some(PointerButton::Secondary),
        _ => None,
    }
}

/// Cursor position in canvas coordinates, even outside the canvas.
fn relative_position(cursor: mouse::Cursor, bounds: Rectangle) -> Option<geometry::Point> {
    let position = cursor.position()?;
    Some(geometry::Point::new(
        position.x - bounds.x,
        position.y - bounds.y,
    ))
}

fn to_color(color: Rgba) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, f32::from(color.a) / 255.0)
}

fn to_point(point: geometry::Point) -> Point {
    Point::new(point.x, point.y)
}

fn to_interaction(hint: CursorHint) -> mouse::Interaction {
    match hint {
        CursorHint::Default => mouse::Interaction::default(),
        CursorHint::Move => mouse::Interaction::Grab,
        CursorHint::Grabbing => mouse::Interaction::Grabbing,
        CursorHint::ResizeHorizontal => mouse::Interaction::ResizingHorizontally,
        CursorHint::ResizeVertical => mouse::Interaction::ResizingVertically,
        CursorHint::ResizeDiagonalNwSe => mouse::Interaction::ResizingDiagonallyDown,
        CursorHint::ResizeDiagonalNeSw => mouse::Interaction::ResizingDiagonallyUp,
        CursorHint::Crosshair => mouse::Interaction::Crosshair,
    }
}

/// Paints editor draw commands onto a canvas frame.
struct FrameSink<'f> {
    frame: &'f mut canvas::Frame,
}

impl FrameSink<'_> {
    fn stroke_rect(&mut self, rect: geometry::Rect, color: Rgba, width: f32) {
        let path = canvas::Path::rectangle(
            Point::new(rect.x, rect.y),
            Size::new(rect.width, rect.height),
        );
        self.frame.stroke(
            &path,
            canvas::Stroke::default()
                .with_color(to_color(color))
                .with_width(width),
        );
    }

    fn fill_rect(&mut self, rect: geometry::Rect, color: Rgba) {
        self.frame.fill_rectangle(
            Point::new(rect.x, rect.y),
            Size::new(rect.width, rect.height),
            to_color(color),
        );
    }
}

impl RenderSink for FrameSink<'_> {
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Fill { rect, color } => self.fill_rect(rect, color),
            DrawCommand::Line {
                from,
                to,
                color,
                width,
                dotted,
            } => {
                let path = canvas::Path::line(to_point(from), to_point(to));
                let mut stroke = canvas::Stroke::default()
                    .with_color(to_color(color))
                    .with_width(width);
                if dotted {
                    stroke.line_dash = canvas::LineDash {
                        segments: &[1.0, 2.0],
                        offset: 0,
                    };
                }
                self.frame.stroke(&path, stroke);
            }
            DrawCommand::Segment {
                fill,
                border,
                fill_color,
                border_color,
                border_width,
                ..
            } => {
                self.fill_rect(fill, fill_color);
                self.stroke_rect(border, border_color, border_width);
            }
            DrawCommand::Curve { from, to, color } => {
                let path = canvas::Path::line(to_point(from), to_point(to));
                self.frame.stroke(
                    &path,
                    canvas::Stroke::default()
                        .with_color(to_color(color))
                        .with_width(1.0),
                );
            }
            DrawCommand::SelectionRect { rect, color } => self.stroke_rect(rect, color, 1.0),
            DrawCommand::Label {
                rect,
                text,
                background,
                color,
            } => {
                self.fill_rect(rect, background);
                self.frame.fill_text(canvas::Text {
                    content: text,
                    position: Point::new(rect.x + 4.0, rect.y + 2.0),
                    color: to_color(color),
                    size: iced::Pixels(LABEL_TEXT_SIZE),
                    ..canvas::Text::default()
                });
            }
            DrawCommand::Playhead {
                x,
                head,
                line_top,
                line_bottom,
                color,
            } => {
                self.fill_rect(head, color);
                let path = canvas::Path::line(Point::new(x, line_top), Point::new(x, line_bottom));
                self.frame.stroke(
                    &path,
                    canvas::Stroke::default()
                        .with_color(to_color(color))
                        .with_width(1.0),
                );
            }
        }
    }
}

impl<'a> canvas::Program<Message> for TimelineCanvas<'a> {
    type State = TimelineCanvasState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let event = self.translate(state, event, bounds, cursor)?;
        let message = Message::Input {
            event,
            viewport: (bounds.width, bounds.height),
        };
        // Hover moves still reach the editor for cursor hints but stay visible
        // to other widgets.
        match event {
            TimelineEvent::PointerMoved { .. } => Some(canvas::Action::publish(message)),
            _ => Some(canvas::Action::publish(message).and_capture()),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        self.editor.render(&mut FrameSink { frame: &mut frame });
        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match cursor.position_in(bounds) {
            Some(position) => to_interaction(
                self.editor
                    .cursor_hint(geometry::Point::new(position.x, position.y)),
            ),
            None => mouse::Interaction::default(),
        }
    }
}
