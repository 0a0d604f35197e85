//! Mapping from window events to view commands.
//!
//! [`Interaction`] tracks which mouse buttons are held and where the pointer
//! was last seen, and turns raw winit events into [`ViewCommand`]s:
//!
//! | Gesture | Command |
//! |---------|---------|
//! | Drag with primary button | rotate X by `8·dy`, Y by `8·dx` |
//! | Drag with secondary button | rotate X by `8·dy`, Z by `8·dx` |
//! | Vertical wheel | zoom by the raw delta (120 units per notch) |
//! | Left / Right | previous / next frame |
//! | Home / End | first / last frame |
//! | Escape | quit |

use std::collections::HashSet;

use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::view::Axis;

/// Rotation units per pixel of drag.
pub const DRAG_FACTOR: i32 = 8;

/// Wheel delta units per line notch.
pub const WHEEL_UNITS_PER_NOTCH: f32 = 120.0;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn from_winit(btn: WinitMouseButton) -> Option<Self> {
        match btn {
            WinitMouseButton::Left => Some(MouseButton::Left),
            WinitMouseButton::Right => Some(MouseButton::Right),
            WinitMouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Left,
    Right,
    Home,
    End,
    Escape,
}

impl KeyCode {
    fn from_winit(key: WinitKeyCode) -> Option<Self> {
        match key {
            WinitKeyCode::ArrowLeft => Some(KeyCode::Left),
            WinitKeyCode::ArrowRight => Some(KeyCode::Right),
            WinitKeyCode::Home => Some(KeyCode::Home),
            WinitKeyCode::End => Some(KeyCode::End),
            WinitKeyCode::Escape => Some(KeyCode::Escape),
            _ => None,
        }
    }
}

/// What an input gesture asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    /// Rotate about an axis by a delta in rotation units.
    Rotate { axis: Axis, delta: i32 },
    /// Zoom by a raw wheel delta.
    Zoom(f32),
    /// Move through the frame sequence.
    StepFrame(isize),
    FirstFrame,
    LastFrame,
    Quit,
}

/// Pointer and button state between events.
#[derive(Debug, Default)]
pub struct Interaction {
    held: HashSet<MouseButton>,
    cursor: Option<(i32, i32)>,
    anchor: Option<(i32, i32)>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, button: MouseButton) -> bool {
        self.held.contains(&button)
    }

    /// Process a winit window event, appending any resulting commands.
    pub fn handle_event(&mut self, event: &WindowEvent, out: &mut Vec<ViewCommand>) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = MouseButton::from_winit(*button) {
                    self.button(btn, *state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = (position.x.round() as i32, position.y.round() as i32);
                self.cursor_moved(pos, out);
            }
            WindowEvent::CursorLeft { .. } => {
                self.anchor = None;
            }
            WindowEvent::Focused(false) => {
                self.release_all();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = wheel_delta(*delta);
                if amount != 0.0 {
                    out.push(ViewCommand::Zoom(amount));
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = KeyCode::from_winit(code) {
                        out.push(key_command(key));
                    }
                }
            }
            _ => {}
        }
    }

    /// Press or release a button. A press anchors the drag at the cursor.
    pub fn button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.held.insert(button);
            self.anchor = self.cursor;
        } else {
            self.held.remove(&button);
            if self.held.is_empty() {
                self.anchor = None;
            }
        }
    }

    /// Forget every held button, e.g. when focus is lost mid-drag.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.anchor = None;
    }

    /// Pointer moved to `pos` (whole pixels).
    pub fn cursor_moved(&mut self, pos: (i32, i32), out: &mut Vec<ViewCommand>) {
        self.cursor = Some(pos);
        let Some((last_x, last_y)) = self.anchor else {
            if !self.held.is_empty() {
                self.anchor = Some(pos);
            }
            return;
        };
        self.anchor = Some(pos);

        let dx = pos.0 - last_x;
        let dy = pos.1 - last_y;
        let second_axis = if self.is_held(MouseButton::Left) {
            Axis::Y
        } else if self.is_held(MouseButton::Right) {
            Axis::Z
        } else {
            return;
        };

        if dy != 0 {
            out.push(ViewCommand::Rotate { axis: Axis::X, delta: DRAG_FACTOR * dy });
        }
        if dx != 0 {
            out.push(ViewCommand::Rotate { axis: second_axis, delta: DRAG_FACTOR * dx });
        }
    }
}

/// Events that end a drag. They must reach [`Interaction`] even when an
/// overlay consumed them, or a button released over the overlay stays held.
pub fn ends_drag(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::MouseInput { state: ElementState::Released, .. }
            | WindowEvent::CursorLeft { .. }
            | WindowEvent::Focused(false)
    )
}

/// Wheel movement in platform delta units.
fn wheel_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y * WHEEL_UNITS_PER_NOTCH,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
    }
}

fn key_command(key: KeyCode) -> ViewCommand {
    match key {
        KeyCode::Left => ViewCommand::StepFrame(-1),
        KeyCode::Right => ViewCommand::StepFrame(1),
        KeyCode::Home => ViewCommand::FirstFrame,
        KeyCode::End => ViewCommand::LastFrame,
        KeyCode::Escape => ViewCommand::Quit,
    }
}
