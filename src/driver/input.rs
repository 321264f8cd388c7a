use std::cell::Cell;
use std::rc::Rc;

use crate::driver::letterbox::Letterbox;
use crate::foundation::core::Vector2f;

/// Per-frame state of one mouse button.
///
/// `update` is called with the raw pressed flag once per frame; the edge flags describe the
/// transition since the previous update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseButtonState {
    down: bool,
    was_down: bool,
    just_pressed: bool,
    just_released: bool,
}

impl MouseButtonState {
    pub fn update(&mut self, pressed: bool) {
        self.down = pressed;
        self.just_pressed = pressed && !self.was_down;
        self.just_released = !pressed && self.was_down;
        self.was_down = pressed;
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Went down since the previous update.
    pub fn is_pressed(&self) -> bool {
        self.just_pressed
    }

    /// Went up since the previous update.
    pub fn is_released(&self) -> bool {
        self.just_released
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// DOM-style button index (0 left, 1 middle, 2 right).
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Pointer position in backing-store pixels and in virtual-resolution units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub real: Vector2f,
    pub virtual_pos: Vector2f,
}

impl Pointer {
    /// Position reported while the pointer is outside the canvas.
    pub const OUTSIDE: Vector2f = Vector2f::new(-1.0, -1.0);
}

impl Default for Pointer {
    fn default() -> Self {
        Self {
            real: Self::OUTSIDE,
            virtual_pos: Self::OUTSIDE,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub pointer: Pointer,
    pub left: MouseButtonState,
    pub middle: MouseButtonState,
    pub right: MouseButtonState,
    held: [bool; 3],
}

impl InputState {
    pub fn button(&self, button: MouseButton) -> &MouseButtonState {
        match button {
            MouseButton::Left => &self.left,
            MouseButton::Middle => &self.middle,
            MouseButton::Right => &self.right,
        }
    }

    fn button_mut(&mut self, button: MouseButton) -> &mut MouseButtonState {
        match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Middle => &mut self.middle,
            MouseButton::Right => &mut self.right,
        }
    }

    /// Pointer moved to `real` (backing-store pixels).
    pub fn pointer_moved(&mut self, real: Vector2f, letterbox: &Letterbox) {
        self.pointer.real = real;
        self.pointer.virtual_pos = letterbox.to_virtual(real);
    }

    /// Pointer left the canvas: positions go to [`Pointer::OUTSIDE`] and every button is released.
    pub fn pointer_left(&mut self) {
        self.pointer = Pointer::default();
        for button in [MouseButton::Left, MouseButton::Middle, MouseButton::Right] {
            self.button_changed(button, false);
        }
    }

    pub fn button_changed(&mut self, button: MouseButton, pressed: bool) {
        self.held[button as usize] = pressed;
        self.button_mut(button).update(pressed);
    }

    /// Called once per frame after the scene ran, so edge flags last exactly one frame.
    pub fn end_frame(&mut self) {
        let held = self.held;
        self.left.update(held[0]);
        self.middle.update(held[1]);
        self.right.update(held[2]);
    }

    /// Whether the virtual pointer is inside the box at `position` with `size` (edges included).
    pub fn mouse_in_rect(&self, position: Vector2f, size: Vector2f) -> bool {
        let p = self.pointer.virtual_pos;
        p.x >= position.x
            && p.x <= position.x + size.x
            && p.y >= position.y
            && p.y <= position.y + size.y
    }
}

/// Read-only view of the driver's input state, handed to scenes.
#[derive(Clone, Debug)]
pub struct InputSource {
    cell: Rc<Cell<InputState>>,
}

impl InputSource {
    pub(crate) fn new(cell: Rc<Cell<InputState>>) -> Self {
        Self { cell }
    }

    /// A source that always reports an idle pointer outside the canvas.
    pub fn detached() -> Self {
        Self::new(Rc::new(Cell::new(InputState::default())))
    }

    pub fn get(&self) -> InputState {
        self.cell.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/input.rs"]
mod tests;
