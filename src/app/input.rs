//! Platform-agnostic input state
//!
//! Input types and the per-frame state container do not depend on any GUI
//! library. Platform adapters (e.g. the winit adapter) translate their native
//! events into these types via the `inject_*` API; viewer logic only reads.

use glam::Vec2;
use std::collections::HashSet;

/// Keyboard key enumeration (platform-agnostic)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    // Letter keys
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Number keys
    Key0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,

    // Control keys
    Space,
    Enter,
    Escape,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// Mouse button enumeration
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Button state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Platform-agnostic input state container
#[derive(Debug, Clone)]
pub struct Input {
    // Keyboard state
    pressed_keys: HashSet<Key>,
    just_pressed_keys: HashSet<Key>,
    just_released_keys: HashSet<Key>,

    // Mouse button state
    pressed_mouse: HashSet<MouseButton>,
    just_pressed_mouse: HashSet<MouseButton>,
    just_released_mouse: HashSet<MouseButton>,

    // Mouse position and movement; None until the first cursor event lands
    cursor_position: Option<Vec2>,
    cursor_delta: Vec2,
    scroll_delta: Vec2,

    // Window state
    pub screen_size: Vec2,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            just_pressed_keys: HashSet::new(),
            just_released_keys: HashSet::new(),
            pressed_mouse: HashSet::new(),
            just_pressed_mouse: HashSet::new(),
            just_released_mouse: HashSet::new(),
            cursor_position: None,
            cursor_delta: Vec2::ZERO,
            scroll_delta: Vec2::ZERO,
            screen_size: Vec2::ZERO,
        }
    }

    // ========== System API (called by the adapter) ==========

    /// Clears transient state at the start of each frame (JustPressed/JustReleased/Delta)
    pub fn start_frame(&mut self) {
        self.just_pressed_keys.clear();
        self.just_released_keys.clear();
        self.just_pressed_mouse.clear();
        self.just_released_mouse.clear();
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    /// Injects a keyboard event
    pub fn inject_key(&mut self, key: Key, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                if self.pressed_keys.insert(key) {
                    self.just_pressed_keys.insert(key);
                }
            }
            ButtonState::Released => {
                if self.pressed_keys.remove(&key) {
                    self.just_released_keys.insert(key);
                }
            }
        }
    }

    /// Injects a mouse button event
    pub fn inject_mouse_button(&mut self, button: MouseButton, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                if self.pressed_mouse.insert(button) {
                    self.just_pressed_mouse.insert(button);
                }
            }
            ButtonState::Released => {
                if self.pressed_mouse.remove(&button) {
                    self.just_released_mouse.insert(button);
                }
            }
        }
    }

    /// Injects a cursor position update (pixels, top-left origin)
    ///
    /// The first sample only establishes the position; deltas start
    /// accumulating from the second sample on.
    pub fn inject_cursor_position(&mut self, x: f32, y: f32) {
        let new_pos = Vec2::new(x, y);
        if let Some(prev) = self.cursor_position {
            self.cursor_delta += new_pos - prev;
        }
        self.cursor_position = Some(new_pos);
    }

    /// Injects a scroll wheel event
    pub fn inject_scroll(&mut self, delta_x: f32, delta_y: f32) {
        self.scroll_delta += Vec2::new(delta_x, delta_y);
    }

    /// Injects a window resize event
    pub fn inject_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    // ========== User API (viewer logic queries) ==========

    /// Checks whether a key is currently held down
    #[must_use]
    pub fn get_key(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Checks whether a key was just pressed this frame
    #[must_use]
    pub fn get_key_down(&self, key: Key) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    /// Checks whether a key was just released this frame
    #[must_use]
    pub fn get_key_up(&self, key: Key) -> bool {
        self.just_released_keys.contains(&key)
    }

    /// Checks whether a mouse button is currently held down
    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_mouse.contains(&button)
    }

    /// Checks whether a mouse button was just pressed this frame
    #[must_use]
    pub fn get_mouse_button_down(&self, button: MouseButton) -> bool {
        self.just_pressed_mouse.contains(&button)
    }

    /// Checks whether a mouse button was just released this frame
    #[must_use]
    pub fn get_mouse_button_up(&self, button: MouseButton) -> bool {
        self.just_released_mouse.contains(&button)
    }

    /// Returns the current cursor position (zero before the first event)
    #[must_use]
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position.unwrap_or(Vec2::ZERO)
    }

    /// Returns the cursor movement delta for this frame
    #[must_use]
    pub fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    /// Returns the scroll wheel delta for this frame
    #[must_use]
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn just_pressed_lasts_one_frame() {
        let mut input = Input::new();
        input.inject_key(Key::R, ButtonState::Pressed);
        assert!(input.get_key_down(Key::R));
        assert!(input.get_key(Key::R));

        input.start_frame();
        assert!(!input.get_key_down(Key::R));
        assert!(input.get_key(Key::R), "held state persists across frames");

        input.inject_key(Key::R, ButtonState::Released);
        assert!(input.get_key_up(Key::R));
        assert!(!input.get_key(Key::R));
    }

    #[test]
    fn repeated_press_events_do_not_retrigger() {
        let mut input = Input::new();
        input.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
        input.start_frame();
        // OS key-repeat style duplicate press
        input.inject_mouse_button(MouseButton::Left, ButtonState::Pressed);
        assert!(!input.get_mouse_button_down(MouseButton::Left));
        assert!(input.is_button_pressed(MouseButton::Left));
    }

    #[test]
    fn cursor_origin_is_a_valid_first_sample() {
        let mut input = Input::new();
        // A genuine event at pixel (0, 0) must not be mistaken for
        // "no previous sample"
        input.inject_cursor_position(0.0, 0.0);
        assert_eq!(input.cursor_delta(), Vec2::ZERO);

        input.inject_cursor_position(5.0, 3.0);
        assert_eq!(input.cursor_delta(), Vec2::new(5.0, 3.0));
    }

    #[test]
    fn deltas_accumulate_within_a_frame_and_reset() {
        let mut input = Input::new();
        input.inject_cursor_position(10.0, 10.0);
        input.inject_cursor_position(15.0, 12.0);
        input.inject_scroll(0.0, 1.0);
        input.inject_scroll(0.0, 0.5);

        assert_eq!(input.cursor_delta(), Vec2::new(5.0, 2.0));
        assert_eq!(input.scroll_delta(), Vec2::new(0.0, 1.5));

        input.start_frame();
        assert_eq!(input.cursor_delta(), Vec2::ZERO);
        assert_eq!(input.scroll_delta(), Vec2::ZERO);
    }
}
