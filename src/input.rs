use winit::event::{ElementState, KeyboardInput, ModifiersState, MouseButton, VirtualKeyCode, WindowEvent};

/// What a primary-button press asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressGesture {
    Paint,
    Erase,
    /// Pick up the color recorded for the cell under the pointer.
    Recall,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    None,
    PointerPressed { x: f64, y: f64, gesture: PressGesture },
    PointerMoved { x: f64, y: f64 },
    PointerReleased,
    PointerLeft,
    ToggleGuide,
    RequestClear,
    Confirm,
    Cancel,
    ResizeBy(i32, i32),
    SelectPalette(usize),
    /// A key press with no binding of its own.
    OtherKey,
}

/// Turns window events into editor actions, tracking the pointer position and
/// modifier keys between events.
pub struct InputHandler {
    cursor: Option<(f64, f64)>,
    modifiers: ModifiersState,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            cursor: None,
            modifiers: ModifiersState::empty(),
        }
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent<'_>) -> InputAction {
        match event {
            WindowEvent::CursorMoved { position, .. } => self.handle_cursor_moved(position.x, position.y),
            WindowEvent::CursorLeft { .. } => self.handle_cursor_left(),
            WindowEvent::MouseInput { state, button, .. } => self.handle_mouse_button(*state, *button),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.set_modifiers(*modifiers);
                InputAction::None
            }
            // a release outside the window is never delivered
            WindowEvent::Focused(false) => InputAction::PointerReleased,
            WindowEvent::KeyboardInput { input, .. } => self.handle_keyboard_input(input),
            _ => InputAction::None,
        }
    }

    pub fn handle_cursor_moved(&mut self, x: f64, y: f64) -> InputAction {
        self.cursor = Some((x, y));
        InputAction::PointerMoved { x, y }
    }

    pub fn handle_cursor_left(&mut self) -> InputAction {
        self.cursor = None;
        InputAction::PointerLeft
    }

    pub fn handle_mouse_button(&mut self, state: ElementState, button: MouseButton) -> InputAction {
        if button != MouseButton::Left {
            return InputAction::None;
        }

        match state {
            ElementState::Pressed => {
                let Some((x, y)) = self.cursor else {
                    return InputAction::None;
                };
                InputAction::PointerPressed {
                    x,
                    y,
                    gesture: self.press_gesture(),
                }
            }
            ElementState::Released => InputAction::PointerReleased,
        }
    }

    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    fn press_gesture(&self) -> PressGesture {
        if self.modifiers.ctrl() || self.modifiers.logo() {
            PressGesture::Recall
        } else if self.modifiers.shift() {
            PressGesture::Erase
        } else {
            PressGesture::Paint
        }
    }

    pub fn handle_keyboard_input(&mut self, input: &KeyboardInput) -> InputAction {
        match (input.state, input.virtual_keycode) {
            (ElementState::Pressed, Some(key_code)) => self.handle_key_press(key_code),
            _ => InputAction::None,
        }
    }

    pub fn handle_key_press(&mut self, key_code: VirtualKeyCode) -> InputAction {
        match key_code {
            VirtualKeyCode::G => InputAction::ToggleGuide,
            VirtualKeyCode::C => InputAction::RequestClear,
            VirtualKeyCode::Y | VirtualKeyCode::Return => InputAction::Confirm,
            VirtualKeyCode::N | VirtualKeyCode::Escape => InputAction::Cancel,

            // Dimension selectors: one stitch / one row at a time
            VirtualKeyCode::Right => InputAction::ResizeBy(1, 0),
            VirtualKeyCode::Left => InputAction::ResizeBy(-1, 0),
            VirtualKeyCode::Down => InputAction::ResizeBy(0, 1),
            VirtualKeyCode::Up => InputAction::ResizeBy(0, -1),

            // Modifiers on their own are not a key press
            VirtualKeyCode::LShift
            | VirtualKeyCode::RShift
            | VirtualKeyCode::LControl
            | VirtualKeyCode::RControl
            | VirtualKeyCode::LAlt
            | VirtualKeyCode::RAlt
            | VirtualKeyCode::LWin
            | VirtualKeyCode::RWin => InputAction::None,

            _ => match Self::palette_slot(key_code) {
                Some(slot) => InputAction::SelectPalette(slot),
                None => InputAction::OtherKey,
            },
        }
    }

    fn palette_slot(key_code: VirtualKeyCode) -> Option<usize> {
        let slot = match key_code {
            VirtualKeyCode::Key1 | VirtualKeyCode::Numpad1 => 0,
            VirtualKeyCode::Key2 | VirtualKeyCode::Numpad2 => 1,
            VirtualKeyCode::Key3 | VirtualKeyCode::Numpad3 => 2,
            VirtualKeyCode::Key4 | VirtualKeyCode::Numpad4 => 3,
            VirtualKeyCode::Key5 | VirtualKeyCode::Numpad5 => 4,
            VirtualKeyCode::Key6 | VirtualKeyCode::Numpad6 => 5,
            VirtualKeyCode::Key7 | VirtualKeyCode::Numpad7 => 6,
            VirtualKeyCode::Key8 | VirtualKeyCode::Numpad8 => 7,
            VirtualKeyCode::Key9 | VirtualKeyCode::Numpad9 => 8,
            _ => return None,
        };
        Some(slot)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
