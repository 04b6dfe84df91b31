//! Modal yes/no prompt.

use crate::display::{Canvas, Rect, TouchPoint, WHITE};

pub const YES_BUTTON: Rect = Rect::new(20, 140, 90, 45);
pub const NO_BUTTON: Rect = Rect::new(130, 140, 90, 45);
const PROMPT_Y: i32 = 60;
const PROMPT_WIDTH_PX: u32 = 240;

/// Yes/no overlay drawn over the current view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmationView {
    active: bool,
    value: bool,
}

impl ConfirmationView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Decision from the last resolving touch; `true` means "yes".
    pub fn value(&self) -> bool {
        self.value
    }

    /// Activates the prompt and draws it over a cleared screen.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, prompt: &str) {
        self.active = true;
        canvas.mute(true);
        canvas.fill(WHITE);
        canvas.draw_text(prompt, 0, PROMPT_Y, Some(PROMPT_WIDTH_PX));
        canvas.draw_button("Yes", YES_BUTTON);
        canvas.draw_button("No", NO_BUTTON);
        canvas.mute(false);
    }

    /// Resolves the prompt when a button is hit.
    ///
    /// Returns `false` (and stays active) for touches outside both buttons or
    /// when the prompt is not showing.
    pub fn touch(&mut self, point: TouchPoint) -> bool {
        if !self.active {
            return false;
        }
        if YES_BUTTON.contains(point) {
            self.value = true;
        } else if NO_BUTTON.contains(point) {
            self.value = false;
        } else {
            return false;
        }
        self.active = false;
        true
    }

    pub fn dismiss(&mut self) {
        self.active = false;
    }
}
