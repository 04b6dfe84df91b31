//! Display driver boundary.
//!
//! Pixel drawing, fonts and icon decoding live behind [`Canvas`]; this crate
//! only decides what goes where.

/// 16-bit RGB565 white.
pub const WHITE: u16 = 0xFFFF;

/// Icons the pipeline asks the driver to blit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: TouchPoint) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Swipe gesture reported by the touch controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: i32,
    pub y: i32,
}

impl TouchPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Arrow hints drawn at the screen edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollIndicator {
    pub up: bool,
    pub down: bool,
}

/// Drawing surface supplied by the display driver.
pub trait Canvas {
    /// Suppresses (or restores) panel output while a frame is composed.
    fn mute(&mut self, muted: bool);
    fn fill(&mut self, color: u16);
    /// Draws one line of text; `width` centres it inside that many pixels.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, width: Option<u32>);
    fn blit(&mut self, icon: Icon, x: i32, y: i32);
    fn draw_button(&mut self, label: &str, bounds: Rect);
    fn draw_scroll_indicator(&mut self, indicator: ScrollIndicator);
}
