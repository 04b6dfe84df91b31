//! Console stand-ins for the watch hardware.
//!
//! Every device action is logged; the canvas prints the text it is asked to
//! draw so a paged notification can be inspected from a terminal.

use log::info;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use wristnote_core::{Canvas, Haptics, Icon, MusicSink, Rect, ScrollIndicator, SystemScheduler};

#[derive(Debug, Default)]
pub struct ConsoleHaptics;

impl Haptics for ConsoleHaptics {
    fn pulse(&self, duration_ms: u32) {
        info!("event=haptic_pulse module=cli status=ok duration_ms={duration_ms}");
    }

    fn set_pin_level(&self, level: bool) {
        info!("event=motor_pin module=cli status=ok level={level}");
    }
}

/// Scheduler that remembers whether the notifier was asked for.
#[derive(Debug, Default)]
pub struct ConsoleScheduler {
    switch_requested: AtomicBool,
}

impl ConsoleScheduler {
    /// Returns and clears the pending switch request.
    pub fn take_switch_request(&self) -> bool {
        self.switch_requested.swap(false, Ordering::SeqCst)
    }
}

impl SystemScheduler for ConsoleScheduler {
    fn sleep_pending(&self) -> bool {
        false
    }

    fn wake(&self) {
        info!("event=wake module=cli status=ok");
    }

    fn switch_to_notifier(&self) {
        info!("event=switch_app module=cli status=ok target=notifier");
        self.switch_requested.store(true, Ordering::SeqCst);
    }

    fn navigate_back(&self) {
        info!("event=navigate_back module=cli status=ok");
    }

    fn request_tick(&self, period_ms: u32) {
        info!("event=tick_requested module=cli status=ok period_ms={period_ms}");
    }

    fn cancel_tick(&self) {
        info!("event=tick_cancelled module=cli status=ok");
    }
}

#[derive(Debug, Default)]
pub struct ConsoleMusic;

impl MusicSink for ConsoleMusic {
    fn update_state(&self, state: &Map<String, Value>) {
        info!(
            "event=music_state module=cli status=ok state={}",
            Value::Object(state.clone())
        );
    }

    fn update_info(&self, info: &Map<String, Value>) {
        info!(
            "event=music_info module=cli status=ok info={}",
            Value::Object(info.clone())
        );
    }
}

/// Prints drawn text to stderr, one `y: text` row per call.
#[derive(Debug, Default)]
pub struct TextCanvas {
    muted: bool,
}

impl Canvas for TextCanvas {
    fn mute(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn fill(&mut self, _color: u16) {
        eprintln!("---");
    }

    fn draw_text(&mut self, text: &str, _x: i32, y: i32, _width: Option<u32>) {
        eprintln!("{y:>3}: {text}");
    }

    fn blit(&mut self, icon: Icon, x: i32, y: i32) {
        eprintln!("{y:>3}: [{icon:?} @ {x}]");
    }

    fn draw_button(&mut self, label: &str, bounds: Rect) {
        eprintln!("{:>3}: [ {label} ] @ {}", bounds.y, bounds.x);
    }

    fn draw_scroll_indicator(&mut self, indicator: ScrollIndicator) {
        let up = if indicator.up { "^" } else { " " };
        let down = if indicator.down { "v" } else { " " };
        eprintln!("     {up}{down}");
    }
}
