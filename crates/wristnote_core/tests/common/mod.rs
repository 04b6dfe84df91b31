#![allow(dead_code)]

use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use wristnote_core::{
    Canvas, DeviceHandles, Haptics, Icon, MusicSink, Rect, ScrollIndicator, SystemScheduler,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    Pulse(u32),
    PinLevel(bool),
    Wake,
    SwitchToNotifier,
    NavigateBack,
    RequestTick(u32),
    CancelTick,
    MusicState(Value),
    MusicInfo(Value),
}

/// Haptics, scheduler and music sink that record every call in order.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    events: Mutex<Vec<DeviceEvent>>,
    sleep_pending: AtomicBool,
}

impl RecordingDevice {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn handles(self: &Arc<Self>) -> DeviceHandles {
        DeviceHandles::new(self.clone(), self.clone(), self.clone())
    }

    pub fn set_sleep_pending(&self, pending: bool) {
        self.sleep_pending.store(pending, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<DeviceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&DeviceEvent) -> bool) -> usize {
        self.events().iter().filter(|event| predicate(event)).count()
    }

    pub fn pulses(&self) -> usize {
        self.count(|event| matches!(event, DeviceEvent::Pulse(_)))
    }

    pub fn reset(&self) {
        self.events.lock().unwrap().clear();
    }

    fn record(&self, event: DeviceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Haptics for RecordingDevice {
    fn pulse(&self, duration_ms: u32) {
        self.record(DeviceEvent::Pulse(duration_ms));
    }

    fn set_pin_level(&self, level: bool) {
        self.record(DeviceEvent::PinLevel(level));
    }
}

impl SystemScheduler for RecordingDevice {
    fn sleep_pending(&self) -> bool {
        self.sleep_pending.load(Ordering::SeqCst)
    }

    fn wake(&self) {
        self.record(DeviceEvent::Wake);
    }

    fn switch_to_notifier(&self) {
        self.record(DeviceEvent::SwitchToNotifier);
    }

    fn navigate_back(&self) {
        self.record(DeviceEvent::NavigateBack);
    }

    fn request_tick(&self, period_ms: u32) {
        self.record(DeviceEvent::RequestTick(period_ms));
    }

    fn cancel_tick(&self) {
        self.record(DeviceEvent::CancelTick);
    }
}

impl MusicSink for RecordingDevice {
    fn update_state(&self, state: &Map<String, Value>) {
        self.record(DeviceEvent::MusicState(Value::Object(state.clone())));
    }

    fn update_info(&self, info: &Map<String, Value>) {
        self.record(DeviceEvent::MusicInfo(Value::Object(info.clone())));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Mute(bool),
    Fill(u16),
    Text {
        text: String,
        x: i32,
        y: i32,
        width: Option<u32>,
    },
    Blit(Icon, i32, i32),
    Button(String, Rect),
    Scroll(ScrollIndicator),
}

/// Canvas that keeps every draw call.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// `(text, y)` for every text draw, in order.
    pub fn texts(&self) -> Vec<(String, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, y, .. } => Some((text.clone(), *y)),
                _ => None,
            })
            .collect()
    }

    pub fn last_scroll(&self) -> Option<ScrollIndicator> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::Scroll(indicator) => Some(*indicator),
            _ => None,
        })
    }

    pub fn has_button(&self, label: &str) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, DrawOp::Button(text, _) if text == label))
    }
}

impl Canvas for RecordingCanvas {
    fn mute(&mut self, muted: bool) {
        self.ops.push(DrawOp::Mute(muted));
    }

    fn fill(&mut self, color: u16) {
        self.ops.push(DrawOp::Fill(color));
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, width: Option<u32>) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            width,
        });
    }

    fn blit(&mut self, icon: Icon, x: i32, y: i32) {
        self.ops.push(DrawOp::Blit(icon, x, y));
    }

    fn draw_button(&mut self, label: &str, bounds: Rect) {
        self.ops.push(DrawOp::Button(label.to_string(), bounds));
    }

    fn draw_scroll_indicator(&mut self, indicator: ScrollIndicator) {
        self.ops.push(DrawOp::Scroll(indicator));
    }
}

/// Numbered words, e.g. `w00 w01 ...`, long enough to span several pages.
pub fn numbered_words(count: usize) -> String {
    (0..count)
        .map(|index| format!("w{index:02}"))
        .collect::<Vec<_>>()
        .join(" ")
}
