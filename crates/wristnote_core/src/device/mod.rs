//! Device collaborators driven by the notification pipeline.
//!
//! # Responsibility
//! - Describe the haptic, scheduler and music capabilities as traits.
//! - Bundle shared handles so dispatcher and presentation hold the same ones.
//!
//! # Invariants
//! - Implementations use interior mutability; all methods take `&self`.
//! - Handles are `Send + Sync` so command handling may move to its own thread.

use serde_json::{Map, Value};
use std::sync::Arc;

/// Pulse length used for feedback that has no configured duration.
pub const DEFAULT_PULSE_MS: u32 = 40;

/// Vibration motor driver.
pub trait Haptics: Send + Sync {
    fn pulse(&self, duration_ms: u32);
    /// Drives the motor pin directly. The pin is active-low.
    fn set_pin_level(&self, level: bool);
}

/// System scheduler: foreground app, display power and the periodic tick.
pub trait SystemScheduler: Send + Sync {
    /// Whether a sleep window is pending; wake requests are suppressed then.
    fn sleep_pending(&self) -> bool;
    fn wake(&self);
    /// Makes the notification application the foreground app.
    fn switch_to_notifier(&self);
    /// Returns to the previously foregrounded app.
    fn navigate_back(&self);
    fn request_tick(&self, period_ms: u32);
    fn cancel_tick(&self);
}

/// Music player subsystem. Payloads are forwarded without interpretation.
pub trait MusicSink: Send + Sync {
    fn update_state(&self, state: &Map<String, Value>);
    fn update_info(&self, info: &Map<String, Value>);
}

/// Shared collaborator handles.
#[derive(Clone)]
pub struct DeviceHandles {
    pub haptics: Arc<dyn Haptics>,
    pub scheduler: Arc<dyn SystemScheduler>,
    pub music: Arc<dyn MusicSink>,
}

impl DeviceHandles {
    pub fn new(
        haptics: Arc<dyn Haptics>,
        scheduler: Arc<dyn SystemScheduler>,
        music: Arc<dyn MusicSink>,
    ) -> Self {
        Self {
            haptics,
            scheduler,
            music,
        }
    }

    /// Wakes the display and foregrounds the notifier unless sleep is pending.
    ///
    /// Returns whether the switch was requested.
    pub fn present_notifications(&self) -> bool {
        if self.scheduler.sleep_pending() {
            return false;
        }
        self.scheduler.wake();
        self.scheduler.switch_to_notifier();
        true
    }
}
