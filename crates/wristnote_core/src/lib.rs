//! Notification pipeline for a wrist-worn companion display.
//! This crate owns protocol decoding, pending-notification storage and the
//! paginated notification view.

pub mod app;
pub mod config;
pub mod device;
pub mod display;
pub mod logging;
pub mod model;
pub mod pager;
pub mod protocol;
pub mod repo;

pub use app::confirmation::ConfirmationView;
pub use app::notification_app::{
    NotificationApp, NotificationHeader, NotificationLayout, PresentationState, CLEAR_PROMPT,
};
pub use app::pager_app::PagerApp;
pub use config::{ConfigError, ConfigResult, NotifyConfig};
pub use device::{DeviceHandles, Haptics, MusicSink, SystemScheduler, DEFAULT_PULSE_MS};
pub use display::{Canvas, Icon, Rect, ScrollIndicator, SwipeDirection, TouchPoint};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogSink};
pub use model::notification::{
    NotificationId, NotificationRecord, RecordFieldError, CALL_SOURCE, DEFAULT_TITLE,
};
pub use pager::text_pager::{
    PageLayout, PageMetrics, PageView, PagerSignal, PlainTextLayout, TextPager, LINES_PER_PAGE,
    LINE_HEIGHT_PX,
};
pub use pager::wrap::{MonospaceWrap, WrapOracle};
pub use protocol::command::{Command, CommandError, CommandResult, RawCommand};
pub use protocol::diagnostic::{Diagnostic, DiagnosticKind};
pub use protocol::dispatcher::{CommandOutcome, DispatchStats, Dispatcher};
pub use repo::notification_store::{
    MemoryNotificationStore, NotificationStore, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
