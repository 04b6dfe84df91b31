//! Foreground applications built on the text pager.
//!
//! # Responsibility
//! - Translate swipe/touch input into pager navigation and store mutations.
//! - Own per-app side effects (ringing tick, haptic feedback, navigation).
//!
//! # Invariants
//! - Apps keep no pagination state while backgrounded.
//! - Leaving the notification view always cancels its ringing tick.

pub mod confirmation;
pub mod notification_app;
pub mod pager_app;
