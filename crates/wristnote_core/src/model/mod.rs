//! Notification domain model.
//!
//! # Responsibility
//! - Define the record shape shared by the dispatcher, store and presentation.
//! - Resolve documented field defaults once, at construction time.
//!
//! # Invariants
//! - Every notification is identified by a caller-assigned `NotificationId`.
//! - Records are immutable once built; updates are remove + insert.

pub mod notification;
