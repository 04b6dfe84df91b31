//! Notification storage.
//!
//! # Responsibility
//! - Define the store contract used by dispatcher and presentation.
//! - Keep locking and ordering details behind that contract.
//!
//! # Invariants
//! - Store operations are atomic units of work.
//! - Contents are transient and never persisted.

pub mod notification_store;
