//! Companion-device wire protocol.
//!
//! # Responsibility
//! - Decode one JSON command per line (optionally in a `GB(...)` envelope).
//! - Apply notification commands to the store and drive device side effects.
//! - Report every per-command outcome worth telling as a diagnostic line.
//!
//! # Invariants
//! - A bad line produces exactly one error diagnostic and never stops the loop.
//! - Each command performs at most one store mutation.

pub mod command;
pub mod diagnostic;
pub mod dispatcher;
