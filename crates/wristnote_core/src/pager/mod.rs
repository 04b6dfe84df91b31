//! Text pagination.
//!
//! # Responsibility
//! - Turn a string plus wrap breakpoints into navigable fixed-size pages.
//! - Delegate page drawing to a pluggable [`text_pager::PageLayout`].
//!
//! # Invariants
//! - The pager holds no layout data while released (app backgrounded).
//! - Degenerate wrap output yields zero pages and never faults.

pub mod text_pager;
pub mod wrap;
