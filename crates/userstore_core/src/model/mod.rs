//! Domain model for userstore.
//!
//! # Invariants
//! - A `User` is either built by the caller or filled from exactly one row.

pub mod user;
