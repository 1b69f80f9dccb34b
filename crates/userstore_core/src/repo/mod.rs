//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the narrow record store capability repositories depend on.
//! - Keep SQL text and row mapping inside the repository boundary.
//!
//! # Invariants
//! - Repositories borrow the store; they never open or close it.
//! - Store failures reach the caller unchanged.

pub mod store;
pub mod user_repo;
