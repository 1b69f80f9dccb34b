//! User domain model.
//!
//! # Responsibility
//! - Define the caller-owned record exchanged with the user repository.
//!
//! # Invariants
//! - `id` is supplied by the caller and stored literally; the store never
//!   generates it.
//! - Values are never cached by the repository; persistent identity lives in
//!   the store only.

use serde::{Deserialize, Serialize};

/// Caller-supplied identifier, used as the lookup key and as the insert value.
pub type UserId = i64;

/// A user row as seen by the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Free text; length and uniqueness are not checked in this layer.
    pub name: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
