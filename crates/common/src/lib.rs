//! Shared types for the souq marketplace.

mod types;

pub use types::{EntityId, UserId};
