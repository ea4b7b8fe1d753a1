//! Draft checkpoint store for in-progress wizard sessions.
//!
//! The signup wizard spans several navigable pages, so its partially
//! completed data must survive a full reload of the client session. This
//! crate provides that one piece of persistence: a scoped key-value
//! association from a [`DraftKey`] to a serialized [`Draft`].
//!
//! Checkout keeps all of its steps in one in-memory session and does not
//! checkpoint.

pub mod draft;
pub mod error;
pub mod memory;
pub mod store;

pub use draft::{Draft, DraftKey};
pub use error::{DraftStoreError, Result};
pub use memory::InMemoryDraftStore;
pub use store::{DraftStore, DraftStoreExt};
