//! # Scribe Core
//!
//! The deterministic post store for Scribe.
//!
//! This crate models one persisted entity, the [`Post`], and the contract of
//! the persistence collaborator that stores it, the [`PostStore`] trait.
//! Capability is granted by composition, not inheritance: callers hold a
//! store value (or a `Box<dyn PostStore>` opened from a [`StoreConfig`]) and
//! pass drafts in, they never subclass anything.
//!
//! Two backends ship with the crate:
//! - [`MemoryStore`] - `BTreeMap`-backed, deterministic, snapshot-friendly
//! - [`RedbStore`] - redb-backed with ACID transactions and crash safety
//!
//! The crate is synchronous and pure: no async, no network, no file paths
//! outside the redb backend. Snapshot I/O for the memory backend lives in
//! the app layer; this crate only encodes and decodes the bytes.

pub mod clock;
pub mod config;
pub mod formats;
pub mod memory;
pub mod post;
pub mod storage;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Backend, ConfigError, Environment, StoreConfig, StoreProfiles};
pub use formats::{FormatError, StoreSnapshot};
pub use memory::MemoryStore;
pub use post::{Post, PostDraft, PostId, Timestamp};
pub use storage::RedbStore;
pub use store::{PostStore, StoreError, ValidationError};
