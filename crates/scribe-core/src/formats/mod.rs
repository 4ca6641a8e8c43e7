//! # Formats Module
//!
//! Serialization and format handling for store snapshots.
//!
//! This module contains:
//! - Binary snapshot format (postcard + header)
//!
//! Note: File I/O operations remain in the app layer (apps/scribe).
//! This module only handles format conversion (pure transformations).

mod persistence;

pub use persistence::*;
