//! # Scribe Library
//!
//! This library exposes the Scribe modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;

// Re-export scribe_core for convenience
pub use scribe_core;
