//! Common infrastructure for the Vellum editing engine.
//!
//! This crate provides shared infrastructure used by all editing components:
//! - **Warning System** - deduplicated colored terminal output for
//!   malformed content and skipped features

pub mod warning;
