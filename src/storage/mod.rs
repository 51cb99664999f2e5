// src/storage/mod.rs

//! Storage for fetched payloads.
//!
//! Targets write directly to the paths their specs resolve to; there is no
//! storage root or cross-run state beyond the files themselves.

mod local;

pub use local::write_with_dirs;
