// src/services/mod.rs

//! Service layer for the fetchncache application.
//!
//! - HTTP fetching with retries (`Fetcher`)
//! - JSON response reformatting (`format_payload`)

mod fetch;
mod format;

pub use fetch::{FetchOutcome, Fetcher, RetryPolicy};
pub use format::{format_payload, Formatted, JsonFormat};
