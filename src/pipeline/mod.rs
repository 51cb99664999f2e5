// src/pipeline/mod.rs

//! Pipeline entry points.
//!
//! - `process_target`: one target through resolve, fetch, format, write
//! - `run_targets`: the sequential driver over all configured targets

mod process;
mod run;

pub use process::{process_target, ProcessOptions};
pub use run::{run_targets, RunSummary, Sleep, TokioSleep};
