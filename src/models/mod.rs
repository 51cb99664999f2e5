// src/models/mod.rs

//! Domain models for the fetchncache application.

mod config;

pub use config::{Config, PathSpec, Target};
