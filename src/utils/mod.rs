// src/utils/mod.rs

//! Utility functions and helpers.

pub mod headers;
pub mod path;
pub mod pattern;
