// src/utils/path.rs

//! Target path resolution and derived sibling paths.

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::PathSpec;
use crate::utils::pattern::PatternSpec;

/// Resolve a path spec against the current wall-clock time.
pub fn resolve_path(spec: &PathSpec) -> Result<String> {
    resolve_path_at(spec, Utc::now())
}

/// Resolve a path spec against a fixed timestamp.
///
/// Literal paths are returned unchanged. Templated paths resolve their
/// pattern and substitute it for every `{pattern}` occurrence.
pub fn resolve_path_at(spec: &PathSpec, now: DateTime<Utc>) -> Result<String> {
    match spec {
        PathSpec::Literal(path) => {
            if path.is_empty() {
                return Err(AppError::EmptyPath);
            }
            Ok(path.clone())
        }
        PathSpec::Templated { template, pattern } => {
            if template.is_empty() {
                return Err(AppError::EmptyPath);
            }
            if !template.contains("{pattern}") {
                return Err(AppError::MissingPlaceholder);
            }
            let value = PatternSpec::parse(pattern)?.resolve_at(now);
            Ok(template.replace("{pattern}", &value))
        }
    }
}

/// Compute the rolling "latest" sibling for a resolved path.
///
/// All targets sharing a directory and extension pattern collapse onto the
/// same filename; the latest file is a single rolling pointer.
pub fn derive_latest_path(resolved_path: &str) -> PathBuf {
    let path = Path::new(resolved_path);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let latest_name = if file_name.contains(".pp.json") {
        "latest.pp.json".to_string()
    } else if file_name.ends_with(".json") {
        "latest.json".to_string()
    } else {
        match path.extension() {
            Some(ext) => format!("latest.{}", ext.to_string_lossy()),
            None => "latest".to_string(),
        }
    };

    clean_dir(path.parent().unwrap_or(Path::new(""))).join(latest_name)
}

/// Derive the pretty-printed sibling path for a `.json` target.
pub fn pretty_sibling_path(target_path: &str) -> String {
    let stem = target_path.strip_suffix(".json").unwrap_or(target_path);
    format!("{stem}.pp.json")
}

/// Drop `.` components so derived paths come out normalized.
fn clean_dir(dir: &Path) -> PathBuf {
    dir.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
