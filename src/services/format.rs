// src/services/format.rs

//! JSON reformatting for `.json` targets.

use clap::ValueEnum;
use serde_json::Value;

use crate::error::Result;
use crate::logging::Logger;
use crate::storage;
use crate::utils::path::{derive_latest_path, pretty_sibling_path};

/// JSON output style for `.json` targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JsonFormat {
    /// Write the response body untouched
    Original,
    /// Re-serialize with 2-space indentation
    Pretty,
    /// Re-serialize without extraneous whitespace
    Minimized,
    /// Minimized at the target path, pretty at a `.pp.json` sibling
    Both,
}

/// Formatted payload plus a log note describing what was done.
#[derive(Debug)]
pub struct Formatted {
    pub bytes: Vec<u8>,
    pub note: Option<&'static str>,
}

impl Formatted {
    fn passthrough(body: &[u8]) -> Self {
        Self {
            bytes: body.to_vec(),
            note: None,
        }
    }
}

/// Reformat a response body according to the requested style.
///
/// Only applies when the target path ends in `.json` (case-insensitive) and
/// the style is not `original`. An unparseable body is a recoverable error;
/// the caller logs it and writes the original bytes. In `both` mode the
/// pretty sibling (and its latest copy, when requested) is written here as
/// a side effect; a failed sibling write is a warning only and the
/// minimized primary result stands.
pub async fn format_payload(
    body: &[u8],
    format: JsonFormat,
    target_path: &str,
    latest: bool,
    logger: &Logger,
) -> Result<Formatted> {
    if format == JsonFormat::Original || !target_path.to_lowercase().ends_with(".json") {
        return Ok(Formatted::passthrough(body));
    }

    let value: Value = serde_json::from_slice(body)?;

    match format {
        JsonFormat::Original => Ok(Formatted::passthrough(body)),
        JsonFormat::Pretty => Ok(Formatted {
            bytes: serde_json::to_vec_pretty(&value)?,
            note: Some("pretty-printed"),
        }),
        JsonFormat::Minimized => Ok(Formatted {
            bytes: serde_json::to_vec(&value)?,
            note: Some("minimized"),
        }),
        JsonFormat::Both => {
            let minimized = serde_json::to_vec(&value)?;
            let pretty = serde_json::to_vec_pretty(&value)?;

            let pretty_path = pretty_sibling_path(target_path);
            match storage::write_with_dirs(&pretty_path, &pretty).await {
                Ok(()) => {
                    logger.info(&format!("Wrote pretty-printed version to {}", pretty_path));
                    if latest {
                        let latest_pretty = derive_latest_path(&pretty_path);
                        if let Err(error) =
                            storage::write_with_dirs(&latest_pretty, &pretty).await
                        {
                            logger.warn(&format!(
                                "Failed to write latest pretty file {}: {}",
                                latest_pretty.display(),
                                error
                            ));
                        }
                    }
                }
                Err(error) => {
                    logger.warn(&format!(
                        "Failed to write pretty file {}: {}",
                        pretty_path, error
                    ));
                }
            }

            Ok(Formatted {
                bytes: minimized,
                note: Some("minimized (with pretty version)"),
            })
        }
    }
}
