// src/pipeline/process.rs

//! Per-target processing.
//!
//! One target moves through: path resolution, header parsing, fetch,
//! optional JSON formatting, the primary write, and an optional latest-copy
//! write. Formatting and latest-write failures are non-fatal; everything
//! else aborts the target.

use crate::error::Result;
use crate::logging::Logger;
use crate::models::Target;
use crate::services::{format_payload, Fetcher, JsonFormat};
use crate::storage;
use crate::utils::headers::parse_headers;
use crate::utils::path::{derive_latest_path, resolve_path};

/// Options shared by every target in a run.
#[derive(Debug, Clone, Copy)]
pub struct ProcessOptions {
    pub json_format: JsonFormat,
    pub latest: bool,
}

/// Process a single target, returning its resolved path on success.
pub async fn process_target(
    target: &Target,
    fetcher: &Fetcher,
    options: &ProcessOptions,
    logger: &Logger,
) -> Result<String> {
    let resolved_path = resolve_path(&target.path)?;
    logger.info(&format!(
        "Processing target {} ({}) -> {}",
        target.name, target.url, resolved_path
    ));

    let headers = parse_headers(&target.headers)?;
    if !headers.is_empty() {
        logger.info(&format!("Set {} custom header(s)", headers.len()));
    }

    let outcome = fetcher.fetch(&target.url, &headers, logger).await?;
    logger.info(&format!("Fetched {} bytes", outcome.body.len()));

    let bytes = match format_payload(
        &outcome.body,
        options.json_format,
        &resolved_path,
        options.latest,
        logger,
    )
    .await
    {
        Ok(formatted) => {
            if let Some(note) = formatted.note {
                logger.info(&format!("Formatted JSON: {}", note));
            }
            formatted.bytes
        }
        Err(error) => {
            logger.warn(&format!(
                "Could not format JSON for {}, writing original content: {}",
                resolved_path, error
            ));
            outcome.body
        }
    };

    storage::write_with_dirs(&resolved_path, &bytes).await?;
    logger.info(&format!("Wrote {}", resolved_path));

    if options.latest {
        let latest_path = derive_latest_path(&resolved_path);
        match storage::write_with_dirs(&latest_path, &bytes).await {
            Ok(()) => logger.info(&format!("Wrote latest copy {}", latest_path.display())),
            Err(error) => logger.warn(&format!(
                "Failed to write latest file {}: {}",
                latest_path.display(),
                error
            )),
        }
    }

    Ok(resolved_path)
}
