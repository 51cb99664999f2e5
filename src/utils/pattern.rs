// src/utils/pattern.rs

//! Timestamp pattern resolution.
//!
//! A pattern is a compact `Format-Timezone-Processing` string, e.g.
//! `DateOnly-UTC-slug` or `DateTime-Asia/Seoul-slug`, describing how to turn
//! the current time into a filename fragment.

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

use crate::error::{AppError, Result};

/// Datetime layout component of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeFormat {
    DateTime,
    DateOnly,
    TimeOnly,
    Rfc3339,
    Kitchen,
    Stamp,
    DateTimeSimpleFs,
}

impl DateTimeFormat {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "DateTime" => Ok(Self::DateTime),
            "DateOnly" => Ok(Self::DateOnly),
            "TimeOnly" => Ok(Self::TimeOnly),
            "RFC3339" => Ok(Self::Rfc3339),
            "Kitchen" => Ok(Self::Kitchen),
            "Stamp" => Ok(Self::Stamp),
            "DATETIME_SIMPLE_FS" => Ok(Self::DateTimeSimpleFs),
            other => Err(AppError::UnsupportedDateTimeFormat(other.to_string())),
        }
    }

    /// strftime layout for everything except RFC3339, which needs the
    /// Z-for-zero-offset rendering chrono only exposes through `to_rfc3339`.
    fn layout(&self) -> Option<&'static str> {
        match self {
            Self::DateTime => Some("%Y-%m-%d %H:%M:%S"),
            Self::DateOnly => Some("%Y-%m-%d"),
            Self::TimeOnly => Some("%H:%M:%S"),
            Self::Rfc3339 => None,
            Self::Kitchen => Some("%-I:%M%p"),
            Self::Stamp => Some("%b %e %H:%M:%S"),
            Self::DateTimeSimpleFs => Some("%Y-%m-%d %H%M"),
        }
    }
}

/// Timezone component of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Utc,
    Named(Tz),
}

impl Zone {
    fn parse(s: &str) -> Result<Self> {
        if s == "UTC" {
            return Ok(Self::Utc);
        }
        // Only region/city identifiers are accepted. Bare abbreviations like
        // EST or JST are ambiguous and rejected even where the tz database
        // carries a legacy entry for them.
        if !s.contains('/') {
            return Err(AppError::UnknownTimezone(s.to_string()));
        }
        s.parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| AppError::UnknownTimezone(s.to_string()))
    }
}

/// Post-formatting processing component of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Processing {
    /// Replace every `:` with `-`. Nothing else: no lowercasing, no space
    /// substitution, no timezone suffix.
    Slug,
    /// Pass the formatted string through unchanged.
    None,
}

impl Processing {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "slug" => Ok(Self::Slug),
            "none" => Ok(Self::None),
            other => Err(AppError::UnsupportedProcessing(other.to_string())),
        }
    }

    fn apply(&self, formatted: String) -> String {
        match self {
            Self::Slug => formatted.replace(':', "-"),
            Self::None => formatted,
        }
    }
}

/// Decoded form of a pattern string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSpec {
    pub format: DateTimeFormat,
    pub zone: Zone,
    pub processing: Processing,
}

impl PatternSpec {
    /// Parse a `Format-Timezone-Processing` pattern string.
    pub fn parse(pattern: &str) -> Result<Self> {
        let parts: Vec<&str> = pattern.split('-').collect();
        if parts.len() != 3 {
            return Err(AppError::InvalidPattern {
                pattern: pattern.to_string(),
            });
        }

        Ok(Self {
            format: DateTimeFormat::parse(parts[0])?,
            zone: Zone::parse(parts[1])?,
            processing: Processing::parse(parts[2])?,
        })
    }

    /// Resolve the pattern against a fixed timestamp.
    pub fn resolve_at(&self, now: DateTime<Utc>) -> String {
        let zoned = match self.zone {
            Zone::Utc => now.fixed_offset(),
            Zone::Named(tz) => now.with_timezone(&tz).fixed_offset(),
        };

        let formatted = match self.format.layout() {
            Some(layout) => zoned.format(layout).to_string(),
            None => zoned.to_rfc3339_opts(SecondsFormat::Secs, true),
        };

        self.processing.apply(formatted)
    }
}

/// Resolve a pattern string against the current wall-clock time.
pub fn resolve(pattern: &str) -> Result<String> {
    Ok(PatternSpec::parse(pattern)?.resolve_at(Utc::now()))
}

/// Validate a pattern string without resolving it.
pub fn validate(pattern: &str) -> Result<()> {
    PatternSpec::parse(pattern).map(|_| ())
}
