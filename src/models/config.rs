// src/models/config.rs

//! Run configuration structures.
//!
//! The YAML configuration carries an optional log file path and an ordered
//! list of fetch targets. It is decoded once at startup and immutable for
//! the remainder of the run.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::utils::{headers, pattern};

/// Root run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Log file for warning/error output (stderr when unset)
    #[serde(default)]
    pub logfile: Option<String>,

    /// Fetch targets, processed in order
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Config {
    /// Load and validate configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            AppError::config(format!(
                "reading config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all targets, reporting the 1-based index of the offender.
    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(AppError::config("no targets specified in config"));
        }

        for (index, target) in self.targets.iter().enumerate() {
            target
                .validate()
                .map_err(|e| AppError::validation(format!("target {}: {}", index + 1, e)))?;
        }

        Ok(())
    }
}

/// One configured URL-to-file fetch job.
#[derive(Debug, Clone, Deserialize)]
pub struct Target {
    /// Free-form label, used only for logs
    #[serde(default)]
    pub name: String,

    /// Absolute URL to fetch
    pub url: String,

    /// Destination path, literal or templated
    pub path: PathSpec,

    /// Raw "Name: Value" header lines
    #[serde(default)]
    pub headers: Vec<String>,
}

impl Target {
    fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(AppError::validation("URL is required"));
        }
        Url::parse(&self.url)
            .map_err(|e| AppError::validation(format!("invalid URL {:?}: {}", self.url, e)))?;

        match &self.path {
            PathSpec::Literal(path) => {
                if path.is_empty() {
                    return Err(AppError::EmptyPath);
                }
            }
            PathSpec::Templated { template, pattern } => {
                if template.is_empty() {
                    return Err(AppError::EmptyPath);
                }
                if !template.contains("{pattern}") {
                    return Err(AppError::MissingPlaceholder);
                }
                pattern::validate(pattern)?;
            }
        }

        headers::parse_headers(&self.headers)?;
        Ok(())
    }
}

/// Destination path specification.
///
/// Decoded from either a plain YAML string or a single-element sequence of
/// `{string, pattern}`, but represented as a tagged variant so resolution
/// can match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// Literal file path
    Literal(String),
    /// Template with a `{pattern}` placeholder and the pattern to fill it
    Templated { template: String, pattern: String },
}

/// Permissive field view of a templated path entry, checked after decoding
/// so missing fields get the configuration-level error message.
#[derive(Deserialize)]
struct TemplatedFields {
    #[serde(default)]
    string: Option<String>,
    #[serde(default)]
    pattern: Option<String>,
}

impl<'de> Deserialize<'de> for PathSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PathSpecVisitor;

        impl<'de> Visitor<'de> for PathSpecVisitor {
            type Value = PathSpec;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a path string or a single {string, pattern} configuration object")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<PathSpec, E> {
                Ok(PathSpec::Literal(v.to_string()))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<PathSpec, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let first: TemplatedFields = seq.next_element()?.ok_or_else(|| {
                    de::Error::custom("path array must contain exactly one configuration object")
                })?;
                if seq.next_element::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom(
                        "path array must contain exactly one configuration object",
                    ));
                }

                match (first.string, first.pattern) {
                    (Some(template), Some(pattern)) => {
                        Ok(PathSpec::Templated { template, pattern })
                    }
                    _ => Err(de::Error::custom(
                        "path configuration must have 'string' and 'pattern' fields",
                    )),
                }
            }
        }

        deserializer.deserialize_any(PathSpecVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literal_and_templated_paths() {
        let yaml = r#"
logfile: ./logs/run.log
targets:
  - name: static
    url: https://example.com/data
    path: ./cache/data.json
  - name: dated
    url: https://example.com/data
    path:
      - string: ./cache/data-{pattern}.json
        pattern: DateOnly-UTC-slug
    headers:
      - "Authorization: Bearer token"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        config.validate().unwrap();

        assert_eq!(config.logfile.as_deref(), Some("./logs/run.log"));
        assert_eq!(config.targets.len(), 2);
        assert_eq!(
            config.targets[0].path,
            PathSpec::Literal("./cache/data.json".to_string())
        );
        assert_eq!(
            config.targets[1].path,
            PathSpec::Templated {
                template: "./cache/data-{pattern}.json".to_string(),
                pattern: "DateOnly-UTC-slug".to_string(),
            }
        );
    }

    #[test]
    fn rejects_empty_target_list() {
        let config: Config = serde_yaml::from_str("targets: []").unwrap();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn rejects_path_array_with_multiple_entries() {
        let yaml = r#"
targets:
  - url: https://example.com
    path:
      - string: ./a-{pattern}.json
        pattern: DateOnly-UTC-slug
      - string: ./b-{pattern}.json
        pattern: DateOnly-UTC-slug
"#;
        let err = serde_yaml::from_str::<Config>(yaml).unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn rejects_templated_path_missing_fields() {
        let yaml = r#"
targets:
  - url: https://example.com
    path:
      - string: ./a-{pattern}.json
"#;
        let err = serde_yaml::from_str::<Config>(yaml).unwrap_err();
        assert!(err.to_string().contains("'string' and 'pattern'"));
    }

    #[test]
    fn validation_reports_target_index() {
        let yaml = r#"
targets:
  - name: good
    url: https://example.com/a
    path: ./a.json
  - name: bad
    url: https://example.com/b
    path:
      - string: ./b.json
        pattern: DateOnly-UTC-slug
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("target 2"));
    }

    #[test]
    fn validation_rejects_bad_header_line() {
        let yaml = r#"
targets:
  - url: https://example.com/a
    path: ./a.json
    headers:
      - "NoSeparator"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_empty_url() {
        let yaml = r#"
targets:
  - url: ""
    path: ./a.json
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("URL is required"));
    }

    #[test]
    fn validation_rejects_bad_pattern_in_path() {
        let yaml = r#"
targets:
  - url: https://example.com/a
    path:
      - string: ./a-{pattern}.json
        pattern: DateOnly-EST-slug
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }
}
