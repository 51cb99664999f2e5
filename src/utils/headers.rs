// src/utils/headers.rs

//! Raw `"Name: Value"` header line parsing.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{AppError, Result};

/// Parse raw header lines into a header map.
///
/// Empty lines are skipped. Each line splits on the first `": "`; names are
/// case-normalized, and a later entry for the same name overwrites the
/// earlier one.
pub fn parse_headers(lines: &[String]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (name, value) = line
            .split_once(": ")
            .ok_or_else(|| AppError::MalformedHeader(line.clone()))?;

        let name = name.trim();
        let value = value.trim();
        if name.is_empty() {
            return Err(AppError::EmptyHeaderName(line.clone()));
        }

        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| AppError::MalformedHeader(line.clone()))?;
        let value =
            HeaderValue::from_str(value).map_err(|_| AppError::MalformedHeader(line.clone()))?;

        headers.insert(name, value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_name_value_pairs() {
        let headers = parse_headers(&lines(&[
            "Authorization: Bearer token",
            "Accept: application/json",
        ]))
        .unwrap();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers["authorization"], "Bearer token");
        assert_eq!(headers["accept"], "application/json");
    }

    #[test]
    fn empty_lines_are_skipped() {
        let headers = parse_headers(&lines(&["", "Accept: text/plain", ""])).unwrap();
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let headers = parse_headers(&lines(&["Accept:   text/plain  "])).unwrap();
        assert_eq!(headers["accept"], "text/plain");
    }

    #[test]
    fn splits_on_first_separator_only() {
        let headers = parse_headers(&lines(&["X-Note: a: b: c"])).unwrap();
        assert_eq!(headers["x-note"], "a: b: c");
    }

    #[test]
    fn later_duplicate_overwrites_earlier_case_insensitively() {
        let headers =
            parse_headers(&lines(&["Accept: text/plain", "accept: application/json"])).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["accept"], "application/json");
    }

    #[test]
    fn missing_separator_is_rejected() {
        assert!(matches!(
            parse_headers(&lines(&["Accept=text/plain"])),
            Err(AppError::MalformedHeader(_))
        ));
        // A colon without the trailing space does not count as a separator.
        assert!(matches!(
            parse_headers(&lines(&["Accept:text/plain"])),
            Err(AppError::MalformedHeader(_))
        ));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            parse_headers(&lines(&["  : value"])),
            Err(AppError::EmptyHeaderName(_))
        ));
    }
}
