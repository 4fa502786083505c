//! Filter configuration
//!
//! A single immutable [`FilterConfig`] is built from the CLI arguments and
//! threaded into the API client, the aggregator and the reporter. Known
//! fields (case type, year) are validated eagerly; everything else from the
//! filters file/string is kept as pass-through query parameters.

use chrono::Datelike;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;

use crate::cli::Args;
use crate::errors::{MigstatError, Result};

/// The upstream dataset starts in 2010.
pub const MIN_YEAR: i32 = 2010;

/// Immigration case type, with the upstream wire code as discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CaseType {
    TemporaryResidence = 1,
    PermanentResidence = 2,
    EuLongTermResidence = 3,
}

impl CaseType {
    /// Accepted `-t/--case-type` values.
    pub const FLAGS: [&'static str; 5] = ["temp", "kcp", "perm", "ksp", "eult"];

    /// Map a CLI flag value (already lowercased) to a case type.
    ///
    /// Unrecognized strings fall back to the permanent-residence default;
    /// unreachable in practice since flag values are validated first.
    pub fn from_flag(value: &str) -> CaseType {
        match value {
            "temp" | "kcp" => CaseType::TemporaryResidence,
            "perm" | "ksp" => CaseType::PermanentResidence,
            "eult" => CaseType::EuLongTermResidence,
            _ => CaseType::PermanentResidence,
        }
    }

    /// Map an upstream wire code to a case type.
    pub fn from_code(code: i64) -> Option<CaseType> {
        match code {
            1 => Some(CaseType::TemporaryResidence),
            2 => Some(CaseType::PermanentResidence),
            3 => Some(CaseType::EuLongTermResidence),
            _ => None,
        }
    }

    /// Wire code sent as the `caseType` query parameter.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Display name shown in the report title.
    pub fn name(self) -> &'static str {
        match self {
            CaseType::TemporaryResidence => "TEMPORARY_RESIDENCE",
            CaseType::PermanentResidence => "PERMANENT_RESIDENCE",
            CaseType::EuLongTermResidence => "EU_LONG_TERM_RESIDENCE",
        }
    }
}

/// Resolved filter configuration for one run.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub case_type: CaseType,
    pub year: i32,
    /// Pass-through query keys (ageFrom, gender, country, ...) in insertion
    /// order, with inline `-F` values overriding `-f` file values.
    pub extra: IndexMap<String, Value>,
}

/// Current calendar year, the upper bound for `--year`.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

impl FilterConfig {
    /// Build the configuration from parsed CLI arguments.
    ///
    /// Merge order: filters file, then inline filters string over it, then
    /// explicit `-t`/`-y` flags over both.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut merged: IndexMap<String, Value> = IndexMap::new();

        if let Some(path) = &args.filters_file {
            // An unreadable file is a runtime error, not a usage error
            let text = fs::read_to_string(path)?;
            merge_object(&mut merged, &text, "filters file")?;
        }
        if let Some(json) = &args.filters {
            merge_object(&mut merged, json, "filters")?;
        }

        // Baseline keys are pulled out of the pass-through map;
        // shift_remove keeps the remaining keys in insertion order
        let filter_case_type = merged
            .shift_remove("caseType")
            .and_then(|v| v.as_i64())
            .and_then(CaseType::from_code);
        let filter_year = merged.shift_remove("year").and_then(|v| v.as_i64());

        let case_type = match &args.case_type {
            Some(flag) => parse_case_type_flag(flag)?,
            None => filter_case_type.unwrap_or(CaseType::PermanentResidence),
        };
        let year = match &args.year {
            Some(value) => parse_year_flag(value)?,
            None => normalize_year(filter_year),
        };

        Ok(Self {
            case_type,
            year,
            extra: merged,
        })
    }

    /// Query parameters in insertion order: pass-through filters first, then
    /// the baseline caseType/year.
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self
            .extra
            .iter()
            .map(|(key, value)| (key.clone(), param_value(value)))
            .collect();
        params.push(("caseType".to_string(), self.case_type.code().to_string()));
        params.push(("year".to_string(), self.year.to_string()));
        params
    }
}

/// Parse `text` as a JSON object and merge its keys into `target`,
/// overwriting values for keys already present.
fn merge_object(target: &mut IndexMap<String, Value>, text: &str, what: &str) -> Result<()> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| MigstatError::Filter(format!("{} is not valid JSON: {}", what, e)))?;
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                target.insert(key, value);
            }
            Ok(())
        }
        _ => Err(MigstatError::Filter(format!("{} must be a JSON object", what))),
    }
}

fn parse_case_type_flag(value: &str) -> Result<CaseType> {
    let lower = value.to_ascii_lowercase();
    if !CaseType::FLAGS.contains(&lower.as_str()) {
        return Err(MigstatError::Argument(format!(
            "invalid case type {:?} (expected one of temp, kcp, perm, ksp, eult)",
            value
        )));
    }
    Ok(CaseType::from_flag(&lower))
}

fn parse_year_flag(value: &str) -> Result<i32> {
    let current = current_year();
    let year: i32 = value
        .parse()
        .map_err(|_| MigstatError::Argument(format!("invalid year {:?}", value)))?;
    if !(MIN_YEAR..=current).contains(&year) {
        return Err(MigstatError::Argument(format!(
            "year must be within {}..{}, got {}",
            MIN_YEAR, current, year
        )));
    }
    Ok(year)
}

/// A filter-sourced year outside the valid range falls back to the current
/// year instead of failing, matching the lenient file/string semantics.
/// The range check happens in i64 so values that would wrap a narrowing
/// cast stay out of range.
fn normalize_year(year: Option<i64>) -> i32 {
    let current = current_year();
    match year.and_then(|y| i32::try_from(y).ok()) {
        Some(y) if (MIN_YEAR..=current).contains(&y) => y,
        _ => current,
    }
}

/// Render a JSON filter value as a query parameter value.
/// Strings go through unquoted; everything else as compact JSON.
fn param_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["migstat"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).expect("arguments should parse")
    }

    #[test]
    fn test_case_type_flag_mapping() {
        assert_eq!(CaseType::from_flag("temp"), CaseType::TemporaryResidence);
        assert_eq!(CaseType::from_flag("kcp"), CaseType::TemporaryResidence);
        assert_eq!(CaseType::from_flag("perm"), CaseType::PermanentResidence);
        assert_eq!(CaseType::from_flag("ksp"), CaseType::PermanentResidence);
        assert_eq!(CaseType::from_flag("eult"), CaseType::EuLongTermResidence);
        // Defensive default for anything else
        assert_eq!(CaseType::from_flag("bogus"), CaseType::PermanentResidence);
    }

    #[test]
    fn test_case_type_flag_case_insensitive() {
        let config = FilterConfig::from_args(&args(&["-t", "EuLT"])).unwrap();
        assert_eq!(config.case_type, CaseType::EuLongTermResidence);
    }

    #[test]
    fn test_invalid_case_type_is_argument_error() {
        let err = FilterConfig::from_args(&args(&["-t", "asylum"])).unwrap_err();
        assert!(matches!(err, MigstatError::Argument(_)));
        assert!(err.to_string().contains("asylum"));
    }

    #[test]
    fn test_wire_codes() {
        assert_eq!(CaseType::TemporaryResidence.code(), 1);
        assert_eq!(CaseType::PermanentResidence.code(), 2);
        assert_eq!(CaseType::EuLongTermResidence.code(), 3);
        assert_eq!(CaseType::from_code(3), Some(CaseType::EuLongTermResidence));
        assert_eq!(CaseType::from_code(7), None);
    }

    #[test]
    fn test_defaults() {
        let config = FilterConfig::from_args(&args(&[])).unwrap();
        assert_eq!(config.case_type, CaseType::PermanentResidence);
        assert_eq!(config.year, current_year());
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_year_flag_valid() {
        let config = FilterConfig::from_args(&args(&["-y", "2015"])).unwrap();
        assert_eq!(config.year, 2015);
    }

    #[test]
    fn test_year_flag_out_of_range() {
        for bad in ["2009", "1999", "3000"] {
            let err = FilterConfig::from_args(&args(&["-y", bad])).unwrap_err();
            assert!(matches!(err, MigstatError::Argument(_)), "{} should fail", bad);
        }
    }

    #[test]
    fn test_year_flag_not_an_integer() {
        let err = FilterConfig::from_args(&args(&["-y", "twenty"])).unwrap_err();
        assert!(matches!(err, MigstatError::Argument(_)));
    }

    #[test]
    fn test_cli_wins_over_inline_filters() {
        let config =
            FilterConfig::from_args(&args(&["-t", "perm", "-F", r#"{"caseType": 1}"#])).unwrap();
        assert_eq!(config.case_type, CaseType::PermanentResidence);
    }

    #[test]
    fn test_cli_wins_over_filters_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"caseType": 1, "year": 2012}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config =
            FilterConfig::from_args(&args(&["-t", "perm", "-y", "2014", "-f", &path])).unwrap();
        assert_eq!(config.case_type, CaseType::PermanentResidence);
        assert_eq!(config.year, 2014);
    }

    #[test]
    fn test_filter_sourced_baseline_values() {
        let config =
            FilterConfig::from_args(&args(&["-F", r#"{"caseType": 1, "year": 2013}"#])).unwrap();
        assert_eq!(config.case_type, CaseType::TemporaryResidence);
        assert_eq!(config.year, 2013);
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_filter_sourced_year_out_of_range_normalizes() {
        let config = FilterConfig::from_args(&args(&["-F", r#"{"year": 1995}"#])).unwrap();
        assert_eq!(config.year, current_year());
    }

    #[test]
    fn test_filter_sourced_year_beyond_i32_normalizes() {
        // 2^32 + 2015: the low 32 bits look like a valid year
        let config =
            FilterConfig::from_args(&args(&["-F", r#"{"year": 4294969311}"#])).unwrap();
        assert_eq!(config.year, current_year());

        let config =
            FilterConfig::from_args(&args(&["-F", r#"{"year": -4294965281}"#])).unwrap();
        assert_eq!(config.year, current_year());
    }

    #[test]
    fn test_year_flag_range_is_inclusive() {
        let current = current_year().to_string();
        let config = FilterConfig::from_args(&args(&["-y", &current])).unwrap();
        assert_eq!(config.year, current_year());

        let config = FilterConfig::from_args(&args(&["-y", "2010"])).unwrap();
        assert_eq!(config.year, MIN_YEAR);
    }

    #[test]
    fn test_inline_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"gender": "M", "ageFrom": 18}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config =
            FilterConfig::from_args(&args(&["-f", &path, "-F", r#"{"gender": "F"}"#])).unwrap();
        assert_eq!(config.extra.get("gender"), Some(&Value::from("F")));
        assert_eq!(config.extra.get("ageFrom"), Some(&Value::from(18)));
    }

    #[test]
    fn test_malformed_inline_filters() {
        let err = FilterConfig::from_args(&args(&["-F", "{not json"])).unwrap_err();
        assert!(matches!(err, MigstatError::Filter(_)));
    }

    #[test]
    fn test_non_object_filters_rejected() {
        let err = FilterConfig::from_args(&args(&["-F", "[1, 2]"])).unwrap_err();
        assert!(matches!(err, MigstatError::Filter(_)));
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn test_missing_filters_file_is_runtime_error() {
        let err =
            FilterConfig::from_args(&args(&["-f", "/no/such/file.json"])).unwrap_err();
        assert!(matches!(err, MigstatError::Io(_)));
        assert!(!err.is_usage_error());
    }

    #[test]
    fn test_query_params_order_and_values() {
        let config = FilterConfig::from_args(&args(&[
            "-t",
            "temp",
            "-y",
            "2016",
            "-F",
            r#"{"country": "UA", "ageFrom": 18}"#,
        ]))
        .unwrap();

        let params = config.query_params();
        assert_eq!(
            params,
            vec![
                ("country".to_string(), "UA".to_string()),
                ("ageFrom".to_string(), "18".to_string()),
                ("caseType".to_string(), "1".to_string()),
                ("year".to_string(), "2016".to_string()),
            ]
        );
    }
}
