//! Wire and report data types
//!
//! The wire types mirror the upstream UDSC API field names; the report type
//! is what the aggregator produces for the reporter.

use serde::Deserialize;

/// Decision marker code for a negative (denied) decision.
pub const NEGATIVE_MARKER: i64 = 6;

/// A decision-issuing body: voivodeship office, administrative court or
/// ministry. Fetched once per run, immutable for the run's duration.
#[derive(Debug, Clone, Deserialize)]
pub struct Institution {
    pub id: i64,
    pub name: String,
}

/// One (institution, decision status) bucket, pre-aggregated server-side via
/// the request's `groupBy` parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    pub institution: i64,
    pub decision_marker: i64,
    pub total: i64,
}

/// Per-institution denial statistics, sorted ascending by percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub name: String,
    pub total: i64,
    pub negative: i64,
    pub percentage: f64,
}
