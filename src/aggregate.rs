//! Per-institution aggregation of decision records
//!
//! Groups the raw (institution, marker) buckets by institution, joins the
//! institution names, and derives the denial percentage for each group.

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::errors::{MigstatError, Result};
use crate::models::{DecisionRecord, Institution, ResultRow, NEGATIVE_MARKER};
use crate::stats::round2;

/// Aggregate decision records into one [`ResultRow`] per institution,
/// sorted ascending by denial percentage.
///
/// A record referencing an institution id absent from `institutions` is a
/// fatal lookup error. An institution whose decisions sum to zero gets a
/// percentage of 0.0 and keeps its row.
pub fn aggregate(
    institutions: &[Institution],
    decisions: &[DecisionRecord],
) -> Result<Vec<ResultRow>> {
    let names: HashMap<i64, &str> = institutions
        .iter()
        .map(|i| (i.id, i.name.as_str()))
        .collect();

    // Group by institution id, insertion order of first occurrence
    let mut groups: IndexMap<i64, Vec<&DecisionRecord>> = IndexMap::new();
    for record in decisions {
        groups.entry(record.institution).or_default().push(record);
    }

    let mut rows = Vec::with_capacity(groups.len());
    for (id, records) in &groups {
        let name = names.get(id).ok_or(MigstatError::Lookup(*id))?;
        let total: i64 = records.iter().map(|r| r.total).sum();
        let negative = records
            .iter()
            .find(|r| r.decision_marker == NEGATIVE_MARKER)
            .map(|r| r.total)
            .unwrap_or(0);
        let percentage = if total == 0 {
            0.0
        } else {
            round2(100.0 * negative as f64 / total as f64)
        };

        rows.push(ResultRow {
            name: (*name).to_string(),
            total,
            negative,
            percentage,
        });
    }

    rows.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));
    Ok(rows)
}
