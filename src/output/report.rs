//! The ranked denial-rate table
//!
//! One bold title line, an optional applied-filters line, an underlined
//! header and one row per institution. Rows whose percentage is an outlier
//! relative to the median are colorized.

use std::io::{self, Write};

use crate::config::FilterConfig;
use crate::models::ResultRow;
use crate::output::terminal::{self, colors};
use crate::stats::median;

/// Institution name column width, in characters.
const NAME_WIDTH: usize = 30;

/// Renders the report to a text stream, with or without ANSI styling.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(
        &self,
        out: &mut impl Write,
        config: &FilterConfig,
        rows: &[ResultRow],
    ) -> io::Result<()> {
        let title = format!("{} {}", config.case_type.name(), config.year);
        writeln!(out, "{}", self.bold(&title))?;

        if !config.extra.is_empty() {
            // Display on Value is infallible, unlike to_string on the map
            let filters =
                serde_json::Value::Object(config.extra.clone().into_iter().collect());
            writeln!(out, "Applied filters: {}", filters)?;
        }

        let header = format!(
            "{:<width$}\tTotal\tDenied\t% \u{25b2}",
            "Institution",
            width = NAME_WIDTH
        );
        writeln!(out, "{}", self.underline(&header))?;

        let percentages: Vec<f64> = rows.iter().map(|r| r.percentage).collect();
        let median = median(&percentages);

        for row in rows {
            let line = format!(
                "{:<width$}\t{}\t{}\t{:.2}",
                clip(&row.name),
                row.total,
                row.negative,
                row.percentage,
                width = NAME_WIDTH
            );
            match row_color(row.percentage, median) {
                Some(color) if self.color => writeln!(out, "{}", terminal::colorize(&line, color))?,
                _ => writeln!(out, "{}", line)?,
            }
        }
        Ok(())
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            terminal::bold(text)
        } else {
            text.to_string()
        }
    }

    fn underline(&self, text: &str) -> String {
        if self.color {
            terminal::underline(text)
        } else {
            text.to_string()
        }
    }
}

/// Outlier color for a row: red above `median^1.5`, green below
/// `median / 1.5`, plain otherwise or when there is no median.
fn row_color(percentage: f64, median: Option<f64>) -> Option<u8> {
    let median = median?;
    if percentage > median.powf(1.5) {
        Some(colors::RED)
    } else if percentage < median / 1.5 {
        Some(colors::GREEN)
    } else {
        None
    }
}

/// Truncate an institution name to the column width.
fn clip(name: &str) -> String {
    name.chars().take(NAME_WIDTH).collect()
}
