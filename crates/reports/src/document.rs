//! Report document model: what a report says, independent of how it is
//! drawn on the page.

use chrono::{DateTime, Utc};

/// A finished report: a title and one or more tabular sections.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<ReportSection>,
}

/// One table within a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub heading: Option<String>,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    /// Extra row rendered in bold under the table, aligned to the columns.
    pub footer: Option<Vec<String>>,
    /// Shown instead of the table when there are no rows.
    pub empty_note: Option<String>,
}

/// A column header and its width on the page, in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: &'static str,
    pub width: f32,
}

impl Column {
    pub fn new(header: &'static str, width: f32) -> Self {
        Self { header, width }
    }
}

/// Timestamped default file name, `report_YYYYMMDD_HHMMSS.pdf`.
pub fn default_file_name(now: DateTime<Utc>) -> String {
    format!("report_{}.pdf", now.format("%Y%m%d_%H%M%S"))
}

/// Two-decimal money rendering. Amounts carry no currency label.
pub(crate) fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Optional cell text, with `-` standing in for absent values.
pub(crate) fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => "-".to_string(),
    }
}
