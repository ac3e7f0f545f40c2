//! Movements report: the most recent stock entries and exits, newest first.

use chrono::{DateTime, Utc};

use dishstock_store::{EntryRecord, ExitRecord, Store};

use crate::document::{Column, ReportDocument, ReportSection, money, or_dash};
use crate::error::ReportResult;

/// Each side of the report is capped at this many rows.
pub const REPORT_ROWS: i64 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct MovementsReport {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<EntryRecord>,
    pub exits: Vec<ExitRecord>,
}

impl MovementsReport {
    pub async fn build(store: &Store) -> ReportResult<Self> {
        Ok(Self {
            generated_at: Utc::now(),
            entries: store.recent_entries(REPORT_ROWS).await?,
            exits: store.recent_exits(REPORT_ROWS).await?,
        })
    }

    pub fn to_document(&self) -> ReportDocument {
        let entry_rows = self
            .entries
            .iter()
            .map(|entry| {
                vec![
                    entry.date.to_string(),
                    entry.article_name.clone(),
                    entry.quantity.to_string(),
                    or_dash(entry.supplier.as_deref()),
                    money(entry.total_price),
                ]
            })
            .collect();

        let exit_rows = self
            .exits
            .iter()
            .map(|exit| {
                vec![
                    exit.date.to_string(),
                    exit.article_name.clone(),
                    exit.quantity.to_string(),
                    exit.reason.clone(),
                    or_dash(exit.actor.as_deref()),
                ]
            })
            .collect();

        ReportDocument {
            title: "Movements Report - DishStock".to_string(),
            generated_at: self.generated_at,
            sections: vec![
                ReportSection {
                    heading: Some(format!("Entries ({REPORT_ROWS} most recent)")),
                    columns: vec![
                        Column::new("Date", 26.0),
                        Column::new("Article", 60.0),
                        Column::new("Qty", 18.0),
                        Column::new("Supplier", 46.0),
                        Column::new("Total price", 30.0),
                    ],
                    rows: entry_rows,
                    footer: None,
                    empty_note: Some("No entries recorded.".to_string()),
                },
                ReportSection {
                    heading: Some(format!("Exits ({REPORT_ROWS} most recent)")),
                    columns: vec![
                        Column::new("Date", 26.0),
                        Column::new("Article", 56.0),
                        Column::new("Qty", 18.0),
                        Column::new("Reason", 40.0),
                        Column::new("Actor", 40.0),
                    ],
                    rows: exit_rows,
                    footer: None,
                    empty_note: Some("No exits recorded.".to_string()),
                },
            ],
        }
    }
}
