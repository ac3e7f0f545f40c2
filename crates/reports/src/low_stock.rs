//! Low-stock report: every article at or below its threshold, most
//! depleted first.

use chrono::{DateTime, Utc};

use dishstock_inventory::Article;
use dishstock_store::Store;

use crate::document::{Column, ReportDocument, ReportSection};
use crate::error::ReportResult;

#[derive(Debug, Clone, PartialEq)]
pub struct LowStockReport {
    pub generated_at: DateTime<Utc>,
    /// Ordered by quantity ascending, so exhausted articles lead.
    pub rows: Vec<Article>,
}

impl LowStockReport {
    pub async fn build(store: &Store) -> ReportResult<Self> {
        Ok(Self {
            generated_at: Utc::now(),
            rows: store.list_low_stock().await?,
        })
    }

    pub fn to_document(&self) -> ReportDocument {
        let rows = self
            .rows
            .iter()
            .map(|article| {
                vec![
                    article.name.clone(),
                    article.category.clone(),
                    article.quantity.to_string(),
                    article.unit.clone(),
                    article.min_threshold.to_string(),
                    article.stock_level().to_string(),
                ]
            })
            .collect();

        ReportDocument {
            title: "Low Stock Report - DishStock".to_string(),
            generated_at: self.generated_at,
            sections: vec![ReportSection {
                heading: None,
                columns: vec![
                    Column::new("Name", 50.0),
                    Column::new("Category", 30.0),
                    Column::new("Current stock", 22.0),
                    Column::new("Unit", 20.0),
                    Column::new("Threshold", 28.0),
                    Column::new("Status", 30.0),
                ],
                rows,
                footer: None,
                empty_note: Some("No low stock detected.".to_string()),
            }],
        }
    }
}
