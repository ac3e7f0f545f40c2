//! Inventory valuation report: every article with its stock value, plus a
//! grand total, grouped by category.

use chrono::{DateTime, Utc};

use dishstock_inventory::Article;
use dishstock_store::Store;

use crate::document::{Column, ReportDocument, ReportSection, money};
use crate::error::ReportResult;

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryReport {
    pub generated_at: DateTime<Utc>,
    /// Ordered by category, then by name.
    pub rows: Vec<InventoryRow>,
    pub grand_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub unit: String,
    pub unit_price: f64,
    pub value: f64,
}

impl InventoryRow {
    fn from_article(article: &Article) -> Self {
        Self {
            name: article.name.clone(),
            category: article.category.clone(),
            quantity: article.quantity,
            unit: article.unit.clone(),
            unit_price: article.unit_price,
            value: article.stock_value(),
        }
    }
}

impl InventoryReport {
    pub async fn build(store: &Store) -> ReportResult<Self> {
        let articles = store.list_articles_by_category().await?;
        let rows: Vec<InventoryRow> = articles.iter().map(InventoryRow::from_article).collect();
        let grand_total = rows.iter().map(|row| row.value).sum();

        Ok(Self {
            generated_at: Utc::now(),
            rows,
            grand_total,
        })
    }

    pub fn to_document(&self) -> ReportDocument {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    row.category.clone(),
                    row.quantity.to_string(),
                    row.unit.clone(),
                    money(row.unit_price),
                    money(row.value),
                ]
            })
            .collect();

        ReportDocument {
            title: "Inventory Report - DishStock".to_string(),
            generated_at: self.generated_at,
            sections: vec![ReportSection {
                heading: None,
                columns: vec![
                    Column::new("Name", 50.0),
                    Column::new("Category", 30.0),
                    Column::new("Qty", 18.0),
                    Column::new("Unit", 18.0),
                    Column::new("Unit price", 28.0),
                    Column::new("Value", 36.0),
                ],
                rows,
                footer: Some(vec![
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    "TOTAL:".to_string(),
                    money(self.grand_total),
                ]),
                empty_note: None,
            }],
        }
    }
}
