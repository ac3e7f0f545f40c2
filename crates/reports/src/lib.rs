//! `dishstock-reports` — PDF report generation.
//!
//! Three report kinds, each built from store queries into a
//! [`ReportDocument`] and rendered to an A4 PDF: the full inventory with its
//! valuation, the most recent movements, and the articles running low.

pub mod document;
pub mod error;
pub mod inventory;
pub mod low_stock;
pub mod movements;
pub mod pdf;

use std::fmt;
use std::path::Path;

use dishstock_store::Store;

pub use document::{Column, ReportDocument, ReportSection, default_file_name};
pub use error::{ReportError, ReportResult};
pub use inventory::{InventoryReport, InventoryRow};
pub use low_stock::LowStockReport;
pub use movements::MovementsReport;
pub use pdf::write_pdf;

/// The reports the application can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Inventory,
    Movements,
    LowStock,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Inventory => "inventory",
            ReportKind::Movements => "movements",
            ReportKind::LowStock => "low-stock",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the requested report from the store and write it to `path`.
pub async fn generate(store: &Store, kind: ReportKind, path: &Path) -> ReportResult<()> {
    let document = match kind {
        ReportKind::Inventory => InventoryReport::build(store).await?.to_document(),
        ReportKind::Movements => MovementsReport::build(store).await?.to_document(),
        ReportKind::LowStock => LowStockReport::build(store).await?.to_document(),
    };

    pdf::write_pdf(&document, path)?;
    tracing::info!(kind = %kind, path = %path.display(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dishstock_inventory::ArticleDraft;

    #[tokio::test]
    async fn generate_writes_a_pdf_for_every_kind() {
        let store = Store::open_in_memory().await.unwrap();
        store
            .insert_article(ArticleDraft {
                name: "Dinner plate".to_string(),
                category: "Plates".to_string(),
                quantity: 3,
                unit: String::new(),
                unit_price: 2.0,
                min_threshold: 10,
            })
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        for kind in [
            ReportKind::Inventory,
            ReportKind::Movements,
            ReportKind::LowStock,
        ] {
            let path = dir.path().join(format!("{kind}.pdf"));
            generate(&store, kind, &path).await.unwrap();
            assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
        }
    }
}
