//! Aggregate queries: dashboard figures, low-stock listing, merged movement feed.

use chrono::NaiveDate;
use sqlx::Row;

use dishstock_inventory::{Article, MovementKind};

use crate::articles::{ARTICLE_COLUMNS, article_from_row};
use crate::db::Store;
use crate::error::StoreResult;

/// Headline figures for the dashboard screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub article_count: i64,
    pub low_stock_count: i64,
    pub exhausted_count: i64,
    pub total_stock_value: f64,
    pub sales_today: f64,
}

/// One line of the merged entry/exit feed.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementSummary {
    pub kind: MovementKind,
    pub date: NaiveDate,
    pub article_name: String,
    pub quantity: i64,
}

impl Store {
    /// Compute the dashboard figures in one pass. `today` anchors the
    /// sales total.
    pub async fn dashboard_stats(&self, today: NaiveDate) -> StoreResult<DashboardStats> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS article_count,
                COALESCE(SUM(quantity > 0 AND quantity <= min_threshold), 0) AS low_stock_count,
                COALESCE(SUM(quantity = 0), 0) AS exhausted_count,
                COALESCE(SUM(quantity * unit_price), 0.0) AS total_stock_value
            FROM articles
            "#,
        )
        .fetch_one(self.pool())
        .await?;

        Ok(DashboardStats {
            article_count: row.try_get("article_count")?,
            low_stock_count: row.try_get("low_stock_count")?,
            exhausted_count: row.try_get("exhausted_count")?,
            total_stock_value: row.try_get("total_stock_value")?,
            sales_today: self.sales_total_for(today).await?,
        })
    }

    /// Sum of quantity times current unit price over the exits recorded on
    /// `date`.
    pub async fn sales_total_for(&self, date: NaiveDate) -> StoreResult<f64> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(x.quantity * a.unit_price), 0.0) AS total
            FROM stock_exits x
            JOIN articles a ON a.id = x.article_id
            WHERE x.exit_date = ?1
            "#,
        )
        .bind(date)
        .fetch_one(self.pool())
        .await?;

        Ok(row.try_get("total")?)
    }

    /// Articles at or below their threshold, most depleted first. Exhausted
    /// articles are included.
    pub async fn list_low_stock(&self) -> StoreResult<Vec<Article>> {
        let rows = sqlx::query(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles \
             WHERE quantity <= min_threshold \
             ORDER BY quantity ASC, name COLLATE NOCASE"
        ))
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(article_from_row).collect()
    }

    /// How many articles would currently trigger a low-stock alert.
    pub async fn low_stock_alert_count(&self) -> StoreResult<i64> {
        let row =
            sqlx::query("SELECT COUNT(*) AS n FROM articles WHERE quantity <= min_threshold")
                .fetch_one(self.pool())
                .await?;

        Ok(row.try_get("n")?)
    }

    /// The latest movements of either kind, newest first.
    pub async fn recent_movements(&self, limit: i64) -> StoreResult<Vec<MovementSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT 'entry' AS kind, e.entry_date AS date, a.name AS article_name,
                   e.quantity AS quantity, e.id AS movement_id
            FROM stock_entries e
            JOIN articles a ON a.id = e.article_id
            UNION ALL
            SELECT 'exit' AS kind, x.exit_date AS date, a.name AS article_name,
                   x.quantity AS quantity, x.id AS movement_id
            FROM stock_exits x
            JOIN articles a ON a.id = x.article_id
            ORDER BY date DESC, movement_id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let kind: String = row.try_get("kind")?;
                Ok(MovementSummary {
                    kind: if kind == "entry" {
                        MovementKind::Entry
                    } else {
                        MovementKind::Exit
                    },
                    date: row.try_get("date")?,
                    article_name: row.try_get("article_name")?,
                    quantity: row.try_get("quantity")?,
                })
            })
            .collect()
    }
}
