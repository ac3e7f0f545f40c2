//! Article capabilities: create/read/update/delete.

use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use dishstock_core::{ArticleId, DomainError};
use dishstock_inventory::{Article, ArticleDraft};

use crate::db::Store;
use crate::error::StoreResult;

pub(crate) const ARTICLE_COLUMNS: &str =
    "id, name, category, quantity, unit, unit_price, min_threshold, created_at";

impl Store {
    /// Insert a validated draft and return the stored article.
    pub async fn insert_article(&self, draft: ArticleDraft) -> StoreResult<Article> {
        let draft = draft.normalized()?;
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO articles (name, category, quantity, unit, unit_price, min_threshold, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(draft.quantity)
        .bind(&draft.unit)
        .bind(draft.unit_price)
        .bind(draft.min_threshold)
        .bind(created_at)
        .execute(self.pool())
        .await?;

        let id = ArticleId::new(result.last_insert_rowid());
        tracing::info!(article_id = %id, name = %draft.name, "article created");

        Ok(Article {
            id,
            name: draft.name,
            category: draft.category,
            quantity: draft.quantity,
            unit: draft.unit,
            unit_price: draft.unit_price,
            min_threshold: draft.min_threshold,
            created_at,
        })
    }

    pub async fn get_article(&self, id: ArticleId) -> StoreResult<Option<Article>> {
        let row = sqlx::query(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool())
        .await?;

        row.as_ref().map(article_from_row).transpose()
    }

    /// All articles, ordered by name.
    pub async fn list_articles(&self) -> StoreResult<Vec<Article>> {
        let rows = sqlx::query(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles ORDER BY name COLLATE NOCASE, id"
        ))
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(article_from_row).collect()
    }

    /// All articles ordered for the inventory report: category, then name.
    pub async fn list_articles_by_category(&self) -> StoreResult<Vec<Article>> {
        let rows = sqlx::query(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles \
             ORDER BY category COLLATE NOCASE, name COLLATE NOCASE, id"
        ))
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(article_from_row).collect()
    }

    /// Distinct category names in use, alphabetical.
    pub async fn list_categories(&self) -> StoreResult<Vec<String>> {
        let rows =
            sqlx::query("SELECT DISTINCT category FROM articles ORDER BY category COLLATE NOCASE")
                .fetch_all(self.pool())
                .await?;

        rows.iter()
            .map(|row| row.try_get("category").map_err(Into::into))
            .collect()
    }

    /// Replace the mutable fields of an article with a validated draft.
    pub async fn update_article(&self, id: ArticleId, draft: ArticleDraft) -> StoreResult<Article> {
        let draft = draft.normalized()?;

        let result = sqlx::query(
            r#"
            UPDATE articles
            SET name = ?1, category = ?2, quantity = ?3, unit = ?4,
                unit_price = ?5, min_threshold = ?6
            WHERE id = ?7
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.category)
        .bind(draft.quantity)
        .bind(&draft.unit)
        .bind(draft.unit_price)
        .bind(draft.min_threshold)
        .bind(id.as_i64())
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found().into());
        }

        tracing::info!(article_id = %id, "article updated");
        self.get_article(id)
            .await?
            .ok_or_else(|| DomainError::not_found().into())
    }

    /// Delete an article together with its movement history, in one
    /// transaction. The cascade is enforced here, not by the database.
    pub async fn delete_article(&self, id: ArticleId) -> StoreResult<()> {
        let mut tx = self.pool().begin().await?;

        sqlx::query("DELETE FROM stock_entries WHERE article_id = ?1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM stock_exits WHERE article_id = ?1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM articles WHERE id = ?1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found().into());
        }

        tx.commit().await?;
        tracing::info!(article_id = %id, "article deleted with its movement history");
        Ok(())
    }
}

pub(crate) fn article_from_row(row: &SqliteRow) -> StoreResult<Article> {
    Ok(Article {
        id: ArticleId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        quantity: row.try_get("quantity")?,
        unit: row.try_get("unit")?,
        unit_price: row.try_get("unit_price")?,
        min_threshold: row.try_get("min_threshold")?,
        created_at: row.try_get("created_at")?,
    })
}
