//! Movement recording and listings.
//!
//! Recording is transactional: the movement insert and the article quantity
//! update commit together or not at all.

use chrono::NaiveDate;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use dishstock_core::{ArticleId, DomainError, StockEntryId, StockExitId};
use dishstock_inventory::{EntryDraft, ExitDraft, StockEntry, StockExit, check_exit};

use crate::db::Store;
use crate::error::StoreResult;

/// A stock entry joined with its article name, as listings and the movements
/// report show it.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRecord {
    pub id: StockEntryId,
    pub article_id: ArticleId,
    pub article_name: String,
    pub quantity: i64,
    pub date: NaiveDate,
    pub supplier: Option<String>,
    pub total_price: f64,
    pub comment: Option<String>,
}

/// A stock exit joined with its article name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitRecord {
    pub id: StockExitId,
    pub article_id: ArticleId,
    pub article_name: String,
    pub quantity: i64,
    pub date: NaiveDate,
    pub reason: String,
    pub actor: Option<String>,
    pub comment: Option<String>,
}

impl Store {
    /// Record a stock entry and increment the article quantity, in one
    /// transaction.
    pub async fn record_entry(&self, draft: EntryDraft) -> StoreResult<StockEntry> {
        let draft = draft.normalized()?;
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query("UPDATE articles SET quantity = quantity + ?1 WHERE id = ?2")
            .bind(draft.quantity)
            .bind(draft.article_id.as_i64())
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found().into());
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO stock_entries (article_id, quantity, entry_date, supplier, total_price, comment)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(draft.article_id.as_i64())
        .bind(draft.quantity)
        .bind(draft.date)
        .bind(&draft.supplier)
        .bind(draft.total_price)
        .bind(&draft.comment)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let id = StockEntryId::new(inserted.last_insert_rowid());
        tracing::info!(
            entry_id = %id,
            article_id = %draft.article_id,
            quantity = draft.quantity,
            "stock entry recorded"
        );

        Ok(StockEntry {
            id,
            article_id: draft.article_id,
            quantity: draft.quantity,
            date: draft.date,
            supplier: draft.supplier,
            total_price: draft.total_price,
            comment: draft.comment,
        })
    }

    /// Record a stock exit and decrement the article quantity, in one
    /// transaction.
    ///
    /// Rejected with [`DomainError::InsufficientStock`] when the requested
    /// quantity exceeds the on-hand quantity; a rejection writes nothing.
    pub async fn record_exit(&self, draft: ExitDraft) -> StoreResult<StockExit> {
        let draft = draft.normalized()?;
        let mut tx = self.pool().begin().await?;

        let row = sqlx::query("SELECT quantity FROM articles WHERE id = ?1")
            .bind(draft.article_id.as_i64())
            .fetch_optional(&mut *tx)
            .await?;
        let on_hand: i64 = match row {
            Some(row) => row.try_get("quantity")?,
            None => return Err(DomainError::not_found().into()),
        };
        check_exit(on_hand, draft.quantity)?;

        // The WHERE clause re-checks on-hand; a raced update affects zero rows.
        let result = sqlx::query(
            "UPDATE articles SET quantity = quantity - ?1 WHERE id = ?2 AND quantity >= ?1",
        )
        .bind(draft.quantity)
        .bind(draft.article_id.as_i64())
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::insufficient_stock(on_hand, draft.quantity).into());
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO stock_exits (article_id, quantity, exit_date, reason, actor, comment)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(draft.article_id.as_i64())
        .bind(draft.quantity)
        .bind(draft.date)
        .bind(&draft.reason)
        .bind(&draft.actor)
        .bind(&draft.comment)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let id = StockExitId::new(inserted.last_insert_rowid());
        tracing::info!(
            exit_id = %id,
            article_id = %draft.article_id,
            quantity = draft.quantity,
            reason = %draft.reason,
            "stock exit recorded"
        );

        Ok(StockExit {
            id,
            article_id: draft.article_id,
            quantity: draft.quantity,
            date: draft.date,
            reason: draft.reason,
            actor: draft.actor,
            comment: draft.comment,
        })
    }

    /// Stock entries between two dates (inclusive), newest first.
    pub async fn list_entries_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<EntryRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.article_id, a.name AS article_name, e.quantity,
                   e.entry_date, e.supplier, e.total_price, e.comment
            FROM stock_entries e
            JOIN articles a ON a.id = e.article_id
            WHERE e.entry_date BETWEEN ?1 AND ?2
            ORDER BY e.entry_date DESC, e.id DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(entry_record_from_row).collect()
    }

    /// The most recent stock entries, newest first.
    pub async fn recent_entries(&self, limit: i64) -> StoreResult<Vec<EntryRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.article_id, a.name AS article_name, e.quantity,
                   e.entry_date, e.supplier, e.total_price, e.comment
            FROM stock_entries e
            JOIN articles a ON a.id = e.article_id
            ORDER BY e.entry_date DESC, e.id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(entry_record_from_row).collect()
    }

    /// Stock exits between two dates (inclusive), newest first.
    pub async fn list_exits_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StoreResult<Vec<ExitRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.article_id, a.name AS article_name, s.quantity,
                   s.exit_date, s.reason, s.actor, s.comment
            FROM stock_exits s
            JOIN articles a ON a.id = s.article_id
            WHERE s.exit_date BETWEEN ?1 AND ?2
            ORDER BY s.exit_date DESC, s.id DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(exit_record_from_row).collect()
    }

    /// The most recent stock exits, newest first.
    pub async fn recent_exits(&self, limit: i64) -> StoreResult<Vec<ExitRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.article_id, a.name AS article_name, s.quantity,
                   s.exit_date, s.reason, s.actor, s.comment
            FROM stock_exits s
            JOIN articles a ON a.id = s.article_id
            ORDER BY s.exit_date DESC, s.id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(exit_record_from_row).collect()
    }
}

fn entry_record_from_row(row: &SqliteRow) -> StoreResult<EntryRecord> {
    Ok(EntryRecord {
        id: StockEntryId::new(row.try_get("id")?),
        article_id: ArticleId::new(row.try_get("article_id")?),
        article_name: row.try_get("article_name")?,
        quantity: row.try_get("quantity")?,
        date: row.try_get("entry_date")?,
        supplier: row.try_get("supplier")?,
        total_price: row.try_get("total_price")?,
        comment: row.try_get("comment")?,
    })
}

fn exit_record_from_row(row: &SqliteRow) -> StoreResult<ExitRecord> {
    Ok(ExitRecord {
        id: StockExitId::new(row.try_get("id")?),
        article_id: ArticleId::new(row.try_get("article_id")?),
        article_name: row.try_get("article_name")?,
        quantity: row.try_get("quantity")?,
        date: row.try_get("exit_date")?,
        reason: row.try_get("reason")?,
        actor: row.try_get("actor")?,
        comment: row.try_get("comment")?,
    })
}
