//! Integration tests across the full store capability set.
//!
//! Exercises: articles → movements → aggregates against one database, the
//! way the application drives it.
//!
//! Verifies:
//! - On-hand stock always equals initial quantity plus entries minus exits
//! - A rejected exit leaves no trace anywhere
//! - Deleting an article removes its movement history with it
//! - The seeded administrator can log in out of the box

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use dishstock_auth::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, Role};
    use dishstock_core::DomainError;
    use dishstock_inventory::{Article, ArticleDraft, EntryDraft, ExitDraft, StockLevel};

    use crate::db::Store;
    use crate::error::StoreError;

    async fn store() -> Store {
        Store::open_in_memory().await.unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    async fn seed_article(store: &Store, name: &str, quantity: i64) -> Article {
        store
            .insert_article(ArticleDraft {
                name: name.to_string(),
                category: "Plates".to_string(),
                quantity,
                unit: String::new(),
                unit_price: 2.0,
                min_threshold: 10,
            })
            .await
            .unwrap()
    }

    fn entry(article: &Article, quantity: i64, date: NaiveDate) -> EntryDraft {
        EntryDraft {
            article_id: article.id,
            quantity,
            date,
            supplier: Some("Hôtel du Parc supplies".to_string()),
            total_price: quantity as f64 * 1.5,
            comment: None,
        }
    }

    fn exit(article: &Article, quantity: i64, date: NaiveDate) -> ExitDraft {
        ExitDraft {
            article_id: article.id,
            quantity,
            date,
            reason: "Use".to_string(),
            actor: None,
            comment: None,
        }
    }

    async fn on_hand(store: &Store, article: &Article) -> i64 {
        let Some(current) = store.get_article(article.id).await.unwrap() else {
            panic!("article disappeared");
        };
        current.quantity
    }

    #[tokio::test]
    async fn stock_ledger_stays_consistent_through_a_working_day() {
        let store = store().await;
        let plates = seed_article(&store, "Dinner plate", 5).await;
        assert_eq!(plates.stock_level(), StockLevel::Low);

        store.record_entry(entry(&plates, 20, day(1))).await.unwrap();
        assert_eq!(on_hand(&store, &plates).await, 25);

        let rejected = store.record_exit(exit(&plates, 30, day(2))).await;
        let Err(StoreError::Domain(DomainError::InsufficientStock {
            available,
            requested,
        })) = rejected
        else {
            panic!("oversized exit was not rejected");
        };
        assert_eq!((available, requested), (25, 30));
        assert_eq!(on_hand(&store, &plates).await, 25);

        store.record_exit(exit(&plates, 10, day(2))).await.unwrap();

        let entries = store.list_entries_between(day(1), day(31)).await.unwrap();
        let exits = store.list_exits_between(day(1), day(31)).await.unwrap();
        let entered: i64 = entries.iter().map(|e| e.quantity).sum();
        let exited: i64 = exits.iter().map(|x| x.quantity).sum();

        assert_eq!(on_hand(&store, &plates).await, 5 + entered - exited);

        let Some(current) = store.get_article(plates.id).await.unwrap() else {
            panic!("article disappeared");
        };
        assert_eq!(current.stock_level(), StockLevel::Normal);
    }

    #[tokio::test]
    async fn rejected_exit_is_invisible_everywhere() {
        let store = store().await;
        let plates = seed_article(&store, "Dinner plate", 5).await;

        assert!(store.record_exit(exit(&plates, 6, day(2))).await.is_err());

        assert!(store.recent_exits(10).await.unwrap().is_empty());
        assert!(store.recent_movements(10).await.unwrap().is_empty());
        assert_eq!(store.sales_total_for(day(2)).await.unwrap(), 0.0);
        assert_eq!(on_hand(&store, &plates).await, 5);
    }

    #[tokio::test]
    async fn deleting_an_article_takes_its_history_with_it() {
        let store = store().await;
        let plates = seed_article(&store, "Dinner plate", 50).await;
        let glasses = seed_article(&store, "Wine glass", 50).await;

        for article in [&plates, &glasses] {
            store.record_entry(entry(article, 20, day(1))).await.unwrap();
            store.record_exit(exit(article, 5, day(2))).await.unwrap();
        }

        store.delete_article(plates.id).await.unwrap();

        assert!(store.get_article(plates.id).await.unwrap().is_none());
        let entries = store.recent_entries(50).await.unwrap();
        let exits = store.recent_exits(50).await.unwrap();
        assert!(entries.iter().all(|e| e.article_id == glasses.id));
        assert!(exits.iter().all(|x| x.article_id == glasses.id));
        assert_eq!(entries.len(), 1);
        assert_eq!(exits.len(), 1);
        assert_eq!(on_hand(&store, &glasses).await, 65);
    }

    #[tokio::test]
    async fn seeded_admin_logs_in_on_first_run() {
        let store = store().await;

        assert!(
            store
                .authenticate(DEFAULT_ADMIN_USERNAME, "not the password")
                .await
                .unwrap()
                .is_none()
        );

        let Some(admin) = store
            .authenticate(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
            .await
            .unwrap()
        else {
            panic!("seeded admin could not log in");
        };
        assert_eq!(admin.role, Role::Admin);
    }
}
