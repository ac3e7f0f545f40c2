//! Background low-stock watcher.

use std::time::Duration;

use dishstock_store::Store;

/// How often stock levels are re-checked.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Spawn the periodic low-stock check. The task runs until the process
/// exits.
pub fn spawn(store: Store) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CHECK_INTERVAL);
        // interval's first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match store.low_stock_alert_count().await {
                Ok(0) => {}
                Ok(count) => {
                    tracing::warn!(count, "articles at or below their low-stock threshold");
                }
                Err(err) => tracing::error!(error = %err, "low-stock check failed"),
            }
        }
    })
}
