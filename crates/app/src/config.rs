//! Where the database lives.

use std::path::PathBuf;

use anyhow::Context;

/// Environment override for the database location.
pub const DB_ENV_VAR: &str = "DISHSTOCK_DB";

/// Resolve the SQLite database path: `$DISHSTOCK_DB` when set, otherwise
/// `{app_data_dir}/dishstock/stock.db`. Parent directories are created on
/// the way.
pub fn database_path() -> anyhow::Result<PathBuf> {
    if let Ok(path) = std::env::var(DB_ENV_VAR) {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory at {:?}", parent)
                })?;
            }
        }
        return Ok(path);
    }

    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut dir = base;
    dir.push("dishstock");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create data directory at {:?}", dir))?;

    dir.push("stock.db");
    Ok(dir)
}
