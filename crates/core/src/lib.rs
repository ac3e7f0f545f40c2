//! `dishstock-core` — shared error and identifier types.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{ArticleId, StockEntryId, StockExitId, UserId};
