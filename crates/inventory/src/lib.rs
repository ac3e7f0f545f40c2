//! Inventory domain module.
//!
//! This crate contains business rules for dishware stock, implemented purely
//! as deterministic domain logic (no IO, no storage).

pub mod article;
pub mod movement;

pub use article::{Article, ArticleDraft, CATEGORIES, DEFAULT_UNIT, StockLevel, UNITS};
pub use movement::{
    EXIT_REASONS, EntryDraft, ExitDraft, MovementKind, StockEntry, StockExit, check_exit,
};
