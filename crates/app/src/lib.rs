//! `dishstock-app` — the interactive console application.
//!
//! Wires the store, the reports and the low-stock watcher behind a
//! line-oriented menu. All state lives in the store; this crate only
//! prompts, prints and dispatches.

pub mod actions;
pub mod config;
pub mod console;
pub mod watcher;
