//! `dishstock-auth` — login identity and credential hashing.
//!
//! This crate is intentionally decoupled from storage: it defines the user
//! types and the salted hash format, nothing else.

pub mod password;
pub mod user;

pub use password::{PasswordError, hash_password, verify_password};
pub use user::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, NewUser, Role, User};
