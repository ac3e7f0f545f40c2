//! User capabilities: seeding, authentication, provisioning.

use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use dishstock_auth::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, NewUser, Role, User, hash_password,
    verify_password,
};
use dishstock_core::{DomainError, UserId};

use crate::db::Store;
use crate::error::StoreResult;

impl Store {
    /// Seed the default administrator if and only if the user table is empty.
    pub(crate) async fn seed_default_admin(&self) -> StoreResult<()> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM users")
            .fetch_one(self.pool())
            .await?;
        let count: i64 = row.try_get("n")?;
        if count > 0 {
            return Ok(());
        }

        self.create_user(NewUser {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            role: Role::Admin,
        })
        .await?;

        tracing::warn!(
            username = DEFAULT_ADMIN_USERNAME,
            "user table was empty; seeded the default administrator account"
        );
        Ok(())
    }

    /// Look up a user by credentials.
    ///
    /// `Ok(None)` covers both unknown username and mismatched password; the
    /// caller re-prompts either way.
    pub async fn authenticate(&self, username: &str, password: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, role, created_at FROM users WHERE username = ?1",
        )
        .bind(username.trim())
        .fetch_optional(self.pool())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let stored: String = row.try_get("password_hash")?;
        if !verify_password(password, &stored)? {
            tracing::info!(username = username.trim(), "failed login attempt");
            return Ok(None);
        }

        Ok(Some(user_from_row(&row)?))
    }

    /// Create a user account. The password is hashed before it is stored;
    /// duplicate usernames are a conflict.
    pub async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let user = user.normalized()?;
        let password_hash = hash_password(&user.password)?;
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO users (username, password_hash, role, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&user.username)
        .bind(&password_hash)
        .bind(user.role.as_str())
        .bind(created_at)
        .execute(self.pool())
        .await;

        let result = match result {
            Ok(result) => result,
            Err(err) if is_unique_violation(&err) => {
                return Err(DomainError::conflict(format!(
                    "username already taken: {}",
                    user.username
                ))
                .into());
            }
            Err(err) => return Err(err.into()),
        };

        let id = UserId::new(result.last_insert_rowid());
        tracing::info!(user_id = %id, username = %user.username, role = %user.role, "user created");

        Ok(User {
            id,
            username: user.username,
            role: user.role,
            created_at,
        })
    }

    /// All user accounts, oldest first.
    pub async fn list_users(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query("SELECT id, username, role, created_at FROM users ORDER BY id")
            .fetch_all(self.pool())
            .await?;

        rows.iter().map(user_from_row).collect()
    }
}

fn user_from_row(row: &SqliteRow) -> StoreResult<User> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: UserId::new(row.try_get("id")?),
        username: row.try_get("username")?,
        role: role.parse()?,
        created_at: row.try_get("created_at")?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    async fn store() -> Store {
        Store::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn fresh_store_has_exactly_the_seeded_admin() {
        let store = store().await;
        let users = store.list_users().await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, DEFAULT_ADMIN_USERNAME);
        assert_eq!(users[0].role, Role::Admin);
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let store = store().await;
        store.seed_default_admin().await.unwrap();
        store.seed_default_admin().await.unwrap();

        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn seeded_admin_authenticates_with_default_password() {
        let store = store().await;

        let user = store
            .authenticate(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_both_miss() {
        let store = store().await;

        assert!(
            store
                .authenticate(DEFAULT_ADMIN_USERNAME, "nope")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .authenticate("ghost", DEFAULT_ADMIN_PASSWORD)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn stored_credentials_are_hashed() {
        let store = store().await;

        let row = sqlx::query("SELECT password_hash FROM users WHERE username = ?1")
            .bind(DEFAULT_ADMIN_USERNAME)
            .fetch_one(store.pool())
            .await
            .unwrap();
        let stored: String = row.try_get("password_hash").unwrap();

        assert_ne!(stored, DEFAULT_ADMIN_PASSWORD);
        assert!(stored.starts_with("pbkdf2:sha256:"));
    }

    #[tokio::test]
    async fn created_user_can_authenticate() {
        let store = store().await;

        store
            .create_user(NewUser {
                username: "marie".to_string(),
                password: "terrine42".to_string(),
                role: Role::Standard,
            })
            .await
            .unwrap();

        let user = store
            .authenticate("marie", "terrine42")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role, Role::Standard);
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let store = store().await;

        let result = store
            .create_user(NewUser {
                username: DEFAULT_ADMIN_USERNAME.to_string(),
                password: "whatever".to_string(),
                role: Role::Standard,
            })
            .await;

        assert!(matches!(
            result,
            Err(StoreError::Domain(DomainError::Conflict(_)))
        ));
    }

    #[tokio::test]
    async fn authenticate_trims_the_username() {
        let store = store().await;

        let user = store
            .authenticate("  admin ", DEFAULT_ADMIN_PASSWORD)
            .await
            .unwrap();
        assert!(user.is_some());
    }
}
