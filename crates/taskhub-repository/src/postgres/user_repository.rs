//! PostgreSQL user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use sqlx::FromRow;
use std::sync::Arc;
use taskhub_core::{NewUser, TaskhubError, TaskhubResult, User, UserId, UserRole};
use tracing::debug;

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password: String,
    role: String,
    full_name: String,
}

impl TryFrom<UserRow> for User {
    type Error = TaskhubError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&row.role)
            .ok_or_else(|| TaskhubError::Internal(format!("Invalid role in database: {}", row.role)))?;

        Ok(User {
            id: UserId::new(row.id),
            username: row.username,
            password_hash: row.password,
            role,
            full_name: row.full_name,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> TaskhubResult<Vec<User>> {
        debug!("Finding all users");

        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, role, full_name FROM users ORDER BY id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(&self, id: UserId) -> TaskhubResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, role, full_name FROM users WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> TaskhubResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, role, full_name FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, user: &NewUser) -> TaskhubResult<User> {
        debug!("Saving new user: {}", user.username);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password, role, full_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password, role, full_name
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.full_name)
        .fetch_one(self.pool.inner())
        .await?;

        User::try_from(row)
    }

    async fn update(&self, user: &User) -> TaskhubResult<Option<User>> {
        debug!("Updating user: {}", user.id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $1, password = $2, role = $3, full_name = $4
            WHERE id = $5
            RETURNING id, username, password, role, full_name
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.full_name)
        .bind(user.id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn delete(&self, id: UserId) -> TaskhubResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for PgUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgUserRepository").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str) -> UserRow {
        UserRow {
            id: 3,
            username: "carol".to_string(),
            password: "$argon2id$stub".to_string(),
            role: role.to_string(),
            full_name: "Carol".to_string(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let user = User::try_from(row("admin")).unwrap();
        assert_eq!(user.id, UserId::new(3));
        assert_eq!(user.password_hash, "$argon2id$stub");
        assert!(user.is_admin());
    }

    #[test]
    fn test_row_with_unknown_role_is_rejected() {
        let err = User::try_from(row("root")).unwrap_err();
        assert!(matches!(err, TaskhubError::Internal(_)));
    }
}
