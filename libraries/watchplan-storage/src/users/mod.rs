//! Users vertical slice: accounts and credentials.

use sqlx::{Row, SqlitePool};
use watchplan_core::{error::Result, User, UserId, WatchplanError};

fn map_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
    Ok(User::with_id(
        UserId::new(row.get::<String, _>("id")),
        row.get::<String, _>("name"),
        chrono::DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
            .ok_or_else(|| WatchplanError::storage("Invalid timestamp"))?,
    ))
}

/// Create a user together with their password hash.
pub async fn create(pool: &SqlitePool, name: &str, password_hash: &str) -> Result<User> {
    let user = User::new(name);

    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO users (id, name, created_at) VALUES (?, ?, ?)")
        .bind(user.id.as_str())
        .bind(&user.name)
        .bind(user.created_at.timestamp())
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                WatchplanError::duplicate(format!("user name already taken: {name}"))
            }
            other => other.into(),
        })?;

    sqlx::query("INSERT INTO user_credentials (user_id, password_hash) VALUES (?, ?)")
        .bind(user.id.as_str())
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(user)
}

/// Look a user up by login name.
pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, name, created_at FROM users WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(map_user).transpose()
}

/// All users, ordered by name.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, name, created_at FROM users ORDER BY name")
        .fetch_all(pool)
        .await?;

    rows.iter().map(map_user).collect()
}

/// Stored password hash for a user, if any.
pub async fn get_password_hash(pool: &SqlitePool, user_id: &UserId) -> Result<Option<String>> {
    let row = sqlx::query("SELECT password_hash FROM user_credentials WHERE user_id = ?")
        .bind(user_id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("password_hash")))
}

/// Delete a user; playlists and progress cascade.
pub async fn delete(pool: &SqlitePool, user_id: &UserId) -> Result<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(WatchplanError::not_found("User", user_id.as_str()));
    }

    Ok(())
}
