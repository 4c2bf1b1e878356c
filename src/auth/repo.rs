use anyhow::Context;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub email: String,
    pub password_hash: String,
    pub token: String,
}

pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT email, password_hash, token
          FROM users
         WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await
    .context("find user by email")?;
    Ok(user)
}

/// Credential check in one query: a row only matches when both email and
/// hash line up.
pub async fn find_by_credentials(
    db: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT email, password_hash, token
          FROM users
         WHERE email = ? AND password_hash = ?
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .fetch_optional(db)
    .await
    .context("find user by credentials")?;
    Ok(user)
}

pub async fn update_token(db: &SqlitePool, email: &str, token: &str) -> anyhow::Result<()> {
    sqlx::query("UPDATE users SET token = ? WHERE email = ?")
        .bind(token)
        .bind(email)
        .execute(db)
        .await
        .context("update token")?;
    Ok(())
}

/// Insert a fully credentialed user within a transaction.
pub async fn insert_tx(
    tx: &mut Transaction<'_, Sqlite>,
    email: &str,
    password_hash: &str,
    token: &str,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO users (email, password_hash, token) VALUES (?, ?, ?)")
        .bind(email)
        .bind(password_hash)
        .bind(token)
        .execute(&mut **tx)
        .await
        .context("insert user")?;
    Ok(())
}

/// Claim a legacy row: give a password-less user its hash and token.
pub async fn claim_tx(
    tx: &mut Transaction<'_, Sqlite>,
    email: &str,
    password_hash: &str,
    token: &str,
) -> anyhow::Result<()> {
    sqlx::query("UPDATE users SET password_hash = ?, token = ? WHERE email = ?")
        .bind(password_hash)
        .bind(token)
        .bind(email)
        .execute(&mut **tx)
        .await
        .context("claim user")?;
    Ok(())
}

/// Make sure a user row exists for a stats save; no-op when it already does.
pub async fn ensure_tx(tx: &mut Transaction<'_, Sqlite>, email: &str) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO users (email) VALUES (?) ON CONFLICT (email) DO NOTHING")
        .bind(email)
        .execute(&mut **tx)
        .await
        .context("ensure user")?;
    Ok(())
}

/// Remove a guest's user row after its stats were merged or discarded.
pub async fn delete_tx(tx: &mut Transaction<'_, Sqlite>, email: &str) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM users WHERE email = ?")
        .bind(email)
        .execute(&mut **tx)
        .await
        .context("delete user")?;
    Ok(())
}
