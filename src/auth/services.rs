use anyhow::Context;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::dto::{AuthResponse, LoginRequest, RegisterRequest};
use super::{password, repo};
use crate::error::ApiError;
use crate::stats;

/// Register a new account, claim a legacy password-less row, and merge any
/// guest identity. Everything after the duplicate check runs in one
/// transaction: a crash mid-merge must never leave a half-migrated guest.
pub async fn register(
    db: &SqlitePool,
    salt: &str,
    req: RegisterRequest,
) -> Result<AuthResponse, ApiError> {
    let hash = password::hash_password(&req.password, salt);
    let token = Uuid::new_v4().to_string();

    let existing = repo::find_by_email(db, &req.email).await?;
    if let Some(user) = &existing {
        if !user.password_hash.is_empty() {
            return Err(ApiError::Conflict(
                "Email already exists and has a password.".into(),
            ));
        }
    }

    let mut tx = db.begin().await.context("begin registration")?;

    if existing.is_some() {
        repo::claim_tx(&mut tx, &req.email, &hash, &token).await?;
    } else {
        repo::insert_tx(&mut tx, &req.email, &hash, &token).await?;
    }

    if let Some(guest_id) = req.guest_id.as_deref() {
        if stats::repo::exists_tx(&mut tx, &req.email).await? {
            // The account already has stats; the guest run is discarded.
            stats::repo::delete_tx(&mut tx, guest_id).await?;
        } else {
            stats::repo::rekey_tx(&mut tx, &req.email, guest_id).await?;
        }
        repo::delete_tx(&mut tx, guest_id).await?;
    }

    tx.commit().await.context("commit registration")?;

    Ok(AuthResponse {
        success: true,
        email: req.email,
        token,
    })
}

/// Check credentials and rotate the bearer token. A miss leaves the stored
/// token untouched.
pub async fn login(db: &SqlitePool, salt: &str, req: LoginRequest) -> Result<AuthResponse, ApiError> {
    let hash = password::hash_password(&req.password, salt);

    let user = repo::find_by_credentials(db, &req.email, &hash)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".into()))?;

    let token = Uuid::new_v4().to_string();
    repo::update_token(db, &user.email, &token).await?;

    Ok(AuthResponse {
        success: true,
        email: user.email,
        token,
    })
}
