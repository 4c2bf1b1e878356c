use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::clock::FixedClock;
use crate::config::AppConfig;
use crate::state::AppState;

/// In-memory SQLite pool with the real migrations applied. One connection:
/// every `:memory:` connection is its own database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}

/// Full application state over an in-memory database, with the clock pinned
/// to `now` so daily selection is reproducible.
pub async fn test_state(now: OffsetDateTime) -> AppState {
    let db = memory_pool().await;
    AppState::from_parts(db, Arc::new(AppConfig::for_tests()), Arc::new(FixedClock(now)))
}

/// Seed `n` catalog rows. Ids are 1-based and contiguous; even seeds are
/// labelled Real, odd seeds AI.
pub async fn seed_images(db: &SqlitePool, n: i64) {
    for i in 0..n {
        sqlx::query("INSERT INTO images (url, type, explanation) VALUES (?, ?, ?)")
            .bind(format!("https://origin.example/img-{i}.jpg"))
            .bind(if i % 2 == 0 { "Real" } else { "AI" })
            .bind(format!("explanation {i}"))
            .execute(db)
            .await
            .expect("seed image");
    }
}
