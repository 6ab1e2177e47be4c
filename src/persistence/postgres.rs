//! PostgreSQL implementation of the storage capability.
//!
//! Table names (`user_song_swipes`, `user_playlists`) are inherited from
//! the original Groover schema. The database clock assigns write-time
//! timestamps via column defaults, so each append is a single atomic
//! `INSERT .. RETURNING` round trip.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::LedgerStore;
use crate::config::LedgerConfig;
use crate::domain::{SongId, SwipeEvent, UserId, WatermarkEvent};
use crate::error::LedgerError;

/// PostgreSQL-backed ledger store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresLedger {
    pool: PgPool,
}

impl PostgresLedger {
    /// Creates a store around an existing connection pool.
    ///
    /// The caller is responsible for having run the migrations; prefer
    /// [`PostgresLedger::connect`] unless the pool is shared.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database described by `config` and runs the
    /// embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError::StorageFault`] if the pool cannot be
    /// established or a migration fails.
    pub async fn connect(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(std::time::Duration::from_secs(
                config.database_connect_timeout_secs,
            ))
            .connect(&config.database_url)
            .await
            .map_err(|e| LedgerError::StorageFault(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| LedgerError::StorageFault(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Rehydrates a song id read back from the database.
///
/// Every stored id passed validation on the way in, so a failure here
/// means the column was tampered with outside this crate.
fn song_from_column(raw: &str) -> Result<SongId, LedgerError> {
    SongId::new(raw).map_err(|e| LedgerError::StorageFault(format!("corrupt songid column: {e}")))
}

#[async_trait::async_trait]
impl LedgerStore for PostgresLedger {
    async fn append_swipe(
        &self,
        user: &UserId,
        song: &SongId,
        liked: bool,
    ) -> Result<SwipeEvent, LedgerError> {
        let (id, swiped_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            "INSERT INTO user_song_swipes (username, songid, liked) VALUES ($1, $2, $3) \
             RETURNING id, swiped_at",
        )
        .bind(user.as_str())
        .bind(song.as_str())
        .bind(liked)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| LedgerError::StorageFault(e.to_string()))?;

        Ok(SwipeEvent {
            id,
            user: user.clone(),
            song: song.clone(),
            liked,
            swiped_at,
        })
    }

    async fn append_watermark(&self, user: &UserId) -> Result<WatermarkEvent, LedgerError> {
        let (id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            "INSERT INTO user_playlists (username) VALUES ($1) RETURNING id, created_at",
        )
        .bind(user.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| LedgerError::StorageFault(e.to_string()))?;

        Ok(WatermarkEvent {
            id,
            user: user.clone(),
            created_at,
        })
    }

    async fn scan_swipes(&self, user: &UserId) -> Result<Vec<SwipeEvent>, LedgerError> {
        let rows = sqlx::query_as::<_, (i64, String, bool, DateTime<Utc>)>(
            "SELECT id, songid, liked, swiped_at FROM user_song_swipes \
             WHERE username = $1 ORDER BY swiped_at ASC, id ASC",
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::StorageFault(e.to_string()))?;

        rows.into_iter()
            .map(|(id, songid, liked, swiped_at)| {
                Ok(SwipeEvent {
                    id,
                    user: user.clone(),
                    song: song_from_column(&songid)?,
                    liked,
                    swiped_at,
                })
            })
            .collect()
    }

    async fn scan_watermarks(&self, user: &UserId) -> Result<Vec<WatermarkEvent>, LedgerError> {
        let rows = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            "SELECT id, created_at FROM user_playlists \
             WHERE username = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::StorageFault(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, created_at)| WatermarkEvent {
                id,
                user: user.clone(),
                created_at,
            })
            .collect())
    }
}
