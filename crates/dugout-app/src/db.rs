// SQLite persistence for composite ratings and generated lineups.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use dugout_lineup::PlayerId;
use rusqlite::{params, Connection, OptionalExtension};

/// A lineup as it was stored by `record_lineup`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredLineup {
    pub id: i64,
    pub method: String,
    pub objective: f64,
    pub player_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// SQLite-backed persistence for per-player ratings and the lineup history.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral in-memory database.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS ratings (
                player_id   TEXT PRIMARY KEY,
                rating      REAL NOT NULL,
                computed_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS lineups (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                method     TEXT NOT NULL,
                objective  REAL NOT NULL,
                player_ids TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Panics if the mutex is poisoned.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Upsert one rating per player in a single transaction. Every row in the
    /// batch shares the same `computed_at` timestamp.
    pub fn save_ratings(&self, ratings: &[(PlayerId, f64)]) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn
            .transaction()
            .context("failed to begin ratings transaction")?;
        let now = Utc::now().to_rfc3339();

        for (player_id, rating) in ratings {
            tx.execute(
                "INSERT INTO ratings (player_id, rating, computed_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(player_id) DO UPDATE SET
                    rating      = excluded.rating,
                    computed_at = excluded.computed_at",
                params![player_id.to_string(), rating, now],
            )
            .context("failed to upsert rating")?;
        }

        tx.commit().context("failed to commit ratings")?;
        Ok(())
    }

    /// Most recent stored rating for a player, if any.
    pub fn load_rating(&self, player_id: &PlayerId) -> Result<Option<f64>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT rating FROM ratings WHERE player_id = ?1",
            params![player_id.to_string()],
            |row| row.get(0),
        )
        .optional()
        .context("failed to query rating")
    }

    /// Append a generated lineup to the history. Returns the new row id.
    pub fn record_lineup(
        &self,
        method: &str,
        objective: f64,
        player_ids: &[PlayerId],
    ) -> Result<i64> {
        let conn = self.conn();
        let ids: Vec<String> = player_ids.iter().map(ToString::to_string).collect();
        let ids_json = serde_json::to_string(&ids).context("failed to serialize player ids")?;
        conn.execute(
            "INSERT INTO lineups (method, objective, player_ids, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![method, objective, ids_json, Utc::now().to_rfc3339()],
        )
        .context("failed to record lineup")?;
        Ok(conn.last_insert_rowid())
    }

    /// The most recently recorded lineup, or `None` when the history is empty.
    pub fn load_latest_lineup(&self) -> Result<Option<StoredLineup>> {
        let conn = self.conn();
        let row = conn
            .query_row(
                "SELECT id, method, objective, player_ids, created_at
                 FROM lineups ORDER BY id DESC LIMIT 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, f64>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()
            .context("failed to query latest lineup")?;

        let Some((id, method, objective, ids_json, created_at)) = row else {
            return Ok(None);
        };

        let player_ids: Vec<String> =
            serde_json::from_str(&ids_json).context("failed to deserialize player ids")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .context("failed to parse lineup timestamp")?
            .with_timezone(&Utc);

        Ok(Some(StoredLineup {
            id,
            method,
            objective,
            player_ids,
            created_at,
        }))
    }

    /// Number of lineups recorded so far.
    pub fn lineup_count(&self) -> Result<usize> {
        let conn = self.conn();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM lineups", [], |row| row.get(0))
            .context("failed to count lineups")?;
        Ok(count as usize)
    }
}
