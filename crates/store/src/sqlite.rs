//! SQLite backend for templates, refinement phrases and the trigger log.
//!
//! Uses a single SQLite database file with three tables:
//! - `prompt_templates`: one body per template category
//! - `refinements`: phrase pools keyed by topic
//! - `trigger_events`: append-only trigger log with millisecond timestamps
//!
//! Random refinement selection is delegated to SQLite's `RANDOM()`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use sustainly_core::error::StoreError;
use sustainly_core::{
    Polarity, RefinementTopic, TemplateCategory, TemplateStore, TriggerEvent, TriggerKind,
    TriggerLog, TriggerTotal,
};
use tracing::{debug, info};

fn is_memory_url(path: &str) -> bool {
    path.contains(":memory:") || path.contains("mode=memory")
}

/// A SQLite store implementing both [`TemplateStore`] and [`TriggerLog`].
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) a SQLite store.
    ///
    /// Tables and indexes are created automatically. Pass
    /// `"sqlite::memory:"` for an ephemeral database; it is served by a
    /// single connection that is never reaped, so every query sees the same
    /// data for the lifetime of the store.
    pub async fn new(path: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| StoreError::Storage(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool_options = if is_memory_url(path) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(4)
        };
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Storage(format!("Failed to open SQLite: {e}")))?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("SQLite store initialized at {path}");
        Ok(store)
    }

    /// Create from an existing pool (useful for testing).
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS prompt_templates (
                category   TEXT PRIMARY KEY NOT NULL,
                body       TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("prompt_templates table: {e}")))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS refinements (
                id     INTEGER PRIMARY KEY AUTOINCREMENT,
                topic  TEXT NOT NULL,
                phrase TEXT NOT NULL,
                UNIQUE (topic, phrase)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("refinements table: {e}")))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS trigger_events (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                kind           TEXT NOT NULL,
                polarity       TEXT NOT NULL,
                value          REAL NOT NULL,
                occurred_at_ms INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("trigger_events table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_trigger_events_occurred_at ON trigger_events(occurred_at_ms)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("occurred_at index: {e}")))?;

        debug!("SQLite migrations complete");
        Ok(())
    }

    fn row_to_total(row: &sqlx::sqlite::SqliteRow) -> Result<TriggerTotal, StoreError> {
        let kind: String = row
            .try_get("kind")
            .map_err(|e| StoreError::QueryFailed(format!("kind column: {e}")))?;
        let polarity: String = row
            .try_get("polarity")
            .map_err(|e| StoreError::QueryFailed(format!("polarity column: {e}")))?;
        let total: f64 = row
            .try_get("total")
            .map_err(|e| StoreError::QueryFailed(format!("total column: {e}")))?;

        Ok(TriggerTotal {
            kind: kind
                .parse::<TriggerKind>()
                .map_err(|k| StoreError::QueryFailed(format!("unknown trigger kind '{k}'")))?,
            polarity: polarity
                .parse::<Polarity>()
                .map_err(|p| StoreError::QueryFailed(format!("unknown polarity '{p}'")))?,
            total,
        })
    }
}

#[async_trait]
impl TemplateStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn fetch_template(
        &self,
        category: TemplateCategory,
    ) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT body FROM prompt_templates WHERE category = ?")
            .bind(category.key())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("fetch template: {e}")))?;

        row.map(|r| {
            r.try_get::<String, _>("body")
                .map_err(|e| StoreError::QueryFailed(format!("body column: {e}")))
        })
        .transpose()
    }

    async fn fetch_random_refinement(
        &self,
        topic: RefinementTopic,
    ) -> Result<Option<String>, StoreError> {
        let row = sqlx::query(
            "SELECT phrase FROM refinements WHERE topic = ? ORDER BY RANDOM() LIMIT 1",
        )
        .bind(topic.key())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::QueryFailed(format!("fetch refinement: {e}")))?;

        row.map(|r| {
            r.try_get::<String, _>("phrase")
                .map_err(|e| StoreError::QueryFailed(format!("phrase column: {e}")))
        })
        .transpose()
    }

    async fn put_template(&self, category: TemplateCategory, body: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO prompt_templates (category, body, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(category) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(category.key())
        .bind(body)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(format!("put template: {e}")))?;
        Ok(())
    }

    async fn add_refinement(&self, topic: RefinementTopic, phrase: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT OR IGNORE INTO refinements (topic, phrase) VALUES (?, ?)")
            .bind(topic.key())
            .bind(phrase)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Storage(format!("add refinement: {e}")))?;
        Ok(())
    }

    async fn refinement_count(&self, topic: RefinementTopic) -> Result<usize, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM refinements WHERE topic = ?")
            .bind(topic.key())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("count refinements: {e}")))?;
        let n: i64 = row
            .try_get("n")
            .map_err(|e| StoreError::QueryFailed(format!("n column: {e}")))?;
        Ok(n as usize)
    }
}

#[async_trait]
impl TriggerLog for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn record(&self, event: TriggerEvent) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO trigger_events (kind, polarity, value, occurred_at_ms) VALUES (?, ?, ?, ?)",
        )
        .bind(event.kind.slug())
        .bind(event.polarity.as_str())
        .bind(event.value)
        .bind(event.occurred_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(format!("record trigger: {e}")))?;
        Ok(())
    }

    async fn totals(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<TriggerTotal>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT kind, polarity, SUM(value) AS total
            FROM trigger_events
            WHERE occurred_at_ms >= ? AND occurred_at_ms < ?
            GROUP BY kind, polarity
            "#,
        )
        .bind(since.timestamp_millis())
        .bind(until.timestamp_millis())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::QueryFailed(format!("trigger totals: {e}")))?;

        let mut totals = rows
            .iter()
            .map(Self::row_to_total)
            .collect::<Result<Vec<_>, _>>()?;
        totals.sort_by_key(|t| {
            (
                TriggerKind::ALL.iter().position(|k| *k == t.kind),
                t.polarity == Polarity::Unsustainable,
            )
        });
        Ok(totals)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM trigger_events")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("count triggers: {e}")))?;
        let n: i64 = row
            .try_get("n")
            .map_err(|e| StoreError::QueryFailed(format!("n column: {e}")))?;
        Ok(n as usize)
    }
}
