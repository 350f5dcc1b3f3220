use regex::Regex;
use sqlx::{Executor, Sqlite, Transaction};

use crate::{MigrateError, Result};

pub const DEFAULT_TABLE: &str = "schema_migrations";

/// The single bookkeeping row that records the highest applied migration version.
///
/// The table's primary key is a boolean constrained to `TRUE`, so at most one row can exist and
/// the upsert in [`StateStore::set_latest_version`] always targets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStore {
    table: String,
}

impl Default for StateStore {
    fn default() -> Self {
        StateStore {
            table: DEFAULT_TABLE.to_owned(),
        }
    }
}

impl StateStore {
    pub fn new(table: &str) -> Result<StateStore> {
        let valid = Regex::new(r"\A[A-Za-z_][A-Za-z0-9_]*\z")
            .map(|r| r.is_match(table))
            .unwrap_or(false);
        if !valid {
            return Err(MigrateError::InvalidTableName(table.to_owned()));
        }

        Ok(StateStore {
            table: table.to_owned(),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub async fn ensure_table(&self, conn: impl Executor<'_, Database = Sqlite>) -> Result<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                latest_number INTEGER,
                one_row_id BOOLEAN NOT NULL DEFAULT TRUE PRIMARY KEY,
                CHECK (one_row_id)
            );",
            self.table
        );
        sqlx::query(&sql)
            .execute(conn)
            .await
            .map_err(|source| MigrateError::StateStore {
                action: "create table for",
                source,
            })?;
        tracing::debug!("Bookkeeping table {} ready", self.table);
        Ok(())
    }

    /// The recorded version, or `None` if no migration was ever applied.
    pub async fn latest_version(
        &self,
        conn: impl Executor<'_, Database = Sqlite>,
    ) -> Result<Option<u32>> {
        let sql = format!(
            "SELECT latest_number FROM {} ORDER BY latest_number DESC LIMIT 1;",
            self.table
        );
        let row = sqlx::query_as::<_, (Option<i64>,)>(&sql)
            .fetch_optional(conn)
            .await
            .map_err(|source| MigrateError::StateStore {
                action: "read",
                source,
            })?;

        row.and_then(|(version,)| version)
            .map(|value| u32::try_from(value).map_err(|_| MigrateError::CorruptState { value }))
            .transpose()
    }

    pub async fn set_latest_version(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        version: u32,
    ) -> Result<()> {
        let sql = format!(
            "INSERT INTO {} (latest_number) VALUES (?)
            ON CONFLICT (one_row_id) DO UPDATE SET latest_number = excluded.latest_number;",
            self.table
        );
        sqlx::query(&sql)
            .bind(i64::from(version))
            .execute(&mut *tx)
            .await
            .map_err(|source| MigrateError::StateStore {
                action: "record",
                source,
            })?;
        tracing::info!("Recorded schema version {version}");
        Ok(())
    }
}
