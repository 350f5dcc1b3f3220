use std::path::Path;

use sqlx::SqlitePool;

use crate::{
    apply_pending, MigrateError, MigrationFile, MigrationReport, Result, StateStore,
    VersionCatalog,
};

/// Recorded version and the files a run would apply, without applying them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub latest: Option<u32>,
    pub pending: Vec<MigrationFile>,
}

/// Brings a database up to date with a directory of numbered SQL files.
///
/// Every run reads the recorded version and the directory afresh, so running on each process
/// start is safe: once the database is current, a run executes nothing.
#[derive(Debug, Clone)]
pub struct Migrator {
    pool: SqlitePool,
    store: StateStore,
}

impl Migrator {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_store(pool, StateStore::default())
    }

    pub fn with_store(pool: SqlitePool, store: StateStore) -> Self {
        Self { pool, store }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub async fn run(&self, dir: impl AsRef<Path>) -> Result<MigrationReport> {
        let (last_applied, catalog) = self.prepare(dir.as_ref()).await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|source| MigrateError::Transaction {
                action: "begin",
                source,
            })?;

        // Any early return drops `tx`, which rolls it back.
        let report = apply_pending(&mut tx, &catalog, &self.store, last_applied).await?;

        tx.commit()
            .await
            .map_err(|source| MigrateError::Transaction {
                action: "commit",
                source,
            })?;

        if !report.is_noop() {
            tracing::info!(
                "Applied {} migrations ({} statements), schema now at version {:?}",
                report.applied.len(),
                report.statements,
                report.latest
            );
        }
        Ok(report)
    }

    pub async fn status(&self, dir: impl AsRef<Path>) -> Result<MigrationStatus> {
        let (latest, catalog) = self.prepare(dir.as_ref()).await?;
        Ok(MigrationStatus {
            latest,
            pending: catalog.pending(latest).cloned().collect(),
        })
    }

    async fn prepare(&self, dir: &Path) -> Result<(Option<u32>, VersionCatalog)> {
        self.store.ensure_table(&self.pool).await?;

        let last_applied = self.store.latest_version(&self.pool).await?;
        tracing::info!("Current schema version {last_applied:?}");

        let catalog = VersionCatalog::load(dir)?;
        tracing::debug!(
            "Found {} migration files in {}",
            catalog.len(),
            dir.display()
        );

        Ok((last_applied, catalog))
    }
}
