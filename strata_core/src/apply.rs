use sqlx::{Sqlite, Transaction};

use crate::{split_statements, MigrateError, MigrationFile, Result, StateStore, VersionCatalog};

/// What a single run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Version recorded before the run.
    pub previous: Option<u32>,
    /// Version recorded after the run.
    pub latest: Option<u32>,
    pub applied: Vec<MigrationFile>,
    /// Number of statements executed across all applied files.
    pub statements: usize,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Applies every file of `catalog` above `last_applied` through `tx`, then records the highest
/// applied version in the same transaction. Stops at the first failing statement; the caller
/// is expected to drop the transaction in that case.
pub async fn apply_pending(
    tx: &mut Transaction<'_, Sqlite>,
    catalog: &VersionCatalog,
    store: &StateStore,
    last_applied: Option<u32>,
) -> Result<MigrationReport> {
    let mut report = MigrationReport {
        previous: last_applied,
        latest: last_applied,
        ..Default::default()
    };

    for file in catalog.pending(last_applied) {
        let path = catalog.path_of(file);
        let sql = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| MigrateError::MigrationFileRead { path, source })?;

        tracing::info!("Applying migration {} (version {})", file.name, file.version);
        for statement in split_statements(&sql) {
            tracing::debug!("Executing statement from {}", file.name);
            if let Err(source) = sqlx::query(statement).execute(&mut *tx).await {
                tracing::error!("Migration {} failed: {source}", file.name);
                return Err(MigrateError::StatementExecution {
                    file: file.name.clone(),
                    version: file.version,
                    statement: statement.to_owned(),
                    source,
                });
            }
            report.statements += 1;
        }

        report.latest = Some(file.version);
        report.applied.push(file.clone());
    }

    match report.applied.last() {
        Some(last) => store.set_latest_version(tx, last.version).await?,
        None => tracing::info!("Schema is up to date at version {last_applied:?}"),
    }

    Ok(report)
}
