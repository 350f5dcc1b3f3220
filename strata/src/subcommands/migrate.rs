use anyhow::{bail, Context};
use strata_core::{MigrationStatus, Migrator};
use yansi::Paint;

use crate::config::Config;

pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    let pool = config.sqlite().await?;
    let migrator = Migrator::with_store(pool.clone(), config.state_store()?);
    let dir = config.schema_dir();
    tracing::info!(
        "Migrating {} with schema files from {}",
        config.data().display(),
        dir.display()
    );

    // Losing the race drops the run future, and with it the open transaction, which rolls back.
    let result = tokio::select! {
        report = migrator.run(&dir) => Some(report),
        _ = elegant_departure::tokio::depart().on_termination() => None,
        _ = tokio::signal::ctrl_c() => None,
    };
    pool.close().await;

    let Some(report) = result else {
        tracing::error!("Interrupted, migration rolled back.");
        bail!("Migration interrupted")
    };
    let report =
        report.with_context(|| format!("Unable to migrate schema from {}", dir.display()))?;

    if report.is_noop() {
        println!(
            "Schema already up to date (version {}).",
            display_version(report.latest)
        );
    } else {
        for file in &report.applied {
            println!("{} {}", Paint::green("applied"), file.name);
        }
        println!(
            "Schema migrated from version {} to {}.",
            display_version(report.previous),
            display_version(report.latest)
        );
    }
    Ok(())
}

pub async fn status(config: &Config) -> anyhow::Result<()> {
    let pool = config.sqlite().await?;
    let migrator = Migrator::with_store(pool.clone(), config.state_store()?);
    let dir = config.schema_dir();

    let status = migrator
        .status(&dir)
        .await
        .with_context(|| format!("Unable to read schema status from {}", dir.display()));
    pool.close().await;

    print_status(&status?);
    Ok(())
}

fn print_status(status: &MigrationStatus) {
    println!("Schema version: {}", display_version(status.latest));
    if status.pending.is_empty() {
        println!("No pending migrations.");
        return;
    }
    for file in &status.pending {
        println!("{} {}", Paint::yellow("pending"), file.name);
    }
}

fn display_version(v: Option<u32>) -> String {
    v.map_or_else(|| "none".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_version() {
        assert_eq!(display_version(None), "none");
        assert_eq!(display_version(Some(12)), "12");
    }
}
