use std::path::PathBuf;

use anyhow::Context;
use sqlx::SqlitePool;
use strata_core::StateStore;

use super::{Cli, ConfigFile};

#[derive(Clone, Debug)]
pub struct Config {
    pub cli: Cli,
    pub file: ConfigFile,
}

impl Config {
    pub fn new(cli: Cli, file: ConfigFile) -> Self {
        Self { cli, file }
    }

    pub async fn sqlite(&self) -> anyhow::Result<SqlitePool> {
        let db = self.data();

        if let Some(parent) = db.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Unable to create data directory {}", parent.display()))?;
        }

        // SQLx doesn't seem to like it if a db file does not already exist, so let's create an empty one
        if !tokio::fs::try_exists(&db).await? {
            tokio::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .open(&db)
                .await?;
        }

        Ok(SqlitePool::connect(&format!("sqlite:{}", db.to_string_lossy())).await?)
    }

    pub fn state_store(&self) -> anyhow::Result<StateStore> {
        Ok(StateStore::new(&self.table())?)
    }

    pub fn data(&self) -> PathBuf {
        self.file.data.clone().unwrap_or_else(|| "strata.db".into())
    }

    pub fn schema_dir(&self) -> PathBuf {
        self.cli
            .subcommand
            .schema_dir()
            .or(self.file.migrations.dir.as_ref())
            .cloned()
            .unwrap_or_else(|| "schema".into())
    }

    pub fn table(&self) -> String {
        self.file
            .migrations
            .table
            .clone()
            .unwrap_or_else(|| strata_core::DEFAULT_TABLE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn config(args: &[&str], file: &str) -> Config {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        Config::new(cli, toml::from_str(file).unwrap())
    }

    #[test]
    fn test_defaults() {
        let config = config(&["strata", "migrate"], "");
        assert_eq!(config.data(), PathBuf::from("strata.db"));
        assert_eq!(config.schema_dir(), PathBuf::from("schema"));
        assert_eq!(config.table(), "schema_migrations");
    }

    #[test]
    fn test_file_values() {
        let config = config(
            &["strata", "status"],
            r#"
            data = "var/indexer.db"

            [migrations]
            dir = "database/schema"
            table = "schema_juno"
            "#,
        );
        assert_eq!(config.data(), PathBuf::from("var/indexer.db"));
        assert_eq!(config.schema_dir(), PathBuf::from("database/schema"));
        assert_eq!(config.state_store().unwrap().table(), "schema_juno");
    }

    #[test]
    fn test_flag_overrides_file() {
        let config = config(
            &["strata", "migrate", "--schema-dir", "override"],
            "[migrations]\ndir = \"database/schema\"\n",
        );
        assert_eq!(config.schema_dir(), PathBuf::from("override"));
    }

    #[test]
    fn test_invalid_table() {
        let config = config(&["strata", "migrate"], "[migrations]\ntable = \"bad name\"\n");
        assert!(config.state_store().is_err());
    }

    #[test]
    fn test_example_is_valid_toml() {
        let example = toml::to_string(&ConfigFile::example()).unwrap();
        let config = config(&["strata", "migrate"], &example);
        assert_eq!(config.data(), PathBuf::from("strata.db"));
        assert_eq!(config.table(), "schema_migrations");
    }

    #[tokio::test]
    async fn test_sqlite_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("nested").join("strata.db");
        let file = format!("data = {:?}\n", data.to_string_lossy());
        let config = config(&["strata", "migrate"], &file);

        let pool = config.sqlite().await.unwrap();
        assert!(data.is_file());
        pool.close().await;
    }
}
