#![allow(unused)]

use std::path::Path;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tempfile::TempDir;

pub struct Fixture {
    pub schema: TempDir,
    pub data: TempDir,
    pub pool: SqlitePool,
}

impl Fixture {
    pub async fn new() -> Fixture {
        let schema = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let options = SqliteConnectOptions::new()
            .filename(data.path().join("test.db"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        Fixture { schema, data, pool }
    }

    pub fn dir(&self) -> &Path {
        self.schema.path()
    }

    pub fn write(&self, name: &str, sql: &str) {
        std::fs::write(self.schema.path().join(name), sql).unwrap();
    }

    pub async fn columns(&self, table: &str) -> Vec<String> {
        sqlx::query_as::<_, (String,)>("SELECT name FROM pragma_table_info(?) ORDER BY cid;")
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .unwrap()
            .into_iter()
            .map(|(name,)| name)
            .collect()
    }

    pub async fn table_exists(&self, table: &str) -> bool {
        let (count,) = sqlx::query_as::<_, (i64,)>(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?;",
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await
        .unwrap();
        count > 0
    }

    pub async fn applied_order(&self) -> Vec<i64> {
        sqlx::query_as::<_, (i64,)>("SELECT version FROM applied_log ORDER BY id;")
            .fetch_all(&self.pool)
            .await
            .unwrap()
            .into_iter()
            .map(|(v,)| v)
            .collect()
    }
}
