use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MigrationsConfig {
    pub dir: Option<PathBuf>,
    pub table: Option<String>,
}
impl MigrationsConfig {
    fn example() -> MigrationsConfig {
        MigrationsConfig {
            dir: Some("schema".into()),
            table: Some(strata_core::DEFAULT_TABLE.into()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ConfigFile {
    pub data: Option<PathBuf>,
    #[serde(default)]
    pub migrations: MigrationsConfig,
}

impl ConfigFile {
    pub fn example() -> ConfigFile {
        ConfigFile {
            data: Some("strata.db".into()),
            migrations: MigrationsConfig::example(),
        }
    }
}
