use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, MigrateError>;

#[derive(thiserror::Error, Debug)]
pub enum MigrateError {
    #[error("malformed migration file name {name:?}: {reason}")]
    MalformedMigrationName { name: String, reason: &'static str },

    #[error("migration version {version} is used by both {first:?} and {second:?}")]
    DuplicateMigrationVersion {
        version: u32,
        first: String,
        second: String,
    },

    #[error("unable to read migrations directory {}: {source}", .path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read migration file {}: {source}", .path.display())]
    MigrationFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("migration {file} (version {version}) failed on statement `{statement}`: {source}")]
    StatementExecution {
        file: String,
        version: u32,
        statement: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("unable to {action} schema version: {source}")]
    StateStore {
        action: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("recorded schema version {value} is not a valid migration version")]
    CorruptState { value: i64 },

    #[error("invalid bookkeeping table name {0:?}")]
    InvalidTableName(String),

    #[error("unable to {action} migration transaction: {source}")]
    Transaction {
        action: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl MigrateError {
    /// The file name the error relates to, if any.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            MigrateError::MalformedMigrationName { name, .. } => Some(name),
            MigrateError::DuplicateMigrationVersion { second, .. } => Some(second),
            MigrateError::StatementExecution { file, .. } => Some(file),
            MigrateError::MigrationFileRead { path, .. } => {
                path.file_name().and_then(|n| n.to_str())
            }
            _ => None,
        }
    }
}
