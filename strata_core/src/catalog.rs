use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::{MigrateError, Result};

/// Separates the version prefix from the rest of a migration file name.
pub const VERSION_SEPARATOR: char = '-';

/// A single migration file, identified by the version prefix of its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    pub version: u32,
    pub name: String,
}

impl MigrationFile {
    pub fn parse(name: &str) -> Result<MigrationFile> {
        Ok(MigrationFile {
            version: parse_version(name)?,
            name: name.to_owned(),
        })
    }
}

/// Extract the version from a file name: "12-add_balances.sql" -> 12
pub fn parse_version(name: &str) -> Result<u32> {
    let malformed = |reason| MigrateError::MalformedMigrationName {
        name: name.to_owned(),
        reason,
    };

    let (prefix, _) = name
        .split_once(VERSION_SEPARATOR)
        .ok_or_else(|| malformed("missing '-' after the version prefix"))?;

    if prefix.trim().is_empty() {
        return Err(malformed("version prefix is empty"));
    }

    prefix
        .parse::<u32>()
        .map_err(|_| malformed("version prefix is not a number"))
}

/// The migration files of one directory, ordered by ascending version.
#[derive(Debug, Clone)]
pub struct VersionCatalog {
    dir: PathBuf,
    files: Vec<MigrationFile>,
}

impl VersionCatalog {
    pub fn load(dir: impl AsRef<Path>) -> Result<VersionCatalog> {
        let dir = dir.as_ref();
        let access = |source| MigrateError::DirectoryAccess {
            path: dir.to_owned(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(access)? {
            let entry = entry.map_err(access)?;
            if std::fs::metadata(entry.path()).map_err(access)?.is_dir() {
                continue;
            }

            let name = entry.file_name();
            let name = name
                .to_str()
                .ok_or_else(|| MigrateError::MalformedMigrationName {
                    name: name.to_string_lossy().into_owned(),
                    reason: "file name is not valid UTF-8",
                })?;
            files.push(MigrationFile::parse(name)?);
        }

        VersionCatalog::from_files(dir, files)
    }

    /// Builds a catalog from already parsed files, sorting them and rejecting duplicate versions.
    pub fn from_files(
        dir: impl Into<PathBuf>,
        mut files: Vec<MigrationFile>,
    ) -> Result<VersionCatalog> {
        files.sort_by(|a, b| a.version.cmp(&b.version).then_with(|| a.name.cmp(&b.name)));

        if let Some((first, second)) = files
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.version == b.version)
        {
            return Err(MigrateError::DuplicateMigrationVersion {
                version: first.version,
                first: first.name.clone(),
                second: second.name.clone(),
            });
        }

        Ok(VersionCatalog {
            dir: dir.into(),
            files,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn files(&self) -> &[MigrationFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn latest(&self) -> Option<&MigrationFile> {
        self.files.last()
    }

    pub fn path_of(&self, file: &MigrationFile) -> PathBuf {
        self.dir.join(&file.name)
    }

    /// Files with a version above `last_applied`, ascending. Everything is pending when nothing
    /// has been applied yet.
    pub fn pending(&self, last_applied: Option<u32>) -> impl Iterator<Item = &MigrationFile> {
        self.files
            .iter()
            .filter(move |f| last_applied.map_or(true, |last| f.version > last))
    }
}
