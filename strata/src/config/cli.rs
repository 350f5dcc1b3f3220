use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(about = "Apply numbered SQL migrations to a sqlite database")]
pub struct Cli {
    /// Location of config file: Default: strata.toml
    #[arg(short, long, default_value = "strata.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Subcommand {
    /// Output example config file.
    Init,

    /// Apply every migration newer than the version recorded in the database.
    Migrate {
        /// Directory of migration files. Overrides `migrations.dir` from the config file.
        #[arg(long)]
        schema_dir: Option<PathBuf>,
    },

    /// Show the recorded schema version and the migrations that are still pending.
    Status {
        /// Directory of migration files. Overrides `migrations.dir` from the config file.
        #[arg(long)]
        schema_dir: Option<PathBuf>,
    },

    /// Prints the current version of application
    Version,
}

impl Subcommand {
    pub fn schema_dir(&self) -> Option<&PathBuf> {
        match self {
            Subcommand::Migrate { schema_dir } | Subcommand::Status { schema_dir } => {
                schema_dir.as_ref()
            }
            Subcommand::Init | Subcommand::Version => None,
        }
    }
}
