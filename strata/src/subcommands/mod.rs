mod migrate;

pub use migrate::*;

use crate::config::ConfigFile;

pub(crate) fn init() -> anyhow::Result<()> {
    let config_file = ConfigFile::example();
    let cfg = toml::to_string(&config_file)?;
    println!("{cfg} ");
    Ok(())
}

pub(crate) fn version() {
    let version = env!("CARGO_PKG_VERSION");
    println!("Current version is {version}");
}
