//! Loading match configuration from TOML files.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use chase_core::Config;

/// Loads and validates the configuration stored at `path`.
///
/// Without a path the built-in defaults are used.
pub(crate) fn load(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = parse(&contents)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

fn parse(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).context("failed to parse TOML")?;
    config.validate()?;
    Ok(config)
}
