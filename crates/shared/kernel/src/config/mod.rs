use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Errors produced while assembling the layered configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error ({context}): {source}")]
    Config { source: config::ConfigError, context: Cow<'static, str> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layered strategy:
/// 1. **Base file**: settings from a file (e.g. `faucet.toml`). Without an
///    explicit path it defaults to `"faucet"` in the working directory.
/// 2. **Environment overrides**: values from variables prefixed with
///    `FAUCET__`, using double underscores for nesting
///    (e.g. `FAUCET__CHAIN__NODE_URL` maps to `chain.node_url`).
///
/// # Errors
/// Returns an error if the file cannot be found or its content does not
/// match the structure of `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("faucet"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix("FAUCET")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .map_err(|source| ConfigError::Config { source, context: "build".into() })?
        .try_deserialize::<T>()
        .map_err(|source| ConfigError::Config { source, context: "deserialize".into() })?;

    Ok(config)
}
