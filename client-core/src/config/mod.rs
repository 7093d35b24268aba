use config::{Config, Environment, File};

pub use config::ConfigError;
use serde::de::DeserializeOwned;

/// Load a typed configuration section.
///
/// Sources are layered in order: `.env` (via dotenvy), an optional config file
/// named `file` (any format the `config` crate understands), then environment
/// variables starting with `prefix`. Nested keys use `__` as separator, so
/// `ONFIDO_TIMEOUT_SECS` maps to `timeout_secs` and `ONFIDO_HTTP__PROXY`
/// would map to `http.proxy`.
pub fn load<T: DeserializeOwned>(file: &str, prefix: &str) -> Result<T, ConfigError> {
    dotenvy::dotenv().ok();

    let config = Config::builder()
        .add_source(File::with_name(file).required(false))
        .add_source(Environment::with_prefix(prefix).separator("__"))
        .build()?;

    config.try_deserialize()
}
