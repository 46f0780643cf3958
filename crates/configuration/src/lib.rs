use crate::error::ConfigError;
use std::collections::HashSet;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, IndexEntry, ProviderConfig, ServerConfig};

/// Loads the application configuration from the `navscope.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, validates the index table, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `navscope.toml`
        .add_source(config::File::with_name("navscope"))
        // Environment variables win over the file, e.g. NAVSCOPE_SERVER__PORT.
        .add_source(config::Environment::with_prefix("NAVSCOPE").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.indices.is_empty() {
        return Err(ConfigError::ValidationError(
            "the index table must contain at least one entry".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for entry in &config.indices {
        if !seen.insert(entry.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate index id: {}",
                entry.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    const SAMPLE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 5001

        [providers]
        mfapi_base_url = "https://api.mfapi.in"
        yahoo_base_url = "https://query2.finance.yahoo.com"

        [[indices]]
        id = "nifty50"
        name = "Nifty 50"
        symbol = "^NSEI"

        [[indices]]
        id = "niftybank"
        name = "Nifty Bank"
        symbol = "^NSEBANK"
    "#;

    #[test]
    fn sample_config_parses_and_validates() {
        let config = parse(SAMPLE);
        assert!(validate(&config).is_ok());
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.indices.len(), 2);
    }

    #[test]
    fn index_lookup_by_id() {
        let config = parse(SAMPLE);
        let entry = config.index_by_id("niftybank").unwrap();
        assert_eq!(entry.name, "Nifty Bank");
        assert_eq!(entry.symbol, "^NSEBANK");
        assert!(config.index_by_id("missing").is_none());
    }

    #[test]
    fn empty_index_table_is_rejected() {
        let toml = r#"
            indices = []

            [server]
            host = "127.0.0.1"
            port = 5001

            [providers]
            mfapi_base_url = "https://api.mfapi.in"
            yahoo_base_url = "https://query2.finance.yahoo.com"
        "#;
        let config = parse(toml);
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn duplicate_index_ids_are_rejected() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 5001

            [providers]
            mfapi_base_url = "https://api.mfapi.in"
            yahoo_base_url = "https://query2.finance.yahoo.com"

            [[indices]]
            id = "nifty50"
            name = "Nifty 50"
            symbol = "^NSEI"

            [[indices]]
            id = "nifty50"
            name = "Nifty 50 again"
            symbol = "^NSEI"
        "#;
        let config = parse(toml);
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
