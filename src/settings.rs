use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(deserialize_with = "deserialize_secret")]
    pub database_uri: SecretString,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl Settings {
    /// Defaults, then an optional `trivia.toml`, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Self::defaults()?
                .add_source(File::with_name("trivia").required(false))
                .add_source(Environment::default().try_parsing(true)),
        )
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("max_connections", 5)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The database location with any credentials stripped, safe for logs.
    pub fn redacted_database_uri(&self) -> &str {
        let uri = self.database_uri.expose_secret();
        uri.rsplit('@').next().unwrap_or(uri)
    }
}
