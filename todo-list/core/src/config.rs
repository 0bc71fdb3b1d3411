use config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Where the backend lives and which storage keys hold the session.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub storage: StorageKeys,
}

/// Keys used in the browser's key-value storage.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StorageKeys {
    pub logged_in_user: String,
    pub token: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000/api".to_string(),
            storage: StorageKeys::default(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            logged_in_user: "loggedInUser".to_string(),
            token: "token".to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads the embedded defaults, overridden by `TODO__*` environment
    /// variables (e.g. `TODO__API_BASE_URL`, `TODO__STORAGE__TOKEN`).
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(Environment::with_prefix("TODO").separator("__"))
    }

    fn load_with(environment: Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(environment)
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn embedded_defaults_match_default_impl() {
        // Arrange
        let environment = Environment::with_prefix("TODO")
            .separator("__")
            .source(Some(HashMap::new()));

        // Act
        let config = ClientConfig::load_with(environment).unwrap();

        // Assert
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn environment_overrides_defaults() {
        // Arrange
        let environment = Environment::with_prefix("TODO")
            .separator("__")
            .source(Some(HashMap::from([
                (
                    "TODO__API_BASE_URL".to_string(),
                    "https://tasks.example.com/v1".to_string(),
                ),
                ("TODO__STORAGE__TOKEN".to_string(), "authToken".to_string()),
            ])));

        // Act
        let config = ClientConfig::load_with(environment).unwrap();

        // Assert
        assert_eq!(config.api_base_url, "https://tasks.example.com/v1");
        assert_eq!(config.storage.token, "authToken");
        assert_eq!(config.storage.logged_in_user, "loggedInUser");
    }

    #[test]
    fn deserialize_from_toml() {
        let toml_str = r#"
            api_base_url = "http://127.0.0.1:8080"
            [storage]
            logged_in_user = "user"
            token = "jwt"
        "#;

        let config: ClientConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.api_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.storage.logged_in_user, "user");
        assert_eq!(config.storage.token, "jwt");
    }

    #[test]
    fn serialize_to_toml() {
        let toml_str = toml::to_string(&ClientConfig::default()).unwrap();

        assert!(toml_str.contains("api_base_url = \"http://localhost:3000/api\""));
        assert!(toml_str.contains("logged_in_user = \"loggedInUser\""));
    }
}
