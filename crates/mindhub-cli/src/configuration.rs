use crate::error::{to_env_var, ConfigError};
use config::{Config, Environment};
use mindhub::providers::configs::OpenRouterProviderConfig;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogSettings {
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.level).map_err(|e| ConfigError::InvalidLogLevel {
            env_var: to_env_var("log.level"),
            level: self.level.clone(),
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_app_url")]
    pub app_url: String,
    #[serde(default = "default_app_title")]
    pub app_title: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            host: None,
            api_key: None,
            app_url: default_app_url(),
            app_title: default_app_title(),
        }
    }
}

impl ProviderSettings {
    // Convert to the mindhub provider config, falling back to OPENROUTER_API_KEY
    // and OPENROUTER_HOST
    pub fn into_config(self) -> OpenRouterProviderConfig {
        let mut config = OpenRouterProviderConfig::from_env()
            .with_attribution(self.app_url, self.app_title);
        if let Some(host) = self.host.filter(|host| !host.is_empty()) {
            config = config.with_host(host);
        }
        if let Some(api_key) = self.api_key.filter(|key| !key.is_empty()) {
            config.api_key = Some(api_key);
        }
        config
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log: LogSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("log.level", default_log_level())?
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("MINDHUB")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = config.try_deserialize().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            ConfigError::Other(err)
        })?;

        // Reject an unusable log filter up front
        settings.log.env_filter()?;

        Ok(settings)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_app_url() -> String {
    "https://flowercomputer.com".to_string()
}

fn default_app_title() -> String {
    "Flower Computer Company".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("MINDHUB_") {
                env::remove_var(&key);
            }
        }
        env::remove_var("OPENROUTER_API_KEY");
        env::remove_var("OPENROUTER_HOST");
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();

        let settings = Settings::new().unwrap();
        assert_eq!(settings.log.level, "info");
        assert_eq!(settings.provider.host, None);
        assert_eq!(settings.provider.api_key, None);
        assert_eq!(settings.provider.app_title, "Flower Computer Company");

        let config = settings.provider.into_config();
        assert_eq!(config.host, "https://openrouter.ai/api");
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        env::set_var("MINDHUB_LOG__LEVEL", "mindhub=debug");
        env::set_var("MINDHUB_PROVIDER__HOST", "http://localhost:9999");
        env::set_var("MINDHUB_PROVIDER__API_KEY", "sk-or-test");
        env::set_var("MINDHUB_PROVIDER__APP_TITLE", "Test Harness");

        let settings = Settings::new().unwrap();
        assert_eq!(settings.log.level, "mindhub=debug");

        let config = settings.provider.into_config();
        assert_eq!(config.host, "http://localhost:9999");
        assert_eq!(config.api_key.as_deref(), Some("sk-or-test"));
        assert_eq!(config.app_title.as_deref(), Some("Test Harness"));
        assert_eq!(config.app_url.as_deref(), Some("https://flowercomputer.com"));

        clean_env();
    }

    #[test]
    #[serial]
    fn test_provider_falls_back_to_openrouter_env() {
        clean_env();
        env::set_var("OPENROUTER_API_KEY", "sk-or-fallback");
        env::set_var("OPENROUTER_HOST", "http://localhost:7777");

        let config = Settings::new().unwrap().provider.into_config();
        assert_eq!(config.api_key.as_deref(), Some("sk-or-fallback"));
        assert_eq!(config.host, "http://localhost:7777");

        clean_env();
    }

    #[test]
    #[serial]
    fn test_invalid_log_level() {
        clean_env();
        env::set_var("MINDHUB_LOG__LEVEL", "mindhub=verbose");

        assert!(matches!(
            Settings::new(),
            Err(ConfigError::InvalidLogLevel { .. })
        ));

        clean_env();
    }
}
