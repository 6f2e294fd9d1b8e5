use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level '{level}' in {env_var}: {reason}")]
    InvalidLogLevel {
        env_var: String,
        level: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// The environment variable that sets a dotted configuration key
pub fn to_env_var(field: &str) -> String {
    format!("MINDHUB_{}", field.to_uppercase().replace('.', "__"))
}
