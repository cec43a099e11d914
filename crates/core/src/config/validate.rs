use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Library name is not blank
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.library.name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "library.name cannot be empty".to_string(),
        ));
    }

    Ok(())
}
