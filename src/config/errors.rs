use thiserror::Error;

/// Errors raised while loading application configuration
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Invalid setting '{setting_name}': {reason}")]
    InvalidSetting {
        setting_name: String,
        reason: String,
    },

    #[error("Failed to parse setting '{setting_name}': {error}")]
    ParseError {
        setting_name: String,
        error: String,
    },
}
