//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.
//!
//! Only structural conversion failures are fatal. Missing type information and
//! dangling references degrade to placeholders and never surface here.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A schema, parameter or operation could not be converted into the typed
    /// node representation. Aborts the whole document conversion.
    #[from(ignore)]
    #[display("Conversion Error at '{location}': {message}")]
    Conversion {
        /// Where in the source document the failure happened
        /// (e.g. `components.schemas.Pet`).
        location: String,
        /// Underlying deserializer message.
        message: String,
    },

    /// Configuration could not be read.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Builds a `Conversion` error for the given source location.
    pub fn conversion(location: impl Into<String>, message: impl ToString) -> Self {
        AppError::Conversion {
            location: location.into(),
            message: message.to_string(),
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_conversion() {
        // Test that String defaults to General, not Config
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_conversion_display_names_location() {
        let err = AppError::conversion("components.schemas.Pet", "invalid type: integer");
        assert_eq!(
            format!("{}", err),
            "Conversion Error at 'components.schemas.Pet': invalid type: integer"
        );
    }

    #[test]
    fn test_config_manual_creation() {
        let app_err = AppError::Config("bad yaml".into());
        assert_eq!(format!("{}", app_err), "Config Error: bad yaml");
    }
}
