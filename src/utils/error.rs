use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoonError {
    #[error("Invalid argument `{argument}` = {value}: {reason}")]
    InvalidArgument {
        argument: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid colour: {value}")]
    InvalidColour { value: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Rendering,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MoonError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MoonError::InvalidArgument { .. } | MoonError::InvalidColour { .. } => {
                ErrorCategory::Input
            }
            MoonError::ConfigError { .. }
            | MoonError::InvalidConfigValueError { .. }
            | MoonError::TomlError(_) => ErrorCategory::Configuration,
            MoonError::RenderError { .. }
            | MoonError::ImageError(_)
            | MoonError::SerializationError(_) => ErrorCategory::Rendering,
            MoonError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Rendering => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MoonError::InvalidArgument { argument, value, .. } => {
                format!("The value {} is not valid for {}", value, argument)
            }
            MoonError::InvalidColour { value } => {
                format!("Could not understand the colour '{}'", value)
            }
            MoonError::ConfigError { message } => format!("Configuration problem: {}", message),
            MoonError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            MoonError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            MoonError::IoError(e) => format!("File system error: {}", e),
            other => format!("Rendering failed: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MoonError::InvalidArgument { argument: "at", .. } => {
                "Pass --at as Unix seconds (e.g. 947182440) or RFC 3339 (e.g. 2000-01-06T18:14:00Z)"
            }
            MoonError::InvalidArgument { argument: "fraction", .. } => {
                "Phase fractions must lie in [0, 1)"
            }
            MoonError::InvalidArgument { .. } => "Check the value passed for this argument",
            MoonError::InvalidColour { .. } => {
                "Use a named colour, #rrggbb, #rrggbbaa, rgb(r, g, b) or rgba(r, g, b, a)"
            }
            MoonError::ConfigError { .. } | MoonError::TomlError(_) => {
                "Check the configuration file syntax and the [disc] / [output] tables"
            }
            MoonError::InvalidConfigValueError { .. } => {
                "Adjust the value to the documented range"
            }
            MoonError::IoError(_) => "Check that the output path exists and is writable",
            _ => "Try a different output format or a smaller diameter",
        }
    }
}

pub type Result<T> = std::result::Result<T, MoonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_is_input_error() {
        let err = MoonError::InvalidArgument {
            argument: "fraction",
            value: "1.5".to_string(),
            reason: "outside [0, 1)".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("fraction"));
    }

    #[test]
    fn test_recovery_suggestion_follows_argument() {
        let bad_moment = MoonError::InvalidArgument {
            argument: "at",
            value: "yesterday".to_string(),
            reason: "expected Unix seconds or RFC 3339".to_string(),
        };
        assert!(bad_moment.recovery_suggestion().contains("RFC 3339"));
        assert!(!bad_moment.recovery_suggestion().contains("[0, 1)"));

        let bad_fraction = MoonError::InvalidArgument {
            argument: "fraction",
            value: "1.5".to_string(),
            reason: "outside [0, 1)".to_string(),
        };
        assert!(bad_fraction.recovery_suggestion().contains("[0, 1)"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = MoonError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("denied"));
    }
}
