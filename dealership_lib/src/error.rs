//! Error types for the library layer.

use std::fmt;

/// A single failed form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding input validation and push channel failures.
///
/// The remote data services never return these; they turn failures into
/// notifications and fallback values. Everything else (config, routing,
/// imports, the push channel) reports through this type.
#[derive(Debug)]
pub enum AdminError {
    /// An error from the underlying API client.
    Api(dealership_api::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// A route parameter that should be a numeric id was not.
    InvalidId(String),
    /// Client-side schema validation rejected a form.
    Validation(Vec<FieldError>),
    /// The push channel could not be opened or was already closed.
    Channel(crate::push::ChannelError),
    /// Required configuration is missing or malformed.
    Config(String),
    /// Local file I/O failed.
    Io(std::io::Error),
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::InvalidId(_) => write!(f, "Invalid ID"),
            Self::Validation(errors) => {
                let joined = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "Validation failed: {}", joined)
            }
            Self::Channel(e) => write!(f, "Push channel error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for AdminError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Channel(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<dealership_api::Error> for AdminError {
    fn from(e: dealership_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<crate::push::ChannelError> for AdminError {
    fn from(e: crate::push::ChannelError) -> Self {
        Self::Channel(e)
    }
}

impl From<std::io::Error> for AdminError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
