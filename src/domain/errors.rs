use derive_more::Display;

/// Reasons a price history document or a chart configuration is rejected
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ValidationError {
    #[display(fmt = "malformed JSON: {}", _0)]
    MalformedJson(String),
    #[display(fmt = "expected a JSON array of records")]
    NotAnArray,
    #[display(fmt = "record {} is not an object", index)]
    NotAnObject { index: usize },
    #[display(fmt = "record {}: missing field `{}`", index, field)]
    MissingField { index: usize, field: &'static str },
    #[display(fmt = "record {}: field `{}` is not a number ({})", index, field, raw)]
    InvalidNumber { index: usize, field: &'static str, raw: String },
    #[display(fmt = "record {}: unparseable timestamp ({})", index, raw)]
    InvalidTimestamp { index: usize, raw: String },
    #[display(fmt = "invalid configuration: {}", _0)]
    InvalidConfig(String),
}

impl std::error::Error for ValidationError {}

/// Root error type surfaced to the presentation layer
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    #[display(fmt = "Validation Error: {}", _0)]
    Validation(ValidationError),
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(String),
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Validation(error)
    }
}

pub type LoadResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;
