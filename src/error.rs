//! Unified error hierarchy for racepred
//!
//! Model functions return [`PredictionError`]; text input handling returns
//! [`ParseError`]. Both fold into the top-level [`RacePredError`], which also
//! carries the severity mapping used when errors are logged.

use thiserror::Error;

/// Top-level error type for all racepred operations
#[derive(Debug, Error)]
pub enum RacePredError {
    /// A prediction model rejected its inputs or failed to produce a time
    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),

    /// Text input could not be turned into a distance or a time
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization errors (JSON, CSV)
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by the prediction models
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// Distance is zero, negative or not a finite number
    #[error("Invalid distance: {value} m")]
    InvalidDistance { value: f64 },

    /// Duration is zero, negative or not a finite number
    #[error("Invalid duration: {value} s")]
    InvalidDuration { value: f64 },

    /// The VO2max search ran out of iterations before reaching its tolerance
    #[error("Failed to converge within {iterations} iterations (relative error {relative_error:.5})")]
    NotConverged {
        iterations: usize,
        relative_error: f64,
    },

    /// A model produced a non-physical intermediate (negative speed, negative time)
    #[error("Degenerate result in {model}: {reason}")]
    Degenerate { model: String, reason: String },
}

/// Errors raised while parsing distance and time text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing was entered
    #[error("Missing {field}")]
    MissingInput { field: String },

    /// Distance text is not a number with an optional unit suffix
    #[error("Invalid distance: '{input}'")]
    InvalidDistance { input: String },

    /// Time text is not `s`, `m:s` or `h:m:s`
    #[error("Invalid time '{input}': {reason}")]
    InvalidTime { input: String, reason: String },
}

/// Result type alias for racepred operations
pub type Result<T> = std::result::Result<T, RacePredError>;

impl From<csv::Error> for RacePredError {
    fn from(error: csv::Error) -> Self {
        RacePredError::Serialization(error.to_string())
    }
}

impl From<serde_json::Error> for RacePredError {
    fn from(error: serde_json::Error) -> Self {
        RacePredError::Serialization(error.to_string())
    }
}

impl RacePredError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RacePredError::Parse(_) => ErrorSeverity::Warning,
            RacePredError::Prediction(PredictionError::InvalidDistance { .. })
            | RacePredError::Prediction(PredictionError::InvalidDuration { .. }) => {
                ErrorSeverity::Warning
            }
            RacePredError::Prediction(_) => ErrorSeverity::Error,
            RacePredError::Configuration(_) => ErrorSeverity::Error,
            RacePredError::Io(_) => ErrorSeverity::Error,
            RacePredError::Serialization(_) => ErrorSeverity::Critical,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RacePredError::Parse(ParseError::MissingInput { field }) => {
                format!("Please enter a {}.", field)
            }
            RacePredError::Parse(ParseError::InvalidDistance { input }) => {
                format!(
                    "Could not read distance '{}'. Use meters, or add 'mi' for miles or 'km' for kilometers.",
                    input
                )
            }
            RacePredError::Parse(ParseError::InvalidTime { input, .. }) => {
                format!("Could not read time '{}'. Use h:m:s, m:s or seconds.", input)
            }
            RacePredError::Prediction(PredictionError::NotConverged { .. }) => {
                "The VO2max model could not settle on a time for this distance. Try a target closer to the known race.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Critical system error requiring immediate attention
    Critical,
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
