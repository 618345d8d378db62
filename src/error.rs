/// Errors raised by the layers around the calendar grid.
///
/// Slot generation, navigation, resolution and grid building never fail;
/// only loading data, reading configuration and parsing user input can.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid status: '{0}'. Must be one of: scheduled, completed, cancelled, no-show")]
    InvalidStatus(String),

    #[error("Invalid appointment type: '{0}'. Must be one of: consultation, follow-up, procedure, emergency")]
    InvalidType(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("{action} is not available for a {status} appointment")]
    ActionUnavailable {
        action: &'static str,
        status: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, CalendarError>;
