use thiserror::Error;

#[derive(Error, Debug)]
pub enum EarthSpinError {
    #[error("Invalid PCK source descriptor: {0}")]
    InvalidPckSource(String),

    #[error("Invalid PCK text kernel: {0}")]
    InvalidPckKernel(String),

    #[error("Orientation constants not loaded for body {body}: {item}")]
    DataUnavailable { body: i32, item: String },

    #[error("Invalid calendar date: {0}")]
    InvalidCalendarDate(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PartialEq for EarthSpinError {
    fn eq(&self, other: &Self) -> bool {
        use EarthSpinError::*;
        match (self, other) {
            (InvalidPckSource(a), InvalidPckSource(b)) => a == b,
            (InvalidPckKernel(a), InvalidPckKernel(b)) => a == b,
            (
                DataUnavailable { body: a, item: ai },
                DataUnavailable { body: b, item: bi },
            ) => a == b && ai == bi,
            (InvalidCalendarDate(a), InvalidCalendarDate(b)) => a == b,

            // These errors carry non-comparable payloads: equal if same variant
            (IoError(_), IoError(_)) => true,
            (JsonError(_), JsonError(_)) => true,

            _ => false,
        }
    }
}
