//! Error types for steelsched.
//!
//! The validation core never fails: a missing or garbled field is an expected outcome and is
//! recorded in the validation report, not returned as an error. `SteelschedError` covers the
//! edges around the core:
//!
//! - `Io` - reading config files or model responses (always bubbles up unchanged)
//! - `Parsing` - a model response that is not usable JSON
//! - `Validation` - invalid configuration or an unknown schedule type
//! - `Serialization` - a row object that cannot be decoded into a typed row
//!
//! # Example
//!
//! ```rust
//! use steelsched::{Result, ScheduleType, SteelschedError};
//!
//! fn schedule_type_from_arg(arg: &str) -> Result<ScheduleType> {
//!     let schedule_type: ScheduleType = arg.parse()?;
//!     Ok(schedule_type)
//! }
//!
//! assert!(schedule_type_from_arg("beam").is_ok());
//! assert!(matches!(
//!     schedule_type_from_arg("truss"),
//!     Err(SteelschedError::Validation { .. })
//! ));
//! ```
use thiserror::Error;

/// Result type alias using `SteelschedError`.
pub type Result<T> = std::result::Result<T, SteelschedError>;

/// Main error type for fallible steelsched operations.
#[derive(Debug, Error)]
pub enum SteelschedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<serde_json::Error> for SteelschedError {
    fn from(err: serde_json::Error) -> Self {
        SteelschedError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        paste::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl SteelschedError {
    error_constructor!(parsing, Parsing);
    error_constructor!(validation, Validation);
}
