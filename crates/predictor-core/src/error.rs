//! Error Types for the Predictor
//!
//! Every failure on the fetch/parse/predict path collapses into one of six
//! categories with a stable numeric code. The underlying cause is kept on
//! the variant so it can be logged even when the public message is generic.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PredictorError>;

/// Stable numeric codes shown to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    MalformedUrl = 0,
    IoError = 1,
    InvalidJson = 2,
    StatusNotOk = 3,
    UnknownException = 4,
    NoTransactionsFound = 5,
}

impl ErrorCode {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("URL is not valid: {url} ({reason})")]
    MalformedUrl { url: String, reason: String },

    #[error("I/O error while reading {url}: {source}")]
    IoError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid JSON returned by {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{url} returned status {status}")]
    StatusNotOk {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("{message}")]
    UnknownException {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("No transactions found for plan {plan}")]
    NoTransactionsFound { plan: String },
}

impl PredictorError {
    /// Catch-all constructor for failures outside the other five categories
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::UnknownException {
            message: message.into(),
            source: None,
        }
    }

    pub fn unknown_from(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::UnknownException {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedUrl { .. } => ErrorCode::MalformedUrl,
            Self::IoError { .. } => ErrorCode::IoError,
            Self::InvalidJson { .. } => ErrorCode::InvalidJson,
            Self::StatusNotOk { .. } => ErrorCode::StatusNotOk,
            Self::UnknownException { .. } => ErrorCode::UnknownException,
            Self::NoTransactionsFound { .. } => ErrorCode::NoTransactionsFound,
        }
    }

    /// The fixed, user-facing message for this category.
    ///
    /// Unknown failures carry their own message text instead.
    pub fn user_message(&self) -> String {
        match self {
            Self::MalformedUrl { .. } => "URL is not valid".into(),
            Self::IoError { .. } => {
                "Input/Output exception. Something went wrong while reading the data from the url."
                    .into()
            }
            Self::InvalidJson { .. } => "Invalid JSON returned by the URL.".into(),
            Self::StatusNotOk { .. } => "URL returned with status not OK".into(),
            Self::UnknownException { message, .. } => message.clone(),
            Self::NoTransactionsFound { .. } => "Transactions not found for this investment.".into(),
        }
    }

    /// Single output line reported for a failed prediction
    pub fn render(&self) -> String {
        format!(
            "Error occured with error code = {} . Error Message = {}",
            self.code(),
            self.user_message()
        )
    }
}
