use thiserror::Error;

pub type FetchResult<T> = Result<T, FetchError>;

/// Failures of the external recipe lookup.
///
/// None of these reach the normalization pipeline; `populate_if_empty` treats
/// every variant as "no data available".
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Recipe API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Recipe API returned status {status}")]
    Status { status: u16 },

    #[error("Invalid recipe API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid recipe API configuration: {0}")]
    Config(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid fraction: {0}")]
    InvalidFraction(String),

    #[error("Denominator cannot be zero: {0}")]
    ZeroDenominator(String),
}
