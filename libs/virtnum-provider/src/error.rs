//! Provider client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// In-band failure: the provider answered 2xx with `success: false`.
    /// Displays as the raw error text so callers can show it verbatim.
    #[error("{0}")]
    Api(String),

    #[error("provider response is missing the data payload")]
    MissingData,
}
