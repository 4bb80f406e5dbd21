//! Error Types
//!
//! Failure taxonomy shared by the transport, the lead form and the browser glue.
//! A `Blocked` lead is not an error; see [`crate::lead::LeadOutcome`].

use thiserror::Error;

/// Longest raw-body excerpt kept on a malformed response.
pub const SNIPPET_LEN: usize = 200;

/// Result type alias for listing operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Transport-level failures of a single endpoint call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The call exceeded its deadline and was aborted.
    #[error("request timed out")]
    Timeout,

    /// The request never produced an HTTP response.
    #[error("network failure: {0}")]
    Network(String),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The body was not valid JSON (or not the expected shape).
    #[error("bad JSON: {snippet}")]
    MalformedResponse { snippet: String },

    /// The endpoint answered `{error: ...}` or `success: false`.
    #[error("endpoint rejected request: {0}")]
    Rejected(String),

    /// The request body could not be serialized.
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Build a [`ApiError::MalformedResponse`] from a raw body, truncated on a char boundary.
    pub fn malformed(raw: &str) -> Self {
        ApiError::MalformedResponse {
            snippet: raw.chars().take(SNIPPET_LEN).collect(),
        }
    }
}

/// Client-side form checks, raised before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
    #[error("mobile must be 6-15 digits without country code")]
    InvalidMobile,
}

/// Everything a view may have to surface to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The browser refused to open the lead popup.
    #[error("popup blocked, please allow popups")]
    PopupBlocked,

    /// No `window` global (not running in a browsing context).
    #[error("no browser window available")]
    NoWindow,

    /// A browser API call threw.
    #[error("browser error: {0}")]
    Browser(String),
}
