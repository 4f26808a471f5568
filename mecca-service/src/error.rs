use thiserror::Error;

/// Failure talking to a model vendor.
///
/// These never leave the `llm` module: `llm::invoke` turns every variant into
/// an `Error calling <vendor>: ...` string that flows on as model output.
#[derive(Debug, Error)]
pub enum VendorError {
    #[error("{0}")]
    Request(String),

    #[error("HTTP {status} - {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
