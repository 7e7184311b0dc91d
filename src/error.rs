#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum Error {
    /// Transport-level failure: connect, TLS, timeout.
    #[error("network failure: {0}")]
    Network(String),
    /// Non-2xx response. The message prefers the server-supplied `error`
    /// body when one is present.
    #[error("request failed with status {status}: {message}")]
    Http { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// Rejected before any network call was issued.
    #[error("invalid parameter: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Error::MalformedResponse(error.to_string())
        } else {
            Error::Network(error.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
