/// Represents the possible errors that can occur while summarizing a movie.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// An error occurred during an HTTP request (e.g., network issue).
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// A response or result could not be (de)serialized.
    #[error("Failed to parse API response: {0}")]
    ResponseParseFailed(#[from] serde_json::Error),
    /// The API answered with a non-successful status code.
    #[error("API request failed with status {status}: {message}")]
    ApiError {
        /// The HTTP status code returned by the API.
        status: u16,
        /// The error body returned by the API.
        message: String,
    },
    #[error("URL parsing failed: {0}")]
    UrlParseFailed(#[from] url::ParseError),
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// The API key contains characters that cannot be sent in a header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,
    /// The first summarization call did not hand out a session identifier.
    #[error("No session ID received.")]
    MissingSession,
    #[error("Could not parse a movie id from `{0}`")]
    InvalidMovieId(String),
}
