use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Unreachable: {0}")]
    Unreachable(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid node count: {0} (must be at least 1)")]
    InvalidNodeCount(usize),
}

impl ScanError {
    /// Errors that quarantine a single page without stopping the crawl.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ScanError::HttpError(_)
                | ScanError::HttpStatus { .. }
                | ScanError::Unreachable(_)
                | ScanError::ParseError(_)
        )
    }

    /// Errors raised before any traversal starts.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, ScanError::InvalidUrl(_) | ScanError::InvalidNodeCount(_))
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
