//! Transfer error type for a single GET.

use std::fmt;

/// Error returned by [`super::download_to`].
#[derive(Debug)]
pub enum HttpError {
    /// Curl reported an error (timeout, connection refused, DNS, TLS, ...).
    Curl(curl::Error),
    /// Server answered with a non-2xx status.
    Status(u32),
    /// The sink rejected the body (disk full, permission denied).
    Write(std::io::Error),
}

impl HttpError {
    /// True for transfer timeouts (connect, total, or low-speed abort).
    pub fn is_timeout(&self) -> bool {
        matches!(self, HttpError::Curl(e) if e.is_operation_timedout())
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Curl(e) => write!(f, "{}", e),
            HttpError::Status(code) => write!(f, "HTTP {}", code),
            HttpError::Write(e) => write!(f, "write: {}", e),
        }
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpError::Curl(e) => Some(e),
            HttpError::Write(e) => Some(e),
            HttpError::Status(_) => None,
        }
    }
}

impl From<curl::Error> for HttpError {
    fn from(e: curl::Error) -> Self {
        HttpError::Curl(e)
    }
}
