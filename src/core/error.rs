//! Error types for route-planner
//!
//! One variant per failure the planner can report, so the front end can map
//! each to the right notification.

use std::fmt;

/// Main error type for route-planner operations
#[derive(Debug)]
pub enum Error {
    /// Stop or route index outside the current list
    OutOfRange { index: usize, len: usize },

    /// Route search attempted with fewer than two stops
    InsufficientStops { count: usize },

    /// Invalid user input or parameters
    InvalidInput(String),

    /// The geocoder could not resolve a name or coordinate
    GeocodeFailure(String),

    /// The router could not compute a route between the stops
    RouteFailure(String),

    /// HTTP-specific error
    HttpError(String),

    /// Network connectivity issues
    NetworkError(String),

    /// Terminal or file I/O error
    IoError(std::io::Error),
}

impl Error {
    /// Whether the error is caused by the request itself rather than a provider
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::OutOfRange { .. } | Error::InsufficientStops { .. } | Error::InvalidInput(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange { index, len } => {
                write!(f, "Index {index} is out of range (have {len})")
            }
            Error::InsufficientStops { count } => {
                write!(f, "At least 2 stops are needed to find a route (have {count})")
            }
            Error::InvalidInput(msg) => {
                write!(f, "Invalid input: {msg}")
            }
            Error::GeocodeFailure(msg) => {
                write!(f, "Location not found: {msg}")
            }
            Error::RouteFailure(msg) => {
                write!(f, "Route not found: {msg}")
            }
            Error::HttpError(msg) => {
                write!(f, "HTTP error: {msg}")
            }
            Error::NetworkError(msg) => {
                write!(f, "Network error: {msg}")
            }
            Error::IoError(err) => {
                write!(f, "I/O error: {err}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Error::NetworkError(err.to_string())
        } else {
            Error::HttpError(err.to_string())
        }
    }
}

/// Convenience result type for route-planner operations
pub type Result<T> = std::result::Result<T, Error>;
