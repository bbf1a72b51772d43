use thiserror::Error;

/// Failures produced by [`crate::network::NetworkClient`].
///
/// These propagate unchanged through the weather service; only the presenter
/// turns them into user-facing text.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("bad URL")]
    BadUrl,

    #[error("invalid response")]
    InvalidResponse,

    #[error("server error (status {0})")]
    ServerError(u16),

    #[error("decoding error: {0}")]
    DecodingError(#[source] serde_json::Error),

    #[error("unknown error: {0}")]
    UnknownError(#[source] reqwest::Error),
}

impl NetworkError {
    /// HTTP status for [`NetworkError::ServerError`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::ServerError(code) => Some(*code),
            _ => None,
        }
    }
}

/// Failures produced while acquiring the device location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unknown")]
    LocationUnknown,

    #[error("network failure while locating")]
    NetworkFailure,

    #[error("location services disabled")]
    ServicesDisabled,

    #[error("location error: {0}")]
    Platform(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_exposes_status() {
        assert_eq!(NetworkError::ServerError(401).status(), Some(401));
        assert_eq!(NetworkError::BadUrl.status(), None);
    }

    #[test]
    fn display_messages_are_readable() {
        assert_eq!(NetworkError::ServerError(503).to_string(), "server error (status 503)");
        assert_eq!(LocationError::PermissionDenied.to_string(), "location permission denied");
        assert!(LocationError::Platform("gps off".into()).to_string().contains("gps off"));
        assert_eq!(LocationError::ServicesDisabled.to_string(), "location services disabled");
    }
}
