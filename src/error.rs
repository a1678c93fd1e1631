//! Error types surfaced by platform operations.

use thiserror::Error;

/// Message the platform binary prints when an operation needs an enterprise license.
pub const ENTERPRISE_LICENSE_REQUIRED: &str = "Feature requires an enterprise license";

#[derive(Debug, Error)]
pub enum PlatformError {
    /// The installation path (or the facts store holding it) could not be resolved.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The platform binary could not be located or started.
    #[error("failed to execute '{program}': {source}")]
    Execution {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The platform binary reported failure.
    #[error("{0}")]
    OperationFailed(String),

    /// Output of the platform binary carried the enterprise license marker.
    #[error("{}", ENTERPRISE_LICENSE_REQUIRED)]
    LicenseRequired,
}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn operation_failed_displays_message_verbatim() {
        let e = PlatformError::OperationFailed("Could not create team.".into());
        assert_eq!(e.to_string(), "Could not create team.");
    }

    #[test]
    fn license_required_displays_marker() {
        assert_eq!(
            PlatformError::LicenseRequired.to_string(),
            ENTERPRISE_LICENSE_REQUIRED
        );
    }

    #[test]
    fn execution_keeps_io_source() {
        let e = PlatformError::Execution {
            program: "/opt/mattermost/bin/platform".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("/opt/mattermost/bin/platform"));
        let source = e.source().expect("io source");
        assert!(source.to_string().contains("no such file"));
    }

    #[test]
    fn configuration_mentions_cause() {
        let e = PlatformError::Configuration("grain 'mattermost_path' is not set".into());
        assert!(e.to_string().contains("mattermost_path"));
    }
}
