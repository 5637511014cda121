//! Error types for telemetry normalization.

use thiserror::Error;

/// Errors raised while normalizing telemetry or loading the check catalog.
///
/// Scope is deliberately narrow: `UnsupportedProtocol` and
/// `MissingSessionType` poison one protocol's tally, `MalformedPayload`
/// one device's report. Batch callers keep going for everything else.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    #[error("mpls payload missing session type: {0}")]
    MissingSessionType(String),

    #[error("malformed payload: field `{field}`")]
    MalformedPayload { field: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog parse error: {0}")]
    Catalog(#[from] serde_yaml::Error),
}

impl TelemetryError {
    /// Malformed-payload error naming the offending field.
    pub fn malformed(field: impl Into<String>) -> Self {
        Self::MalformedPayload {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_names_the_field() {
        let err = TelemetryError::malformed("peer-count");
        assert_eq!(err.to_string(), "malformed payload: field `peer-count`");
    }
}
