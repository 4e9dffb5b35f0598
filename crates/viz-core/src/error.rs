//! Error types shared by every vizkit crate

use thiserror::Error;

/// Errors raised while preparing a chart for rendering.
///
/// None of these abort a render: the frame logs them and shows a placeholder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// A configuration value is out of its valid range
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Parallel inputs disagree on length (series vs labels, colours vs domain)
    #[error("{what}: expected {expected}, got {actual}")]
    Mismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A date string did not match the configured format
    #[error("cannot parse date {raw:?} with format {format:?}")]
    DateParse { raw: String, format: String },

    /// The geographic collaborator rejected the topology
    #[error("geodata error: {0}")]
    Geo(String),
}

impl ChartError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_message() {
        let err = ChartError::Mismatch {
            what: "series values vs labels",
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "series values vs labels: expected 2, got 3"
        );
    }
}
