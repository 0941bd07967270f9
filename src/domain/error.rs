//! Error types for the fallible edges of the crate.
//!
//! The calculation core is total and never returns these; they surface from
//! holdings ingestion, configuration and the CLI.

/// Top-level error type for thrustdeck.
#[derive(Debug, thiserror::Error)]
pub enum ThrustError {
    #[error("holdings source unavailable: {path}")]
    SourceUnavailable { path: String },

    #[error("holdings source parse error: {reason}")]
    SourceParse { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown engine type: {0}")]
    UnknownEngineType(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ThrustError> for std::process::ExitCode {
    fn from(err: &ThrustError) -> Self {
        let code: u8 = match err {
            ThrustError::Io(_) => 1,
            ThrustError::ConfigParse { .. }
            | ThrustError::ConfigMissing { .. }
            | ThrustError::ConfigInvalid { .. } => 2,
            ThrustError::SourceUnavailable { .. } | ThrustError::SourceParse { .. } => 3,
            ThrustError::UnknownEngineType(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_key() {
        let err = ThrustError::ConfigInvalid {
            section: "projection".into(),
            key: "max_years".into(),
            reason: "must be between 1 and 100".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value [projection] max_years: must be between 1 and 100"
        );
    }

    #[test]
    fn source_unavailable_message() {
        let err = ThrustError::SourceUnavailable {
            path: "data/holdings.csv".into(),
        };
        assert_eq!(
            err.to_string(),
            "holdings source unavailable: data/holdings.csv"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::other("disk on fire");
        let err: ThrustError = io.into();
        assert!(matches!(err, ThrustError::Io(_)));
    }
}
