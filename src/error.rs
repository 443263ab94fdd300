// src/error.rs
use std::fmt;
use thiserror::Error;

/// Which side of a reconciliation a listing or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    InternalCatalog,
    LiveInventory,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::InternalCatalog => "internal catalog",
            SourceKind::LiveInventory => "live inventory",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ReconError {
    /// Caller contract violation: bad threshold, unnamed listing, bad date range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A source fetch failed or timed out. The service recovers from this by
    /// substituting an empty pool, so it only escapes when a source is used directly.
    #[error("{kind} unavailable: {reason}")]
    SourceUnavailable { kind: SourceKind, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ReconError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ReconError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ReconError::invalid("threshold 1.5 outside [0, 1]");
        assert_eq!(err.to_string(), "invalid argument: threshold 1.5 outside [0, 1]");

        let err = ReconError::SourceUnavailable {
            kind: SourceKind::LiveInventory,
            reason: "timed out after 15s".to_string(),
        };
        assert_eq!(err.to_string(), "live inventory unavailable: timed out after 15s");
    }
}
