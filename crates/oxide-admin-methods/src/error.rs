//! Error types for display and action units.

use thiserror::Error;

/// Errors raised while building or invoking admin units.
///
/// `InvalidIdentity`, `ImproperlyConfigured` and `Config` are construction-time
/// errors. Everything else is raised per record while a unit runs.
#[derive(Debug, Error)]
pub enum UnitError {
    /// A name cannot be used as a machine identity.
    #[error("invalid identity {name:?}: {reason}")]
    InvalidIdentity { name: String, reason: String },

    /// A segment of an attribute path is absent on the running value.
    #[error("cannot resolve attribute {segment:?} in {path:?}")]
    AttributeResolution { segment: String, path: String },

    /// The unit or the record it runs against is wired up incorrectly.
    #[error("improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// An attribute resolved to a value of the wrong kind.
    #[error("unexpected value for {field:?}: expected {expected}")]
    UnexpectedValue { field: String, expected: &'static str },

    /// The record does not accept writes to this attribute.
    #[error("attribute is read-only: {0}")]
    ReadOnly(String),

    /// The record store refused to persist a record.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Markup could not be converted to plain text.
    #[error("markup error: {0}")]
    Markup(String),

    /// Template rendering error.
    #[error("template error: {0}")]
    Template(String),

    /// A batch action stopped part way through.
    #[error("batch aborted after {applied} record(s): {source}")]
    BatchAborted {
        applied: usize,
        #[source]
        source: Box<UnitError>,
    },

    /// Declarative unit configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl UnitError {
    /// Builds an `AttributeResolution` error.
    pub fn missing(segment: impl Into<String>, path: impl Into<String>) -> Self {
        Self::AttributeResolution {
            segment: segment.into(),
            path: path.into(),
        }
    }
}

/// Result type alias for unit operations.
pub type Result<T> = std::result::Result<T, UnitError>;
