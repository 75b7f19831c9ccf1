use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocError {
    #[error("JSON parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("JSON serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Schema violation at '{path}': expected {expected}, found {found}")]
    SchemaViolation {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Conflict at '{path}': a property with the same name already exists")]
    Conflict { path: String },
}

impl DocError {
    pub fn schema(path: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        DocError::SchemaViolation {
            path: path.into(),
            expected,
            found,
        }
    }

    pub fn conflict(path: impl Into<String>) -> Self {
        DocError::Conflict { path: path.into() }
    }

    /// Prefix the path of a schema violation or conflict with the location of
    /// its parent.
    ///
    /// `Object` only knows the key it was asked about, so callers that reach a
    /// nested mapping use this to report the full pointer (`/buildOptions/embed`).
    pub fn within(self, parent: &str) -> Self {
        match self {
            DocError::SchemaViolation {
                path,
                expected,
                found,
            } => DocError::SchemaViolation {
                path: format!("{parent}{path}"),
                expected,
                found,
            },
            DocError::Conflict { path } => DocError::Conflict {
                path: format!("{parent}{path}"),
            },
            other => other,
        }
    }
}

/// Escape a key for use as a JSON pointer segment (RFC 6901).
pub fn pointer_segment(key: &str) -> String {
    format!("/{}", key.replace('~', "~0").replace('/', "~1"))
}

pub type Result<T> = std::result::Result<T, DocError>;
