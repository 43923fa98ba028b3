//! Error types for handle collections and the debug primitive

pub type Result<T> = std::result::Result<T, DebugError>;

#[derive(Debug, thiserror::Error)]
pub enum DebugError {
    /// The handle provider failed to create a handle for a key
    #[error("Handle provider failed for '{key}': {message}")]
    Provider { key: String, message: String },

    /// Namespace label not present in the collection
    #[error("Unknown namespace '{0}'")]
    UnknownNamespace(String),

    /// Environment label not present under a namespace
    #[error("Unknown environment '{environment}' for namespace '{namespace}'")]
    UnknownEnvironment {
        namespace: String,
        environment: String,
    },

    /// Property not exposed by the handle
    #[error("Unknown property '{property}' on handle '{namespace}'")]
    UnknownProperty { namespace: String, property: String },

    /// Property exists but cannot be written
    #[error("Property '{property}' on handle '{namespace}' is read-only")]
    ReadOnlyProperty { namespace: String, property: String },

    /// Property written with a value of the wrong kind
    #[error("Property '{property}' expects a {expected} value")]
    InvalidPropertyType {
        property: String,
        expected: &'static str,
    },

    /// Custom timestamp format chrono cannot render
    #[error("Invalid timestamp format '{0}'")]
    InvalidTimestampFormat(String),

    /// Composite key that is not of the form `namespace:environment`
    #[error("Invalid handle key '{0}': expected '<namespace>:<environment>'")]
    InvalidKey(String),

    /// Appender panicked while writing an entry
    #[error("Appender '{appender}' panicked: {message}")]
    AppenderPanicked { appender: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),
}

impl DebugError {
    /// Create a provider failure for a key
    pub fn provider(key: impl Into<String>, message: impl Into<String>) -> Self {
        DebugError::Provider {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn unknown_environment(
        namespace: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        DebugError::UnknownEnvironment {
            namespace: namespace.into(),
            environment: environment.into(),
        }
    }

    pub fn unknown_property(namespace: impl Into<String>, property: impl Into<String>) -> Self {
        DebugError::UnknownProperty {
            namespace: namespace.into(),
            property: property.into(),
        }
    }

    pub fn read_only(namespace: impl Into<String>, property: impl Into<String>) -> Self {
        DebugError::ReadOnlyProperty {
            namespace: namespace.into(),
            property: property.into(),
        }
    }

    pub fn invalid_type(property: impl Into<String>, expected: &'static str) -> Self {
        DebugError::InvalidPropertyType {
            property: property.into(),
            expected,
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        DebugError::WriterError(msg.into())
    }
}
