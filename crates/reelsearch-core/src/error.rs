//! Error types for Reelsearch.

/// Errors that can occur while searching the catalog.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The content repository is unavailable or returned a malformed response.
    #[error("Repository error: {message}")]
    Repository {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Nothing to search for (empty query and no criteria).
    #[error("Invalid query: {message}")]
    InvalidQuery {
        /// What was wrong with the request
        message: String,
    },

    /// A criterion value could not be interpreted for its kind.
    #[error("Invalid {kind} criterion value: '{value}'")]
    InvalidCriterion {
        /// Criterion kind (genre, year, rating, platform)
        kind: String,
        /// The rejected value
        value: String,
    },

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for Reelsearch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error was caused by the caller's input.
    ///
    /// User errors should be reported back as-is; everything else is an
    /// infrastructure failure.
    pub fn is_user_error(&self) -> bool {
        match self {
            Error::InvalidQuery { .. } => true,
            Error::InvalidCriterion { .. } => true,
            Error::Repository { .. } => false,
            Error::Io(_) => false,
            Error::Serialization(_) => false,
            Error::Config { .. } => false,
        }
    }

    /// Returns `true` for failures of the content repository.
    pub fn is_repository_error(&self) -> bool {
        matches!(self, Error::Repository { .. })
    }

    /// Creates a new repository error with a message.
    pub fn repository<S: Into<String>>(message: S) -> Self {
        Error::Repository {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new repository error with a message and source error.
    pub fn repository_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Repository {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new invalid-query error.
    pub fn invalid_query<S: Into<String>>(message: S) -> Self {
        Error::InvalidQuery {
            message: message.into(),
        }
    }

    /// Creates a new invalid-criterion error.
    pub fn invalid_criterion<K, V>(kind: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Error::InvalidCriterion {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
