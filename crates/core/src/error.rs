use thiserror::Error;

/// Result type for evalboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for evalboard operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A metric name outside the supported set
    #[error("Unknown metric '{0}'")]
    UnknownMetric(String),

    /// A date that is not a `YYYY-MM-DD` calendar date
    #[error("Invalid date '{input}': {message}")]
    InvalidDate { input: String, message: String },

    /// Network failure talking to the search endpoint
    #[error("Transport error ({kind}): {message}")]
    Transport { kind: String, message: String },

    /// The search endpoint answered with a non-success status
    #[error("Search endpoint returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The search endpoint answered with a body we could not decode
    #[error("Decode error: {0}")]
    Decode(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an invalid date error
    pub fn invalid_date(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Creates a transport error
    pub fn transport(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Creates a server error
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Creates a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error came from the search round trip rather than local input
    pub fn is_search_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Server { .. } | Self::Decode(_)
        )
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}
