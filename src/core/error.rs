//! Error types for the aggregation pipeline

pub type Result<T> = std::result::Result<T, FunnelError>;

#[derive(Debug, thiserror::Error)]
pub enum FunnelError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Shared queue closed; no listener will ever drain the record
    #[error("Shared queue closed")]
    QueueClosed,

    /// Deferred message could not be rendered
    #[error("Render failed for template '{template}': {message}")]
    RenderError { template: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Sink write error with path
    #[error("Sink write error for '{path}': {message}")]
    SinkWriteError { path: String, message: String },

    /// Sink rotation error
    #[error("Sink rotation failed for '{path}': {message}")]
    SinkRotationError { path: String, message: String },

    /// Database connection failure (surfaced to the caller, never retried)
    #[error("Connection failed for database '{dbname}': {message}")]
    ConnectionError { dbname: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl FunnelError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        FunnelError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a render error for a message template
    pub fn render(template: impl Into<String>, message: impl Into<String>) -> Self {
        FunnelError::RenderError {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        FunnelError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a sink write error
    pub fn sink_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        FunnelError::SinkWriteError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a sink rotation error
    pub fn sink_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        FunnelError::SinkRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a connection error
    pub fn connection(dbname: impl Into<String>, message: impl Into<String>) -> Self {
        FunnelError::ConnectionError {
            dbname: dbname.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FunnelError::Other(msg.into())
    }
}
