use student_core::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// Bad command line.
    #[error("usage: {0}")]
    Usage(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
