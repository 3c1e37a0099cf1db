use std::path::PathBuf;

/// Failure raised by a [`GcodeConverter`](crate::gateway::GcodeConverter).
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Free-form failure, displayed verbatim.
    #[error("{0}")]
    Other(String),
}

impl ConvertError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Failure at the gateway boundary. Every variant ends up as the `error`
/// text of a failed [`ConversionResult`](crate::gateway::ConversionResult).
#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    Request(#[from] serde_json::Error),

    #[error("temporary file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("failed to read input: {0}")]
    Input(#[source] std::io::Error),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
