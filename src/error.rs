#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("GPU query error: {0}")]
    Gpu(#[from] nvml_wrapper::error::NvmlError),

    #[error("display error: {0}")]
    Display(String),

    #[error("metrics error: {0}")]
    Metrics(String),
}

impl Error {
    pub(crate) fn display<S: Into<String>>(msg: S) -> Self {
        Error::Display(msg.into())
    }

    pub(crate) fn metrics<S: Into<String>>(msg: S) -> Self {
        Error::Metrics(msg.into())
    }
}

/// Result type for panelmon operations
pub type Result<T> = std::result::Result<T, Error>;
