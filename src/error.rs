use thiserror::Error;

pub type GdpResult<T> = Result<T, GdpError>;

/// Structural failures. Any of these aborts the whole request before an
/// output table is built. Per-cell problems are never reported here, see
/// [`crate::types::FailureReason`].
#[derive(Error, Debug)]
pub enum GdpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Data format error: {0}")]
    DataFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GdpError {
    /// True for errors caused by the uploaded workbook itself.
    pub fn is_data_format(&self) -> bool {
        matches!(self, GdpError::DataFormat(_))
    }
}

impl From<csv::Error> for GdpError {
    fn from(err: csv::Error) -> Self {
        GdpError::Export(format!("CSV write failed: {}", err))
    }
}

impl From<rust_xlsxwriter::XlsxError> for GdpError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        GdpError::Export(err.to_string())
    }
}
