use dishstock_store::StoreError;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report rendering failed: {0}")]
    Render(String),
}
