#[derive(Debug, thiserror::Error)]
pub enum ExploreError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Data Error: {0}")]
    Data(String),
    #[error("Input closed while waiting for an answer")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, ExploreError>;
