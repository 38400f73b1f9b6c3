use thiserror::Error;

pub type AircostResult<T> = Result<T, AircostError>;

#[derive(Error, Debug)]
pub enum AircostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Store error: {0}")]
    Store(String),
}
