use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid column name: {0}")]
    InvalidColumn(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),
}
