use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SqlBuildError {
    #[error("Invalid update data: {0}")]
    InvalidInput(&'static str),

    #[error("Invalid filter range: {0}")]
    InvalidRange(String),
}
