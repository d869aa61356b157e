use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    #[error("invalid input: expected a Mapping, got {actual}")]
    InvalidInput { actual: String },

    #[error(
        "{category} is mutable and can't be used as a mapping key or set element"
    )]
    MutableKey { category: String },
}

pub type SResult<T> = Result<T, SummaryError>;
