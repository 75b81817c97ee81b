use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("unknown facet: \"{0}\"")]
    UnknownFacet(String),

    #[error("unknown sort key: \"{0}\"")]
    UnknownSortKey(String),

    #[error("invalid sort spec \"{spec}\": {reason}")]
    InvalidSortSpec { spec: String, reason: String },

    #[error("page size must be a positive integer, got {0}")]
    InvalidPageSize(usize),
}
