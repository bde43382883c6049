use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("delimiter {0:?} must be a single ASCII character other than a line break")]
    InvalidDelimiter(char),
    #[error("quote character {0:?} must be a single ASCII character other than a line break")]
    InvalidQuoteChar(char),
    #[error("delimiter and quote character are both {0:?}")]
    DelimiterIsQuote(char),
    #[error("header row has no columns")]
    EmptyHeader,
    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
