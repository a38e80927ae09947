use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("file is shorter than the cassette headers")]
    Truncated,
    #[error("invalid UPM header")]
    InvalidUpmHeader,
    #[error("invalid program header")]
    InvalidProgramHeader,
    #[error("cassette payload is truncated ({expected} bytes declared, {actual} present)")]
    PayloadTruncated { expected: usize, actual: usize },
}

pub mod cas;
pub mod name;
