//! Error types for JPEG header parsing and quality estimation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JpegQualityError {
    #[error("Not a valid JPEG: missing SOI signature")]
    InvalidJpeg,

    #[error("Truncated JPEG: stream ends inside a marker segment")]
    TruncatedSegment,

    #[error("Wrong size for quantization table: segment payload of {length} bytes")]
    WrongTableSize { length: usize },

    #[error("No luminance quantization table found before start of scan")]
    NoQuantTable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, JpegQualityError>;
