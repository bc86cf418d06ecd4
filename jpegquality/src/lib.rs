//! JPEG quality factor estimation.
//!
//! This crate estimates the libjpeg quality setting (1-100) that produced a
//! JPEG file, by inverse-mapping its stored luminance quantization table
//! through the IJG standard table:
//! - `estimator`: the pure inverse-quantization algorithm
//! - `reader`: JPEG marker/DQT header parsing (no decoding)
//! - `tables`: IJG constant tables
//! - `logging`: tracing-based log setup for binaries

pub mod errors;
pub mod estimator;
pub mod logging;
pub mod reader;
pub mod tables;

pub use errors::{JpegQualityError, Result};
pub use estimator::estimate_quality;
pub use reader::{
    read_luminance_table, read_quality, read_quality_file, QualityReport, SENTINEL_QUALITY,
};
pub use tables::{BLOCK_SIZE, STD_LUMINANCE_QUANT_TBL, ZIGZAG_ORDER};
