//! JPEG header reader collaborator.
//!
//! Walks the marker segments of a JPEG stream far enough to extract the
//! luminance quantization table from a DQT segment, then hands it to the
//! estimator. Nothing past the start-of-scan marker is ever touched; this
//! is header parsing, not decoding.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{JpegQualityError, Result};
use crate::estimator::estimate_quality;
use crate::tables::{BLOCK_SIZE, STD_LUMINANCE_QUANT_TBL, ZIGZAG_ORDER};

const MARKER_TEM: u8 = 0x01;
const MARKER_SOI: u8 = 0xD8;
const MARKER_EOI: u8 = 0xD9;
const MARKER_SOS: u8 = 0xDA;
const MARKER_DQT: u8 = 0xDB;
const MARKER_RST0: u8 = 0xD0;
const MARKER_RST7: u8 = 0xD7;

/// Returned by [`read_quality_file`] when the input cannot be read or is
/// not a well-formed JPEG stream.
pub const SENTINEL_QUALITY: i32 = -1;

/// Extracts the luminance (table id 0) quantization table from a JPEG
/// stream, de-zigzagged into natural order.
///
/// Chrominance and other tables are parsed and skipped. Scanning stops at
/// the SOS marker; reaching it (or the end of the stream) without a
/// luminance table is an error.
pub fn read_luminance_table(data: &[u8]) -> Result<[u16; BLOCK_SIZE]> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != MARKER_SOI {
        return Err(JpegQualityError::InvalidJpeg);
    }

    let mut pos = 2;
    while pos < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }

        // Any number of 0xFF fill bytes may precede a marker.
        while pos < data.len() && data[pos] == 0xFF {
            pos += 1;
        }
        if pos >= data.len() {
            break;
        }

        let marker = data[pos];
        pos += 1;

        // Standalone markers and stuffed bytes carry no length field.
        if marker == 0x00
            || marker == MARKER_TEM
            || marker == MARKER_SOI
            || marker == MARKER_EOI
            || (MARKER_RST0..=MARKER_RST7).contains(&marker)
        {
            continue;
        }

        if pos + 2 > data.len() {
            return Err(JpegQualityError::TruncatedSegment);
        }
        let length = usize::from(u16::from_be_bytes([data[pos], data[pos + 1]]));
        if length < 2 {
            return Err(JpegQualityError::TruncatedSegment);
        }
        let segment_end = pos + length;
        if segment_end > data.len() {
            return Err(JpegQualityError::TruncatedSegment);
        }

        if marker == MARKER_DQT {
            if let Some(table) = parse_dqt(&data[pos + 2..segment_end])? {
                return Ok(table);
            }
        }

        if marker == MARKER_SOS {
            break;
        }
        pos = segment_end;
    }

    Err(JpegQualityError::NoQuantTable)
}

/// Parses the table units of a DQT payload, returning the luminance table
/// if the segment contains one.
///
/// Each unit is a Pq/Tq byte followed by 64 coefficients in zig-zag order;
/// 16-bit precision units (`Pq != 0`) carry two big-endian bytes per
/// coefficient.
fn parse_dqt(payload: &[u8]) -> Result<Option<[u16; BLOCK_SIZE]>> {
    let mut cursor = 0;
    while cursor < payload.len() {
        let pq_tq = payload[cursor];
        cursor += 1;

        let sixteen_bit = (pq_tq >> 4) != 0;
        let table_id = pq_tq & 0x0F;
        let width = if sixteen_bit { 2 } else { 1 };

        if cursor + BLOCK_SIZE * width > payload.len() {
            warn!(
                payload_len = payload.len(),
                table_id, "DQT segment too short for its table unit"
            );
            return Err(JpegQualityError::WrongTableSize {
                length: payload.len(),
            });
        }

        let mut table = [0u16; BLOCK_SIZE];
        for &natural in ZIGZAG_ORDER.iter() {
            let value = if sixteen_bit {
                u16::from_be_bytes([payload[cursor], payload[cursor + 1]])
            } else {
                u16::from(payload[cursor])
            };
            cursor += width;
            table[natural] = value;
        }

        if table_id == 0 {
            debug!(
                precision = if sixteen_bit { 16 } else { 8 },
                "found luminance quantization table"
            );
            return Ok(Some(table));
        }
        debug!(table_id, "skipping non-luminance quantization table");
    }

    Ok(None)
}

/// Reads a JPEG stream and estimates its encoding quality factor.
pub fn read_quality(data: &[u8]) -> Result<i32> {
    let table = read_luminance_table(data)?;
    Ok(estimate_quality(&table, &STD_LUMINANCE_QUANT_TBL))
}

/// Per-file estimation result, serialized as-is in the CLI's JSON mode.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub path: PathBuf,
    pub quality: i32,
}

impl QualityReport {
    /// Runs the full read-and-estimate pipeline for one file.
    pub fn for_file(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            quality: read_quality_file(path),
        }
    }
}

/// File-level convenience: any failure (unreadable file, not a JPEG,
/// missing table) maps to [`SENTINEL_QUALITY`] after being logged.
pub fn read_quality_file(path: &Path) -> i32 {
    let outcome = std::fs::read(path)
        .map_err(JpegQualityError::from)
        .and_then(|data| read_quality(&data));

    match outcome {
        Ok(quality) => quality,
        Err(error) => {
            warn!(path = %path.display(), %error, "quality estimation failed");
            SENTINEL_QUALITY
        }
    }
}
