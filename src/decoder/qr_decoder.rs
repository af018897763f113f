//! Top-level decode driver
//!
//! Runs the full pipeline over a private copy of the caller's matrix:
//! version and format recovery, unmasking, codeword extraction, block
//! deinterleaving, Reed-Solomon correction and bitstream decoding. A failed
//! pass is retried once with every read transposed, recovering symbols that
//! were mirrored along their main diagonal.

use log::{debug, warn};

use crate::decoder::data_block::{build_data_blocks, DataBlock};
use crate::decoder::format::read_format_information;
use crate::decoder::function_mask::FunctionMask;
use crate::decoder::payload::decode_bit_stream;
use crate::decoder::reed_solomon::ReedSolomonDecoder;
use crate::decoder::unmask::unmask;
use crate::decoder::version::read_version;
use crate::decoder::bitstream::read_codewords;
use crate::error::DecodeError;
use crate::models::{BitMatrix, DecoderResult};

/// Decode one symbol from a sampled module matrix.
///
/// `hinted_charset` optionally names the encoding of BYTE segments that
/// carry no ECI designator (e.g. "UTF-8", "Shift_JIS"); pass "" to let the
/// decoder guess. The input matrix is never modified.
pub fn decode(bits: &BitMatrix, hinted_charset: &str) -> Result<DecoderResult, DecodeError> {
    match decode_oriented(bits, hinted_charset, false) {
        Ok(result) => Ok(result),
        Err(first_error) => {
            debug!("straight decode failed ({first_error}), retrying mirrored");
            let mut result = decode_oriented(bits, hinted_charset, true)?;
            result.mirrored = true;
            Ok(result)
        }
    }
}

fn decode_oriented(
    bits: &BitMatrix,
    hinted_charset: &str,
    mirrored: bool,
) -> Result<DecoderResult, DecodeError> {
    let version = read_version(bits, mirrored)?;
    let format_info = read_format_information(bits, mirrored)?;

    let mut matrix = bits.clone();
    if mirrored {
        matrix.mirror();
    }

    let function_mask = FunctionMask::new(version);
    unmask(&mut matrix, format_info.data_mask, &function_mask);

    let codewords = read_codewords(&matrix, version, &function_mask)?;
    let mut blocks = build_data_blocks(&codewords, version, format_info.ec_level)?;

    let total_data: usize = blocks.iter().map(DataBlock::num_data_codewords).sum();
    let mut data = Vec::with_capacity(total_data);
    for block in blocks.iter_mut() {
        correct_block(block)?;
        data.extend_from_slice(&block.codewords()[..block.num_data_codewords()]);
    }

    decode_bit_stream(&data, version, format_info.ec_level, hinted_charset)
}

fn correct_block(block: &mut DataBlock) -> Result<(), DecodeError> {
    let num_ec = block.codewords().len() - block.num_data_codewords();
    let num_data = block.num_data_codewords();
    ReedSolomonDecoder::new(num_ec)
        .decode(block.codewords_mut())
        .map_err(|_| {
            warn!("block with {num_data} data codewords exceeded its correction capacity");
            DecodeError::Checksum
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Known-good 21x21 symbol for "4376471154038" (version 1-M),
    /// generated with the Python qrcode library
    const GOLDEN: &[&str] = &[
        "XXXXXXX.....X.XXXXXXX",
        "X.....X..X....X.....X",
        "X.XXX.X...XX..X.XXX.X",
        "X.XXX.X...X...X.XXX.X",
        "X.XXX.X..XXXX.X.XXX.X",
        "X.....X.X.X...X.....X",
        "XXXXXXX.X.X.X.XXXXXXX",
        ".........X...........",
        "X..X.XX.XXXXXX.X.....",
        "XXX.X..XX..X.X.X.XX..",
        "X..X.XXXX.XX..XXX...X",
        "..X.X..X....XXXXX....",
        "..X...XX.X.X.XXX.XX..",
        "........X.X..XXXX.XX.",
        "XXXXXXX...XXX.X.XXXX.",
        "X.....X.X.....XX....X",
        "X.XXX.X..XX.XXX..X.XX",
        "X.XXX.X.X.X..XXXX..XX",
        "X.XXX.X..XXX.XXX.X..X",
        "X.....X..XXXX..XX..X.",
        "XXXXXXX.XXX..X.XXX...",
    ];

    fn matrix_from(rows: &[&str]) -> BitMatrix {
        let mut matrix = BitMatrix::new(rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.bytes().enumerate() {
                matrix.set(x, y, c == b'X');
            }
        }
        matrix
    }

    #[test]
    fn test_golden_matrix_decode() {
        let matrix = matrix_from(GOLDEN);
        let result = decode(&matrix, "").expect("golden symbol must decode");
        assert_eq!(result.text, "4376471154038");
        assert_eq!(result.ec_level, "M");
        assert!(!result.mirrored);
    }

    #[test]
    fn test_golden_matrix_decode_is_idempotent() {
        let matrix = matrix_from(GOLDEN);
        let snapshot = matrix.clone();
        let first = decode(&matrix, "").unwrap();
        let second = decode(&matrix, "").unwrap();
        assert_eq!(first, second);
        assert_eq!(matrix, snapshot);
    }

    #[test]
    fn test_blank_matrix_fails() {
        let matrix = BitMatrix::new(21);
        assert!(decode(&matrix, "").is_err());
    }

    #[test]
    fn test_undersized_matrix_is_format_error() {
        let matrix = BitMatrix::new(15);
        assert_eq!(decode(&matrix, ""), Err(DecodeError::Format));
    }
}
