//! Data/EC block deinterleaving, ISO 18004 §8.6
//!
//! Codewords are interleaved across blocks column-major: the first data
//! codeword of every block in block order, then the second of every block
//! (short blocks in the first group drop out once exhausted), and finally
//! all EC codewords position by position. This module inverts that layout.

use crate::decoder::format::ECLevel;
use crate::decoder::version::Version;
use crate::error::DecodeError;

/// One Reed-Solomon block: data codewords followed by EC codewords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBlock {
    num_data_codewords: usize,
    codewords: Vec<u8>,
}

impl DataBlock {
    /// Number of data codewords at the front of the block
    pub fn num_data_codewords(&self) -> usize {
        self.num_data_codewords
    }

    /// Data and EC codewords together
    pub fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    /// Mutable view for in-place error correction
    pub fn codewords_mut(&mut self) -> &mut [u8] {
        &mut self.codewords
    }
}

/// Regroup the interleaved codeword stream into per-block buffers
pub fn build_data_blocks(
    raw_codewords: &[u8],
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<DataBlock>, DecodeError> {
    let ec_blocks = version.ec_blocks(ec_level);
    let num_blocks = ec_blocks.num_blocks;
    let ec_per_block = ec_blocks.ec_codewords_per_block;
    let total = version.total_codewords();
    if raw_codewords.len() != total || num_blocks == 0 {
        return Err(DecodeError::Format);
    }

    let ec_total = num_blocks * ec_per_block;
    if total <= ec_total {
        return Err(DecodeError::Format);
    }
    let data_total = total - ec_total;

    // Short blocks come first; the remainder of the division gets one extra
    // data codeword each at the end
    let short_data_len = data_total / num_blocks;
    let num_long_blocks = data_total % num_blocks;
    let num_short_blocks = num_blocks - num_long_blocks;
    let long_data_len = short_data_len + 1;

    let data_len = |block: usize| {
        if block < num_short_blocks {
            short_data_len
        } else {
            long_data_len
        }
    };

    let mut blocks: Vec<DataBlock> = (0..num_blocks)
        .map(|block| DataBlock {
            num_data_codewords: data_len(block),
            codewords: Vec::with_capacity(data_len(block) + ec_per_block),
        })
        .collect();

    let mut raw = raw_codewords.iter().copied();
    for i in 0..long_data_len {
        for block in blocks.iter_mut() {
            if i < block.num_data_codewords {
                block
                    .codewords
                    .push(raw.next().ok_or(DecodeError::Format)?);
            }
        }
    }
    for _ in 0..ec_per_block {
        for block in blocks.iter_mut() {
            block
                .codewords
                .push(raw.next().ok_or(DecodeError::Format)?);
        }
    }

    Ok(blocks)
}
