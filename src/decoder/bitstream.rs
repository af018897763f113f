//! Codeword extraction from the unmasked matrix
//!
//! Data modules are laid out in two-module-wide column strips, read right to
//! left; within a strip the scan alternates upward and downward and the
//! right module of each row comes first. The vertical timing column (x = 6)
//! is skipped entirely. Every 8 data bits form one codeword, MSB first;
//! trailing remainder bits are discarded.

use crate::decoder::function_mask::FunctionMask;
use crate::decoder::version::Version;
use crate::error::DecodeError;
use crate::models::BitMatrix;

/// Read all codewords of the symbol in placement order
pub fn read_codewords(
    matrix: &BitMatrix,
    version: Version,
    function_mask: &FunctionMask,
) -> Result<Vec<u8>, DecodeError> {
    let dimension = matrix.dimension();
    let total_codewords = version.total_codewords();
    let mut result = Vec::with_capacity(total_codewords);

    let mut current_byte: u32 = 0;
    let mut bits_read = 0;
    let mut reading_up = true;

    let mut j = dimension - 1;
    loop {
        if j == 6 {
            j -= 1;
        }
        for count in 0..dimension {
            let i = if reading_up { dimension - 1 - count } else { count };
            for col in 0..2 {
                let x = j - col;
                if function_mask.is_function(x, i) {
                    continue;
                }
                bits_read += 1;
                current_byte <<= 1;
                if matrix.get(x, i) {
                    current_byte |= 1;
                }
                if bits_read == 8 {
                    result.push(current_byte as u8);
                    current_byte = 0;
                    bits_read = 0;
                }
            }
        }
        reading_up = !reading_up;
        if j < 3 {
            break;
        }
        j -= 2;
    }

    if result.len() != total_codewords {
        return Err(DecodeError::Format);
    }
    Ok(result)
}
