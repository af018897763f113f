//! Data-mask removal
//!
//! The encoder XORs one of eight mask patterns over the data region to break
//! up solid areas; decoding reverses it with the same XOR. Function modules
//! are never touched, so applying the mask twice restores the matrix.

use crate::decoder::format::DataMask;
use crate::decoder::function_mask::FunctionMask;
use crate::models::BitMatrix;

/// Toggle every masked data module of `matrix`
pub fn unmask(matrix: &mut BitMatrix, mask: DataMask, function_mask: &FunctionMask) {
    let dimension = matrix.dimension();
    for y in 0..dimension {
        for x in 0..dimension {
            if !function_mask.is_function(x, y) && mask.is_masked(y, x) {
                matrix.flip(x, y);
            }
        }
    }
}
