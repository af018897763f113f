//! Version descriptors and version-information recovery
//!
//! A version fixes the symbol geometry: dimension, alignment-pattern grid,
//! total codeword count and the data/EC block layout per correction level.
//! Versions 1..=6 follow directly from the dimension; larger symbols carry
//! two redundant 18-bit BCH-protected version fields.

use crate::decoder::bch;
use crate::decoder::format::ECLevel;
use crate::error::DecodeError;
use crate::models::BitMatrix;

/// Smallest defined version
pub const MIN_VERSION: u8 = 1;
/// Largest defined version
pub const MAX_VERSION: u8 = 40;

/// Alignment pattern center coordinates, ISO 18004 Annex E.
/// Indexed by version - 1; each axis uses the same coordinate list.
static ALIGNMENT_PATTERN_CENTERS: [&[usize]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

// Block tables from ISO 18004 Table 13-22, indexed [ec level][version].
// EC codewords per block are constant across all blocks of a symbol.
const EC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // L
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // M
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Q
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // H
];

const NUM_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // L
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // M
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Q
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // H
];

/// EC block layout of one symbol: `num_blocks` blocks, each carrying
/// `ec_codewords_per_block` EC codewords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ECBlocks {
    /// Number of RS blocks in the symbol
    pub num_blocks: usize,
    /// EC codewords appended to every block
    pub ec_codewords_per_block: usize,
}

/// A symbol version 1..=40
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version(u8);

impl Version {
    /// Version for a number in 1..=40
    pub fn new(number: u8) -> Option<Self> {
        (MIN_VERSION..=MAX_VERSION)
            .contains(&number)
            .then_some(Self(number))
    }

    /// Version number 1..=40
    pub fn number(self) -> u8 {
        self.0
    }

    /// Modules along either axis: 21 + 4 * (version - 1)
    pub fn dimension(self) -> usize {
        17 + 4 * self.0 as usize
    }

    /// Codewords in the symbol, data and EC together.
    /// Derived from the module count left after all function patterns.
    pub fn total_codewords(self) -> usize {
        let n = self.0 as usize;
        let mut bits = (16 * n + 128) * n + 64;
        if n >= 2 {
            let num_align = n / 7 + 2;
            bits -= (25 * num_align - 10) * num_align - 55;
            if n >= 7 {
                bits -= 36;
            }
        }
        bits / 8
    }

    /// Alignment pattern center coordinates for both axes
    pub fn alignment_pattern_centers(self) -> &'static [usize] {
        ALIGNMENT_PATTERN_CENTERS[self.0 as usize - 1]
    }

    /// EC block layout at the given correction level
    pub fn ec_blocks(self, ec_level: ECLevel) -> ECBlocks {
        let row = ec_level.table_index();
        ECBlocks {
            num_blocks: NUM_BLOCKS[row][self.0 as usize] as usize,
            ec_codewords_per_block: EC_CODEWORDS_PER_BLOCK[row][self.0 as usize] as usize,
        }
    }
}

/// Determine the version of the symbol in `matrix`.
///
/// Small symbols are sized directly from the dimension. From version 7 up the
/// two 18-bit version fields next to the top-right and bottom-left finder
/// patterns are BCH-decoded; the recovered version must agree with the
/// dimension. With `mirrored` set every module probe is transposed.
pub fn read_version(matrix: &BitMatrix, mirrored: bool) -> Result<Version, DecodeError> {
    let dimension = matrix.dimension();
    if !(21..=177).contains(&dimension) || dimension % 4 != 1 {
        return Err(DecodeError::Format);
    }

    let provisional = ((dimension - 17) / 4) as u8;
    if provisional <= 6 {
        return Version::new(provisional).ok_or(DecodeError::Format);
    }

    let ij_min = dimension - 11;

    // Top-right field, 3 modules wide by 6 tall
    let mut bits: u32 = 0;
    for j in (0..6).rev() {
        for i in (ij_min..=dimension - 9).rev() {
            bits = (bits << 1) | module(matrix, i, j, mirrored);
        }
    }
    if let Some(version) = decode_version_bits(bits, dimension) {
        return Ok(version);
    }

    // Bottom-left field, transposed layout
    let mut bits: u32 = 0;
    for i in (0..6).rev() {
        for j in (ij_min..=dimension - 9).rev() {
            bits = (bits << 1) | module(matrix, i, j, mirrored);
        }
    }
    decode_version_bits(bits, dimension).ok_or(DecodeError::Format)
}

fn decode_version_bits(bits: u32, dimension: usize) -> Option<Version> {
    let (number, distance) = bch::closest_version_codeword(bits);
    if distance > 3 {
        return None;
    }
    let version = Version::new(number as u8)?;
    (version.dimension() == dimension).then_some(version)
}

fn module(matrix: &BitMatrix, x: usize, y: usize, mirrored: bool) -> u32 {
    let bit = if mirrored {
        matrix.get(y, x)
    } else {
        matrix.get(x, y)
    };
    bit as u32
}
