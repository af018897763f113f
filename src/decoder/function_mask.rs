//! Function-module map for a symbol version
//!
//! Marks every module that belongs to a fixed pattern (finders with their
//! separators and format strips, alignment patterns, timing lines, version
//! fields, dark module) so the codeword walk and the unmasker can skip them.

use crate::decoder::version::Version;
use crate::models::BitMatrix;

/// Function-module map; true = function module, false = data module
pub struct FunctionMask {
    modules: BitMatrix,
}

impl FunctionMask {
    /// Build the map for `version`
    pub fn new(version: Version) -> Self {
        let dimension = version.dimension();
        let mut modules = BitMatrix::new(dimension);

        // Finder patterns with separators, format strips and the dark module
        mark_region(&mut modules, 0, 0, 9, 9);
        mark_region(&mut modules, dimension - 8, 0, 8, 9);
        mark_region(&mut modules, 0, dimension - 8, 9, 8);

        // Alignment patterns, skipping the three finder corners
        let centers = version.alignment_pattern_centers();
        let last = centers.len();
        for (row, &cy) in centers.iter().enumerate() {
            for (col, &cx) in centers.iter().enumerate() {
                if (row == 0 && (col == 0 || col == last - 1)) || (row == last - 1 && col == 0) {
                    continue;
                }
                mark_region(&mut modules, cx - 2, cy - 2, 5, 5);
            }
        }

        // Timing patterns
        mark_region(&mut modules, 6, 9, 1, dimension - 17);
        mark_region(&mut modules, 9, 6, dimension - 17, 1);

        // Version fields
        if version.number() > 6 {
            mark_region(&mut modules, dimension - 11, 0, 3, 6);
            mark_region(&mut modules, 0, dimension - 11, 6, 3);
        }

        Self { modules }
    }

    /// Whether the module at (x, y) belongs to a function pattern
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// Number of data modules left for codewords and remainder bits
    pub fn data_module_count(&self) -> usize {
        let dimension = self.modules.dimension();
        let mut count = 0;
        for y in 0..dimension {
            for x in 0..dimension {
                if !self.modules.get(x, y) {
                    count += 1;
                }
            }
        }
        count
    }
}

fn mark_region(matrix: &mut BitMatrix, left: usize, top: usize, width: usize, height: usize) {
    for y in top..top + height {
        for x in left..left + width {
            matrix.set(x, y, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Remainder bits per version, ISO 18004 Table 1
    const REMAINDER_BITS: [usize; 41] = [
        0, 0, 7, 7, 7, 7, 7, 0, 0, 0, 0, 0, 0, 0, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4, 4, 3, 3,
        3, 3, 3, 3, 3, 0, 0, 0, 0, 0, 0,
    ];

    #[test]
    fn test_data_module_count_matches_codeword_capacity() {
        for number in 1..=40 {
            let version = Version::new(number).unwrap();
            let mask = FunctionMask::new(version);
            assert_eq!(
                mask.data_module_count(),
                8 * version.total_codewords() + REMAINDER_BITS[number as usize],
                "version {number}"
            );
        }
    }

    #[test]
    fn test_version_one_landmarks() {
        let mask = FunctionMask::new(Version::new(1).unwrap());
        // Finder corner, timing, format strip
        assert!(mask.is_function(0, 0));
        assert!(mask.is_function(8, 8));
        assert!(mask.is_function(6, 10));
        assert!(mask.is_function(10, 6));
        assert!(mask.is_function(8, 13));
        // Data area
        assert!(!mask.is_function(9, 9));
        assert!(!mask.is_function(20, 20));
        assert!(!mask.is_function(12, 10));
    }

    #[test]
    fn test_alignment_and_version_blocks() {
        let mask = FunctionMask::new(Version::new(7).unwrap());
        // Alignment pattern centered at (22, 38) spans a 5x5 block
        assert!(mask.is_function(22, 38));
        assert!(mask.is_function(20, 36));
        assert!(mask.is_function(24, 40));
        assert!(!mask.is_function(25, 38));
        // Version fields
        assert!(mask.is_function(34, 0));
        assert!(mask.is_function(36, 5));
        assert!(mask.is_function(0, 34));
        assert!(mask.is_function(5, 36));
        assert!(!mask.is_function(33, 0));
    }
}
