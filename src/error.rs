use thiserror::Error;

/// Failure kinds surfaced by [`crate::decode`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The symbol structure or the encoded bitstream violates ISO/IEC 18004:
    /// un-correctable format/version fields, a truncated segment, an invalid
    /// segment value, or an unknown mode/ECI designator.
    #[error("format violation in symbol structure or bitstream")]
    Format,
    /// At least one data block had more errors than its Reed-Solomon code can
    /// correct.
    #[error("error correction failed")]
    Checksum,
}
