//! QR symbol decoding pipeline
//!
//! Leaves first: GF(256) Reed-Solomon correction, BCH format/version
//! recovery, the function-module map and data masks, the zig-zag codeword
//! walk, block deinterleaving, and the segmented bitstream decoder. The
//! driver in `qr_decoder` wires them together and handles the mirror retry.

/// BCH matching for format and version fields
pub mod bch;
/// MSB-first bit reader over the corrected data bytes
pub mod bit_source;
/// Codeword extraction from the unmasked matrix
pub mod bitstream;
/// Data/EC block deinterleaving
pub mod data_block;
/// Format information: EC level and data mask
pub mod format;
/// Function-module map per version
pub mod function_mask;
/// Segmented bitstream decoding (modes, ECI, FNC1, structured append)
pub mod payload;
/// Top-level driver with mirror retry
pub mod qr_decoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Data-mask removal
pub mod unmask;
/// Version tables and version-information recovery
pub mod version;
