//! Core data structures shared across the decoder
//!
//! - BitMatrix: compact storage for the sampled module grid
//! - DecoderResult: the decoded payload returned to the caller

pub mod decoder_result;
pub mod matrix;

pub use decoder_result::DecoderResult;
pub use matrix::BitMatrix;
