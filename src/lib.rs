//! qrdec - core QR Code decoder
//!
//! Decodes a QR symbol that an image pipeline has already localized, sampled
//! and binarized into a square module matrix. Covers ISO/IEC 18004:2006
//! versions 1-40 with all data modes (numeric, alphanumeric, byte, Kanji,
//! ECI, FNC1, structured append) plus Hanzi mode per GB/T 18284-2000, and
//! recovers symbols mirrored along their main diagonal.
//!
//! ```
//! use qrdec::BitMatrix;
//!
//! let matrix = BitMatrix::new(21);
//! // ... fill the matrix from the sampling stage ...
//! match qrdec::decode(&matrix, "") {
//!     Ok(result) => println!("{}", result.text),
//!     Err(err) => eprintln!("no QR content: {err}"),
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Decoding pipeline (error correction, format/version recovery, bitstream)
pub mod decoder;
/// Decode error kinds
pub mod error;
/// Core data structures (BitMatrix, DecoderResult)
pub mod models;
/// Character-set services (ECI registry, conversion, guessing)
pub mod text;

pub use decoder::qr_decoder::decode;
pub use error::DecodeError;
pub use models::{BitMatrix, DecoderResult};
