//! Segmented bitstream decoding, ISO 18004 §6.4 (Hanzi per GB/T 18284-2000)
//!
//! The corrected data codewords form a stream of mode-tagged segments. Each
//! segment decoder is a pure function over the bit source and the running
//! state; ECI designators switch the character set for subsequent BYTE
//! segments and FNC1 flips the `%` handling of alphanumeric data.

use crate::decoder::bit_source::BitSource;
use crate::decoder::format::ECLevel;
use crate::decoder::version::Version;
use crate::error::DecodeError;
use crate::models::DecoderResult;
use crate::text::{self, CharacterSet};

/// ISO 18004 Table 5: the 45-character alphanumeric alphabet
const ALPHANUMERIC_CHARS: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// The only Hanzi subset with defined contents
const GB2312_SUBSET: u32 = 1;

/// Segment mode, encoded as a 4-bit indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// End of the data stream
    Terminator,
    /// Digits packed three to ten bits
    Numeric,
    /// The 45-character alphabet, two characters per eleven bits
    Alphanumeric,
    /// Symbol position and parity of a multi-symbol message
    StructuredAppend,
    /// Raw octets
    Byte,
    /// FNC1 in first position (GS1 data)
    Fnc1FirstPosition,
    /// Extended channel interpretation: switches the character set
    Eci,
    /// Shift_JIS characters packed into thirteen bits
    Kanji,
    /// FNC1 in second position (AIM application indicator follows)
    Fnc1SecondPosition,
    /// GB2312 characters packed into thirteen bits
    Hanzi,
}

impl Mode {
    /// Mode for a 4-bit indicator value
    pub fn for_bits(bits: u32) -> Result<Mode, DecodeError> {
        match bits {
            0x0 => Ok(Mode::Terminator),
            0x1 => Ok(Mode::Numeric),
            0x2 => Ok(Mode::Alphanumeric),
            0x3 => Ok(Mode::StructuredAppend),
            0x4 => Ok(Mode::Byte),
            0x5 => Ok(Mode::Fnc1FirstPosition),
            0x7 => Ok(Mode::Eci),
            0x8 => Ok(Mode::Kanji),
            0x9 => Ok(Mode::Fnc1SecondPosition),
            0xD => Ok(Mode::Hanzi),
            _ => Err(DecodeError::Format),
        }
    }

    /// Width of the character-count field, ISO 18004 Table 3
    pub fn character_count_bits(self, version: Version) -> usize {
        let band = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            Mode::Numeric => [10, 12, 14][band],
            Mode::Alphanumeric => [9, 11, 13][band],
            Mode::Byte => [8, 16, 16][band],
            Mode::Kanji | Mode::Hanzi => [8, 10, 12][band],
            _ => 0,
        }
    }
}

/// Decode the corrected data codewords into a [`DecoderResult`].
///
/// `hinted_charset` names a fallback encoding for BYTE segments when the
/// stream carries no ECI designator; empty disables the hint.
pub fn decode_bit_stream(
    bytes: &[u8],
    version: Version,
    ec_level: ECLevel,
    hinted_charset: &str,
) -> Result<DecoderResult, DecodeError> {
    let mut bits = BitSource::new(bytes);
    let mut result = String::new();
    let mut byte_segments: Vec<Vec<u8>> = Vec::new();
    let mut symbol_sequence = -1;
    let mut parity = -1;
    let mut current_charset = CharacterSet::Unknown;
    let mut fnc1_in_effect = false;

    loop {
        // A stream may legally end without an explicit terminator
        let mode = if bits.available() < 4 {
            Mode::Terminator
        } else {
            Mode::for_bits(bits.read_bits(4)?)?
        };

        match mode {
            Mode::Terminator => break,
            Mode::Fnc1FirstPosition => {
                fnc1_in_effect = true;
            }
            Mode::Fnc1SecondPosition => {
                fnc1_in_effect = true;
                // AIM application indicator; not part of the decoded text
                bits.read_bits(8)?;
            }
            Mode::StructuredAppend => {
                if bits.available() < 16 {
                    return Err(DecodeError::Format);
                }
                symbol_sequence = bits.read_bits(8)? as i32;
                parity = bits.read_bits(8)? as i32;
            }
            Mode::Eci => {
                let designator = parse_eci_designator(&mut bits)?;
                current_charset = text::charset_from_eci(designator);
                if current_charset == CharacterSet::Unknown {
                    return Err(DecodeError::Format);
                }
            }
            Mode::Hanzi => {
                // The subset indicator precedes the character count
                let subset = bits.read_bits(4)?;
                let count = bits.read_bits(Mode::Hanzi.character_count_bits(version))? as usize;
                if subset == GB2312_SUBSET {
                    decode_hanzi_segment(&mut bits, count, &mut result)?;
                }
                // Other subsets have no defined contents and are skipped
            }
            Mode::Numeric => {
                let count = bits.read_bits(Mode::Numeric.character_count_bits(version))? as usize;
                decode_numeric_segment(&mut bits, count, &mut result)?;
            }
            Mode::Alphanumeric => {
                let count =
                    bits.read_bits(Mode::Alphanumeric.character_count_bits(version))? as usize;
                decode_alphanumeric_segment(&mut bits, count, fnc1_in_effect, &mut result)?;
            }
            Mode::Byte => {
                let count = bits.read_bits(Mode::Byte.character_count_bits(version))? as usize;
                decode_byte_segment(
                    &mut bits,
                    count,
                    current_charset,
                    hinted_charset,
                    &mut result,
                    &mut byte_segments,
                )?;
            }
            Mode::Kanji => {
                let count = bits.read_bits(Mode::Kanji.character_count_bits(version))? as usize;
                decode_kanji_segment(&mut bits, count, &mut result)?;
            }
        }
    }

    Ok(DecoderResult {
        text: result,
        raw_bytes: bytes.to_vec(),
        byte_segments,
        ec_level: ec_level.label(),
        structured_append_sequence_number: symbol_sequence,
        structured_append_parity: parity,
        mirrored: false,
    })
}

fn alphanumeric_char(value: u32) -> Result<u8, DecodeError> {
    ALPHANUMERIC_CHARS
        .get(value as usize)
        .copied()
        .ok_or(DecodeError::Format)
}

/// §6.4.3: groups of three digits in 10 bits, with 7- and 4-bit tails
fn decode_numeric_segment(
    bits: &mut BitSource,
    mut count: usize,
    result: &mut String,
) -> Result<(), DecodeError> {
    let mut buffer = Vec::with_capacity(count);
    while count >= 3 {
        if bits.available() < 10 {
            return Err(DecodeError::Format);
        }
        let three_digits = bits.read_bits(10)?;
        if three_digits >= 1000 {
            return Err(DecodeError::Format);
        }
        buffer.push(alphanumeric_char(three_digits / 100)?);
        buffer.push(alphanumeric_char((three_digits / 10) % 10)?);
        buffer.push(alphanumeric_char(three_digits % 10)?);
        count -= 3;
    }
    if count == 2 {
        if bits.available() < 7 {
            return Err(DecodeError::Format);
        }
        let two_digits = bits.read_bits(7)?;
        if two_digits >= 100 {
            return Err(DecodeError::Format);
        }
        buffer.push(alphanumeric_char(two_digits / 10)?);
        buffer.push(alphanumeric_char(two_digits % 10)?);
    } else if count == 1 {
        if bits.available() < 4 {
            return Err(DecodeError::Format);
        }
        let digit = bits.read_bits(4)?;
        if digit >= 10 {
            return Err(DecodeError::Format);
        }
        buffer.push(alphanumeric_char(digit)?);
    }

    text::append_latin1(result, &buffer);
    Ok(())
}

/// §6.4.4: character pairs in 11 bits, single trailing character in 6
fn decode_alphanumeric_segment(
    bits: &mut BitSource,
    mut count: usize,
    fnc1_in_effect: bool,
    result: &mut String,
) -> Result<(), DecodeError> {
    let mut buffer = Vec::with_capacity(count);
    while count > 1 {
        if bits.available() < 11 {
            return Err(DecodeError::Format);
        }
        let two_chars = bits.read_bits(11)?;
        buffer.push(alphanumeric_char(two_chars / 45)?);
        buffer.push(alphanumeric_char(two_chars % 45)?);
        count -= 2;
    }
    if count == 1 {
        if bits.available() < 6 {
            return Err(DecodeError::Format);
        }
        buffer.push(alphanumeric_char(bits.read_bits(6)?)?);
    }

    // §6.4.8.1-2: in FNC1 mode "%%" is a literal percent and a lone "%"
    // becomes the GS separator
    if fnc1_in_effect {
        let mut unescaped = Vec::with_capacity(buffer.len());
        let mut i = 0;
        while i < buffer.len() {
            if buffer[i] == b'%' {
                if i + 1 < buffer.len() && buffer[i + 1] == b'%' {
                    unescaped.push(b'%');
                    i += 2;
                } else {
                    unescaped.push(0x1D);
                    i += 1;
                }
            } else {
                unescaped.push(buffer[i]);
                i += 1;
            }
        }
        buffer = unescaped;
    }

    text::append_latin1(result, &buffer);
    Ok(())
}

/// §6.4.5: raw octets; the character set comes from the active ECI, the
/// caller's hint, or a guess, in that order
fn decode_byte_segment(
    bits: &mut BitSource,
    count: usize,
    mut charset: CharacterSet,
    hinted_charset: &str,
    result: &mut String,
    byte_segments: &mut Vec<Vec<u8>>,
) -> Result<(), DecodeError> {
    if 8 * count > bits.available() {
        return Err(DecodeError::Format);
    }

    let mut bytes = Vec::with_capacity(count);
    for _ in 0..count {
        bytes.push(bits.read_bits(8)? as u8);
    }

    if charset == CharacterSet::Unknown {
        if !hinted_charset.is_empty() {
            charset = text::charset_from_name(hinted_charset);
        }
        if charset == CharacterSet::Unknown {
            charset = text::guess_encoding(&bytes);
        }
    }
    text::append(result, &bytes, charset);
    byte_segments.push(bytes);
    Ok(())
}

/// §6.4.6: 13-bit values mapping to two-byte Shift_JIS characters
fn decode_kanji_segment(
    bits: &mut BitSource,
    count: usize,
    result: &mut String,
) -> Result<(), DecodeError> {
    if count * 13 > bits.available() {
        return Err(DecodeError::Format);
    }

    let mut buffer = Vec::with_capacity(2 * count);
    for _ in 0..count {
        let two_bytes = bits.read_bits(13)?;
        let mut assembled = ((two_bytes / 0xC0) << 8) | (two_bytes % 0xC0);
        if assembled < 0x1F00 {
            // In the 0x8140 to 0x9FFC range
            assembled += 0x8140;
        } else {
            // In the 0xE040 to 0xEBBF range
            assembled += 0xC140;
        }
        buffer.push((assembled >> 8) as u8);
        buffer.push((assembled & 0xFF) as u8);
    }
    text::append(result, &buffer, CharacterSet::ShiftJis);
    Ok(())
}

/// GB/T 18284-2000: 13-bit values mapping to two-byte GB2312 characters
fn decode_hanzi_segment(
    bits: &mut BitSource,
    count: usize,
    result: &mut String,
) -> Result<(), DecodeError> {
    if count * 13 > bits.available() {
        return Err(DecodeError::Format);
    }

    let mut buffer = Vec::with_capacity(2 * count);
    for _ in 0..count {
        let two_bytes = bits.read_bits(13)?;
        let mut assembled = ((two_bytes / 0x60) << 8) | (two_bytes % 0x60);
        if assembled < 0x3BF {
            // In the 0xA1A1 to 0xAAFE range
            assembled += 0xA1A1;
        } else {
            // In the 0xB0A1 to 0xFAFE range
            assembled += 0xA6A1;
        }
        buffer.push((assembled >> 8) as u8);
        buffer.push((assembled & 0xFF) as u8);
    }
    text::append(result, &buffer, CharacterSet::Gb2312);
    Ok(())
}

/// §6.4.2.1: ECI designator in one, two or three bytes
fn parse_eci_designator(bits: &mut BitSource) -> Result<u32, DecodeError> {
    let first_byte = bits.read_bits(8)?;
    if first_byte & 0x80 == 0 {
        return Ok(first_byte & 0x7F);
    }
    if first_byte & 0xC0 == 0x80 {
        return Ok(((first_byte & 0x3F) << 8) | bits.read_bits(8)?);
    }
    if first_byte & 0xE0 == 0xC0 {
        return Ok(((first_byte & 0x1F) << 16) | bits.read_bits(16)?);
    }
    Err(DecodeError::Format)
}
