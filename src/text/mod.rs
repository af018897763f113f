//! Character-set service for BYTE, KANJI and HANZI segments
//!
//! Maps ECI designators and IANA-style names to character sets, converts
//! segment bytes to Unicode, and guesses an encoding when the stream gives no
//! hint. Legacy encodings are converted through `encoding_rs`; Latin-1 is
//! appended byte-wise because the WHATWG registry resolves the ISO-8859-1
//! label to windows-1252.

use encoding_rs::Encoding;

/// A character set a BYTE segment can be interpreted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum CharacterSet {
    /// No character set established yet
    Unknown,
    Cp437,
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_9,
    Iso8859_10,
    Iso8859_11,
    Iso8859_13,
    Iso8859_14,
    Iso8859_15,
    Iso8859_16,
    ShiftJis,
    Cp1250,
    Cp1251,
    Cp1252,
    Cp1256,
    Utf16Be,
    Utf8,
    Ascii,
    Big5,
    Gb2312,
    EucKr,
}

impl CharacterSet {
    /// Transcoder for this set, when one exists. `None` means the bytes are
    /// appended as Latin-1 (covers Unknown, ASCII and Cp437, which has no
    /// WHATWG encoding).
    fn encoding(self) -> Option<&'static Encoding> {
        use CharacterSet::*;
        match self {
            Iso8859_2 => Some(encoding_rs::ISO_8859_2),
            Iso8859_3 => Some(encoding_rs::ISO_8859_3),
            Iso8859_4 => Some(encoding_rs::ISO_8859_4),
            Iso8859_5 => Some(encoding_rs::ISO_8859_5),
            Iso8859_6 => Some(encoding_rs::ISO_8859_6),
            Iso8859_7 => Some(encoding_rs::ISO_8859_7),
            Iso8859_8 => Some(encoding_rs::ISO_8859_8),
            Iso8859_9 => Some(encoding_rs::WINDOWS_1254),
            Iso8859_10 => Some(encoding_rs::ISO_8859_10),
            Iso8859_11 => Some(encoding_rs::WINDOWS_874),
            Iso8859_13 => Some(encoding_rs::ISO_8859_13),
            Iso8859_14 => Some(encoding_rs::ISO_8859_14),
            Iso8859_15 => Some(encoding_rs::ISO_8859_15),
            Iso8859_16 => Some(encoding_rs::ISO_8859_16),
            ShiftJis => Some(encoding_rs::SHIFT_JIS),
            Cp1250 => Some(encoding_rs::WINDOWS_1250),
            Cp1251 => Some(encoding_rs::WINDOWS_1251),
            Cp1252 => Some(encoding_rs::WINDOWS_1252),
            Cp1256 => Some(encoding_rs::WINDOWS_1256),
            Utf16Be => Some(encoding_rs::UTF_16BE),
            Utf8 => Some(encoding_rs::UTF_8),
            Big5 => Some(encoding_rs::BIG5),
            Gb2312 => Some(encoding_rs::GBK),
            EucKr => Some(encoding_rs::EUC_KR),
            Unknown | Cp437 | Iso8859_1 | Ascii => None,
        }
    }
}

/// Character set assigned to an ECI designator, ISO 18004 §6.4.2 / AIM ECI
pub fn charset_from_eci(designator: u32) -> CharacterSet {
    use CharacterSet::*;
    match designator {
        0 | 2 => Cp437,
        1 | 3 => Iso8859_1,
        4 => Iso8859_2,
        5 => Iso8859_3,
        6 => Iso8859_4,
        7 => Iso8859_5,
        8 => Iso8859_6,
        9 => Iso8859_7,
        10 => Iso8859_8,
        11 => Iso8859_9,
        12 => Iso8859_10,
        13 => Iso8859_11,
        15 => Iso8859_13,
        16 => Iso8859_14,
        17 => Iso8859_15,
        18 => Iso8859_16,
        20 => ShiftJis,
        21 => Cp1250,
        22 => Cp1251,
        23 => Cp1252,
        24 => Cp1256,
        25 => Utf16Be,
        26 => Utf8,
        27 | 170 => Ascii,
        28 => Big5,
        29 => Gb2312,
        30 => EucKr,
        _ => Unknown,
    }
}

/// Character set for an IANA/Java-style encoding name; case and the
/// separators `-`, `_`, ` ` are ignored
pub fn charset_from_name(name: &str) -> CharacterSet {
    use CharacterSet::*;
    let mut normalized = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            normalized.push(c.to_ascii_uppercase());
        }
    }
    match normalized.as_str() {
        "UTF8" => Utf8,
        "SHIFTJIS" | "SJIS" | "MSKANJI" => ShiftJis,
        "ISO88591" | "LATIN1" | "L1" => Iso8859_1,
        "ISO88592" | "LATIN2" => Iso8859_2,
        "ISO88593" => Iso8859_3,
        "ISO88594" => Iso8859_4,
        "ISO88595" => Iso8859_5,
        "ISO88596" => Iso8859_6,
        "ISO88597" => Iso8859_7,
        "ISO88598" => Iso8859_8,
        "ISO88599" => Iso8859_9,
        "ISO885910" => Iso8859_10,
        "ISO885911" | "TIS620" => Iso8859_11,
        "ISO885913" => Iso8859_13,
        "ISO885914" => Iso8859_14,
        "ISO885915" | "LATIN9" => Iso8859_15,
        "ISO885916" => Iso8859_16,
        "CP437" | "IBM437" => Cp437,
        "CP1250" | "WINDOWS1250" => Cp1250,
        "CP1251" | "WINDOWS1251" => Cp1251,
        "CP1252" | "WINDOWS1252" => Cp1252,
        "CP1256" | "WINDOWS1256" => Cp1256,
        "UTF16BE" | "UNICODEBIG" | "UNICODEBIGUNMARKED" => Utf16Be,
        "USASCII" | "ASCII" => Ascii,
        "BIG5" => Big5,
        "GB2312" | "GBK" | "GB18030" | "EUCCN" => Gb2312,
        "EUCKR" => EucKr,
        _ => Unknown,
    }
}

/// Append `bytes` decoded under `charset` onto `result`
pub fn append(result: &mut String, bytes: &[u8], charset: CharacterSet) {
    match charset.encoding() {
        Some(encoding) => {
            let (text, _, _) = encoding.decode(bytes);
            result.push_str(&text);
        }
        None => append_latin1(result, bytes),
    }
}

/// Append `bytes` as ISO-8859-1: every byte is its own code point
pub fn append_latin1(result: &mut String, bytes: &[u8]) {
    result.extend(bytes.iter().map(|&b| b as char));
}

/// Guess the encoding of an undesignated BYTE segment.
///
/// Fixed priority: Shift_JIS shape (at least one double-byte character and
/// nothing outside the Shift_JIS ranges), UTF-8 byte-order mark, strict
/// UTF-8 validity, then the ISO-8859-1 default.
pub fn guess_encoding(bytes: &[u8]) -> CharacterSet {
    if looks_like_shift_jis(bytes) {
        return CharacterSet::ShiftJis;
    }
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return CharacterSet::Utf8;
    }
    if std::str::from_utf8(bytes).is_ok() {
        return CharacterSet::Utf8;
    }
    CharacterSet::Iso8859_1
}

fn looks_like_shift_jis(bytes: &[u8]) -> bool {
    let mut double_byte_chars = 0;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        // ASCII and half-width katakana stand alone
        if byte <= 0x7F || (0xA1..=0xDF).contains(&byte) {
            i += 1;
            continue;
        }
        if (0x81..=0x9F).contains(&byte) || (0xE0..=0xEB).contains(&byte) {
            match bytes.get(i + 1) {
                Some(&trail) if (0x40..=0xFC).contains(&trail) && trail != 0x7F => {
                    double_byte_chars += 1;
                    i += 2;
                }
                _ => return false,
            }
            continue;
        }
        return false;
    }
    double_byte_chars > 0
}
