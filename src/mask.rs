//! Subscription mask: one bit per producer channel.
//!
//! The mask is opaque to the client. It is sent once, as the first eight
//! bytes on a fresh connection, little-endian.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

/// Size of the handshake on the wire.
pub const MASK_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask(pub u64);

impl Mask {
    /// Every channel selected.
    pub const ALL: Mask = Mask(u64::MAX);

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn to_wire(self) -> [u8; MASK_SIZE] {
        let mut buf = [0u8; MASK_SIZE];
        <LittleEndian as ByteOrder>::write_u64(&mut buf, self.0);
        buf
    }
}

impl Default for Mask {
    fn default() -> Mask {
        Mask::ALL
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskErrorKind {
    Empty,
    InvalidDigit,
    Separator,
    LeadingZero,
    Overflow,
}

impl fmt::Display for MaskErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MaskErrorKind::Empty => "no digits",
            MaskErrorKind::InvalidDigit => "invalid digit for its base",
            MaskErrorKind::Separator => "misplaced `_` separator",
            MaskErrorKind::LeadingZero => {
                "leading zeros are not allowed in decimal, use 0o for octal"
            }
            MaskErrorKind::Overflow => "does not fit in 64 bits",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid mask `{input}`: {kind}")]
pub struct ParseMaskError {
    input: String,
    kind: MaskErrorKind,
}

impl ParseMaskError {
    fn new(input: &str, kind: MaskErrorKind) -> ParseMaskError {
        ParseMaskError { input: input.to_string(), kind }
    }

    pub fn kind(&self) -> MaskErrorKind {
        self.kind
    }
}

fn split_radix(s: &str) -> (u32, &str) {
    let b = s.as_bytes();
    if b.len() >= 2 && b[0] == b'0' {
        match b[1] {
            b'x' | b'X' => return (16, &s[2..]),
            b'o' | b'O' => return (8, &s[2..]),
            b'b' | b'B' => return (2, &s[2..]),
            _ => {}
        }
    }
    (10, s)
}

/// Accepts decimal, `0x`, `0o` and `0b` literals with `_` between digits and
/// an optional leading `+`.
impl FromStr for Mask {
    type Err = ParseMaskError;

    fn from_str(input: &str) -> Result<Mask, ParseMaskError> {
        let trimmed = input.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let (radix, body) = split_radix(unsigned);
        // A single separator may follow a base prefix, as in `0x_ff`.
        let digits = if radix != 10 { body.strip_prefix('_').unwrap_or(body) } else { body };

        if digits.is_empty() {
            return Err(ParseMaskError::new(input, MaskErrorKind::Empty));
        }
        if !digits.bytes().all(|c| c.is_ascii_alphanumeric() || c == b'_') {
            return Err(ParseMaskError::new(input, MaskErrorKind::InvalidDigit));
        }
        if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
            return Err(ParseMaskError::new(input, MaskErrorKind::Separator));
        }

        let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
        if radix == 10 && cleaned.len() > 1 && cleaned.starts_with('0')
            && cleaned.bytes().any(|c| c != b'0')
        {
            return Err(ParseMaskError::new(input, MaskErrorKind::LeadingZero));
        }

        match u64::from_str_radix(&cleaned, radix) {
            Ok(bits) => Ok(Mask(bits)),
            Err(e) => {
                let kind = match e.kind() {
                    IntErrorKind::PosOverflow => MaskErrorKind::Overflow,
                    _ => MaskErrorKind::InvalidDigit,
                };
                Err(ParseMaskError::new(input, kind))
            }
        }
    }
}
