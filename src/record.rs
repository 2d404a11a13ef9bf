use std::fmt;

use byteorder::{ByteOrder, LittleEndian};

/// One sample pushed by the producer: a timestamp in seconds since the
/// producer's epoch and the 64-bit value observed at that time.
///
/// On the wire a record is exactly [`EventRecord::SIZE`] bytes:
///
/// | offset | size | field                      |
/// |--------|------|----------------------------|
/// | 0      | 8    | `timestamp`, f64 LE        |
/// | 8      | 8    | `value`, u64 LE            |
///
/// There is no length prefix; the fixed size is the only framing.
#[derive(Debug, Clone, Copy)]
pub struct EventRecord {
    pub timestamp: f64,
    pub value: u64,
}

impl EventRecord {
    pub const SIZE: usize = 16;

    pub fn new(timestamp: f64, value: u64) -> EventRecord {
        EventRecord { timestamp, value }
    }

    pub fn decode(buf: &[u8; EventRecord::SIZE]) -> EventRecord {
        EventRecord {
            timestamp: <LittleEndian as ByteOrder>::read_f64(&buf[0..8]),
            value: <LittleEndian as ByteOrder>::read_u64(&buf[8..16]),
        }
    }

    pub fn encode(&self) -> [u8; EventRecord::SIZE] {
        let mut buf = [0u8; EventRecord::SIZE];
        <LittleEndian as ByteOrder>::write_f64(&mut buf[0..8], self.timestamp);
        <LittleEndian as ByteOrder>::write_u64(&mut buf[8..16], self.value);
        buf
    }
}

// Bitwise, so NaN payloads and -0.0 survive comparisons in tests.
impl PartialEq for EventRecord {
    fn eq(&self, other: &EventRecord) -> bool {
        self.timestamp.to_bits() == other.timestamp.to_bits() && self.value == other.value
    }
}

impl Eq for EventRecord {}

/// `<timestamp>: <value>`, timestamp fixed-point with ten fractional digits
/// in a field at least five wide, value as sixteen lowercase hex digits.
/// Non-finite timestamps print as `nan`/`inf`, the way C's `%f` spells them.
impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.timestamp;
        if t.is_finite() {
            return write!(f, "{:5.10}: {:016x}", t, self.value);
        }
        let word = match (t.is_nan(), t.is_sign_negative()) {
            (true, false) => "nan",
            (true, true) => "-nan",
            (false, false) => "inf",
            (false, true) => "-inf",
        };
        write!(f, "{:>5}: {:016x}", word, self.value)
    }
}
