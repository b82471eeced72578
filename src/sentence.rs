//! `$GPRMC` sentence rendering and checking.
//!
//! Wire format:
//!
//! ```text
//! $GPRMC,hhmmss.00,A,3000.0000,N,12000.0000,E,0.0,0.0,010124,,,A*CC\r\n
//! ```
//!
//! Everything except the time field is fixed. `CC` is the XOR of every
//! byte between `$` and `*`, as two upper-case hex digits.

use core::fmt::Write;

use heapless::String;

use crate::clock::VirtualClock;
use crate::error::{Error, Result};

/// Longest sentence NMEA 0183 allows, delimiters and CR LF included.
pub const MAX_SENTENCE_LEN: usize = 82;

const START: char = '$';
const CHECKSUM_DELIMITER: char = '*';
const TERMINATOR: &str = "\r\n";

const SENTENCE_ID: &str = "GPRMC";
/// Status, fixed position, speed, course, date, magnetic variation, mode.
const FIXED_FIELDS: &str = "A,3000.0000,N,12000.0000,E,0.0,0.0,010124,,,A";

/// Byte range of `hhmmss.ss` within a rendered sentence.
const TIME_FIELD: core::ops::Range<usize> = 7..16;

/// A framed sentence, ready to write to the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sentence(String<MAX_SENTENCE_LEN>);

impl Sentence {
    /// Renders the sentence for `time` into a stack buffer.
    pub fn render(time: &VirtualClock) -> Result<Self> {
        let mut field = [0u8; 9];
        let time_field = format_no_std::show(
            &mut field,
            format_args!(
                "{:02}{:02}{:02}.00",
                time.hour(),
                time.minute(),
                time.second()
            ),
        )
        .map_err(|_| Error::Capacity)?;

        let mut frame = String::<MAX_SENTENCE_LEN>::new();
        frame.push(START).map_err(|()| Error::Capacity)?;
        write!(frame, "{SENTENCE_ID},{time_field},{FIXED_FIELDS}").map_err(|_| Error::Capacity)?;

        let [high, low] = hex_digits(checksum(&frame.as_bytes()[START.len_utf8()..]));
        frame.push(CHECKSUM_DELIMITER).map_err(|()| Error::Capacity)?;
        frame.push(char::from(high)).map_err(|()| Error::Capacity)?;
        frame.push(char::from(low)).map_err(|()| Error::Capacity)?;
        frame.push_str(TERMINATOR).map_err(|()| Error::Capacity)?;

        Ok(Self(frame))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The `hhmmss.ss` field.
    pub fn time_field(&self) -> &str {
        self.0.get(TIME_FIELD).unwrap_or_default()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Sentence {
    fn format(&self, fmt: defmt::Formatter<'_>) {
        defmt::write!(fmt, "{=str}", self.as_str().trim_end());
    }
}

/// XOR of every byte in `payload`.
pub fn checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(0, |sum, byte| sum ^ byte)
}

/// Upper-case, zero-padded hex digits of `value`.
pub const fn hex_digits(value: u8) -> [u8; 2] {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    [DIGITS[(value >> 4) as usize], DIGITS[(value & 0x0f) as usize]]
}

fn parse_hex_digit(digit: u8) -> Result<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(Error::BadHex),
    }
}

/// Checks the framing and checksum of `frame`, returning the checksum.
pub fn validate(frame: &str) -> Result<u8> {
    let body = frame.strip_prefix(START).ok_or(Error::MissingStart)?;
    let body = body.strip_suffix(TERMINATOR).ok_or(Error::MissingTerminator)?;
    let (payload, transmitted) = body
        .rsplit_once(CHECKSUM_DELIMITER)
        .ok_or(Error::MissingChecksum)?;

    let found = match transmitted.as_bytes() {
        [high, low] => (parse_hex_digit(*high)? << 4) | parse_hex_digit(*low)?,
        _ => return Err(Error::BadHex),
    };
    let expected = checksum(payload.as_bytes());
    if expected == found {
        Ok(found)
    } else {
        Err(Error::ChecksumMismatch { expected, found })
    }
}
