//! Draft 8 marker bytes and numeric thresholds.

use std::ops::RangeInclusive;

/// One-byte type markers of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Marker {
    Noop = b'N',
    Null = b'Z',
    False = b'F',
    True = b'T',
    Byte = b'B',
    Int16 = b'i',
    Int32 = b'I',
    Int64 = b'L',
    Float32 = b'd',
    Float64 = b'D',
    HugeShort = b'h',
    HugeLong = b'H',
    StrShort = b's',
    StrLong = b'S',
    ArrayShort = b'a',
    ArrayLong = b'A',
    ObjectShort = b'o',
    ObjectLong = b'O',
    End = b'E',
}

impl Marker {
    #[inline]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    pub fn as_char(self) -> char {
        self as u8 as char
    }

    pub fn from_u8(byte: u8) -> Option<Self> {
        let marker = match byte {
            b'N' => Marker::Noop,
            b'Z' => Marker::Null,
            b'F' => Marker::False,
            b'T' => Marker::True,
            b'B' => Marker::Byte,
            b'i' => Marker::Int16,
            b'I' => Marker::Int32,
            b'L' => Marker::Int64,
            b'd' => Marker::Float32,
            b'D' => Marker::Float64,
            b'h' => Marker::HugeShort,
            b'H' => Marker::HugeLong,
            b's' => Marker::StrShort,
            b'S' => Marker::StrLong,
            b'a' => Marker::ArrayShort,
            b'A' => Marker::ArrayLong,
            b'o' => Marker::ObjectShort,
            b'O' => Marker::ObjectLong,
            b'E' => Marker::End,
            _ => return None,
        };
        Some(marker)
    }

    pub fn is_container(self) -> bool {
        matches!(
            self,
            Marker::ArrayShort | Marker::ArrayLong | Marker::ObjectShort | Marker::ObjectLong
        )
    }

    /// Short/long marker pair for a length-prefixed payload of `len` units.
    pub fn for_length(short: Marker, long: Marker, len: usize) -> Marker {
        if len < SHORT_LENGTH_LIMIT {
            short
        } else {
            long
        }
    }
}

/// Length byte written after `a`/`o` to announce an unsized container.
pub const UNSIZED_LENGTH: u8 = 0xff;

/// Lengths strictly below this use the 1-byte length field.
pub const SHORT_LENGTH_LIMIT: usize = 255;

pub const BYTE_RANGE: RangeInclusive<i128> = (i8::MIN as i128)..=(i8::MAX as i128);
pub const INT16_RANGE: RangeInclusive<i128> = (i16::MIN as i128)..=(i16::MAX as i128);
pub const INT32_RANGE: RangeInclusive<i128> = (i32::MIN as i128)..=(i32::MAX as i128);
pub const INT64_RANGE: RangeInclusive<i128> = (i64::MIN as i128)..=(i64::MAX as i128);

/// Magnitudes in `FLOAT32_MIN..=FLOAT32_MAX` are written as `d`.
pub const FLOAT32_MIN: f64 = 1.18e-38;
pub const FLOAT32_MAX: f64 = 3.4e38;

/// Magnitudes in `FLOAT64_MIN..FLOAT64_LIMIT` are written as `D`.
pub const FLOAT64_MIN: f64 = 2.23e-308;
/// 1.8e308 is past `f64::MAX`, so the exclusive upper bound is infinity.
pub const FLOAT64_LIMIT: f64 = f64::INFINITY;
