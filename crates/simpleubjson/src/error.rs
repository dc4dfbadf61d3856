use std::io;

use thiserror::Error;

/// Failure while turning a value into UBJSON bytes.
///
/// Any error aborts the encode in progress. Chunks already written to a sink
/// stay written.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("unable to encode value of type `{type_name}` to ubjson")]
    UnsupportedType { type_name: String },
    #[error("object key must be a string, got {found}")]
    InvalidKey { found: &'static str },
    #[error("length {0} does not fit the 4-byte length field")]
    LengthOverflow(usize),
    #[error("handler failed: {0}")]
    Handler(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure while reading UBJSON bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("nothing to decode")]
    Empty,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unsupported marker 0x{0:02x} at offset {1}")]
    UnsupportedMarker(u8, usize),
    #[error("unexpected marker 0x{0:02x} at offset {1}")]
    UnexpectedMarker(u8, usize),
    #[error("object key must be string typed, got marker 0x{0:02x} at offset {1}")]
    InvalidKey(u8, usize),
    #[error("containers nested deeper than {0} levels at offset {1}")]
    TooDeep(usize, usize),
    #[error("invalid UTF-8")]
    InvalidUtf8,
}

/// Failure while pretty-printing UBJSON bytes.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
