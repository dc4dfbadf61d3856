//! Universal Binary JSON (Draft 8) for Rust.
//!
//! The encoder turns a [`Value`] graph into a lazy sequence of byte chunks
//! ([`Encoder::iterencode`]), a single buffer ([`Encoder::encode`]) or a
//! stream written to any [`std::io::Write`] sink ([`Encoder::encode_to`]).
//! Sized containers carry their count; unsized containers are fed by a lazy
//! [`Producer`] and closed with an end marker, so they can stream data whose
//! length is not known up front.
//!
//! Host values outside [`Value`] are adapted through a [`Registry`] of type
//! handlers that callers can extend with [`Handlers`].
//!
//! ```
//! use simpleubjson::{encode, Value};
//!
//! let value = Value::object([("a", Value::Integer(1))]);
//! assert_eq!(encode(value).unwrap(), b"o\x01s\x01aB\x01");
//! ```

mod decoder;
mod encoder;
mod error;
mod markers;
mod registry;
mod stream;
mod value;

pub mod cli;
pub mod inspect;

use std::io::Write;
use std::sync::OnceLock;

pub use decoder::{Decoder, MAX_DEPTH};
pub use encoder::{
    float_text, write_array_header, write_bool, write_end, write_float, write_huge, write_integer,
    write_length, write_noop, write_null, write_object_header, write_str,
    write_unsized_array_header, write_unsized_object_header, Encoder,
};
pub use error::{DecodeError, EncodeError, InspectError};
pub use inspect::InspectOptions;
pub use markers::{
    Marker, BYTE_RANGE, FLOAT32_MAX, FLOAT32_MIN, FLOAT64_LIMIT, FLOAT64_MIN, INT16_RANGE,
    INT32_RANGE, INT64_RANGE, SHORT_LENGTH_LIMIT, UNSIZED_LENGTH,
};
pub use registry::{Handler, Handlers, Predicate, Registry};
pub use stream::Chunks;
pub use value::{Noop, Producer, Value};

fn default_encoder() -> &'static Encoder {
    static ENCODER: OnceLock<Encoder> = OnceLock::new();
    ENCODER.get_or_init(Encoder::new)
}

/// Encodes `value` with the default encoder.
pub fn encode(value: Value) -> Result<Vec<u8>, EncodeError> {
    default_encoder().encode(value)
}

/// Streams `value` into `sink` with the default encoder.
pub fn encode_to<W: Write + ?Sized>(value: Value, sink: &mut W) -> Result<(), EncodeError> {
    default_encoder().encode_to(value, sink)
}

pub fn iterencode(value: Value) -> Chunks {
    default_encoder().iterencode(value)
}

pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    Decoder::new().decode(data)
}
