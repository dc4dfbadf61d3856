//! `Encoder`: value → UBJSON (Draft 8) bytes.
//!
//! Wire mapping:
//! - `N` = noop, `Z` = null (and infinite floats), `F` / `T` = booleans
//! - `B` / `i` / `I` / `L` = the narrowest signed integer of 8/16/32/64 bits
//! - `d` / `D` = float32 / float64, chosen by magnitude
//! - `h` / `H` = huge number text, `s` / `S` = string; short forms carry a
//!   1-byte length, long forms a 4-byte length, switching at 255
//! - `a` / `A`, `o` / `O` = sized array / object with a count
//! - `a 0xFF ... E`, `o 0xFF ... E` = unsized array / object
//!
//! Every `write_*` function below stages exactly one chunk in the writer.

use std::any::{type_name, Any};
use std::io::Write;
use std::sync::Arc;

use tracing::trace;
use ubjson_buffers::{concat_list, Writer};

use crate::error::EncodeError;
use crate::markers::{
    Marker, BYTE_RANGE, FLOAT32_MAX, FLOAT32_MIN, FLOAT64_LIMIT, FLOAT64_MIN, INT16_RANGE,
    INT32_RANGE, INT64_RANGE, UNSIZED_LENGTH,
};
use crate::registry::{Handlers, Registry};
use crate::stream::Chunks;
use crate::value::Value;

/// UBJSON encoder.
///
/// Holds the frozen handler [`Registry`] used to adapt host values; the
/// registry is shared, so clones are cheap and one encoder can serve any
/// number of sequential encodes.
#[derive(Clone, Default)]
pub struct Encoder {
    registry: Arc<Registry>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder whose registry has `handlers` merged over the built-ins.
    pub fn with_handlers(handlers: Handlers) -> Self {
        Self {
            registry: Arc::new(Registry::new(handlers)),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Lazily encodes `value`, one chunk per pull.
    ///
    /// Finite for finite input. An unsized container fed by an endless
    /// producer yields chunks forever; stop pulling to abandon it.
    pub fn iterencode(&self, value: Value) -> Chunks {
        Chunks::new(value)
    }

    /// Encodes `value` into a single buffer.
    pub fn encode(&self, value: Value) -> Result<Vec<u8>, EncodeError> {
        let chunks = self.iterencode(value).collect::<Result<Vec<_>, _>>()?;
        Ok(concat_list(&chunks))
    }

    /// Streams `value` into `sink` chunk by chunk.
    ///
    /// Not atomic: on error, chunks written before it stay in the sink.
    pub fn encode_to<W: Write + ?Sized>(&self, value: Value, sink: &mut W) -> Result<(), EncodeError> {
        for chunk in self.iterencode(value) {
            sink.write_all(&chunk?)?;
        }
        Ok(())
    }

    /// Adapts a host value through the registry.
    pub fn adapt<T: Any>(&self, value: &T) -> Result<Value, EncodeError> {
        self.registry.adapt(value)
    }

    pub fn encode_native<T: Any>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        let value = self.registry.adapt_dyn(value, type_name::<T>())?;
        self.encode(value)
    }

    pub fn encode_native_to<T: Any, W: Write + ?Sized>(
        &self,
        value: &T,
        sink: &mut W,
    ) -> Result<(), EncodeError> {
        let value = self.registry.adapt_dyn(value, type_name::<T>())?;
        self.encode_to(value, sink)
    }
}

// ---- Primitives ----

pub fn write_noop(w: &mut Writer) {
    w.u8(Marker::Noop.byte());
}

pub fn write_null(w: &mut Writer) {
    w.u8(Marker::Null.byte());
}

pub fn write_bool(w: &mut Writer, b: bool) {
    w.u8(if b { Marker::True } else { Marker::False }.byte());
}

/// Writes the narrowest of `B`/`i`/`I`/`L` holding `int`, or a huge number
/// past the int64 range.
pub fn write_integer(w: &mut Writer, int: i128) -> Result<(), EncodeError> {
    if BYTE_RANGE.contains(&int) {
        w.u8(Marker::Byte.byte());
        w.i8(int as i8);
    } else if INT16_RANGE.contains(&int) {
        w.u8(Marker::Int16.byte());
        w.i16(int as i16);
    } else if INT32_RANGE.contains(&int) {
        w.u8(Marker::Int32.byte());
        w.i32(int as i32);
    } else if INT64_RANGE.contains(&int) {
        w.u8(Marker::Int64.byte());
        w.i64(int as i64);
    } else {
        return write_huge(w, &int.to_string());
    }
    Ok(())
}

/// Writes `d` or `D` by magnitude.
///
/// Infinities are written as null, which drops both the sign and the
/// distinction from null on the wire. Zero, NaN and subnormal magnitudes
/// fall through to a huge number.
pub fn write_float(w: &mut Writer, float: f64) -> Result<(), EncodeError> {
    let magnitude = float.abs();
    if (FLOAT32_MIN..=FLOAT32_MAX).contains(&magnitude) {
        w.u8(Marker::Float32.byte());
        w.f32(float as f32);
    } else if (FLOAT64_MIN..FLOAT64_LIMIT).contains(&magnitude) {
        w.u8(Marker::Float64.byte());
        w.f64(float);
    } else if float.is_infinite() {
        write_null(w);
    } else {
        return write_huge(w, &float_text(float));
    }
    Ok(())
}

/// Decimal text for a float that has no fixed-width representation.
pub fn float_text(float: f64) -> String {
    if float.is_nan() {
        "nan".to_owned()
    } else if float == 0.0 {
        let zero = if float.is_sign_negative() { "-0.0" } else { "0.0" };
        zero.to_owned()
    } else {
        format!("{float:e}")
    }
}

pub fn write_str(w: &mut Writer, s: &str) -> Result<(), EncodeError> {
    write_text(w, Marker::StrShort, Marker::StrLong, s)
}

pub fn write_huge(w: &mut Writer, text: &str) -> Result<(), EncodeError> {
    write_text(w, Marker::HugeShort, Marker::HugeLong, text)
}

fn write_text(w: &mut Writer, short: Marker, long: Marker, s: &str) -> Result<(), EncodeError> {
    write_length(w, short, long, s.len())?;
    w.utf8(s);
    Ok(())
}

/// Writes a short or long marker followed by its 1- or 4-byte length.
pub fn write_length(w: &mut Writer, short: Marker, long: Marker, len: usize) -> Result<(), EncodeError> {
    let marker = Marker::for_length(short, long, len);
    if marker == short {
        w.u8(short.byte());
        w.u8(len as u8);
    } else {
        let len32 = u32::try_from(len).map_err(|_| EncodeError::LengthOverflow(len))?;
        w.u8u32(long.byte(), len32);
    }
    Ok(())
}

pub fn write_array_header(w: &mut Writer, count: usize) -> Result<(), EncodeError> {
    trace!(count, "sized array");
    write_length(w, Marker::ArrayShort, Marker::ArrayLong, count)
}

pub fn write_object_header(w: &mut Writer, count: usize) -> Result<(), EncodeError> {
    trace!(count, "sized object");
    write_length(w, Marker::ObjectShort, Marker::ObjectLong, count)
}

pub fn write_unsized_array_header(w: &mut Writer) {
    trace!("unsized array");
    w.u8(Marker::ArrayShort.byte());
    w.u8(UNSIZED_LENGTH);
}

pub fn write_unsized_object_header(w: &mut Writer) {
    trace!("unsized object");
    w.u8(Marker::ObjectShort.byte());
    w.u8(UNSIZED_LENGTH);
}

pub fn write_end(w: &mut Writer) {
    w.u8(Marker::End.byte());
}
