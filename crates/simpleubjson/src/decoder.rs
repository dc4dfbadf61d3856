//! `Decoder`: UBJSON (Draft 8) bytes → [`Value`].
//!
//! Unsized containers are read up to their end marker and materialized as
//! sized ones. Noop markers are skipped at the top level and inside unsized
//! containers; inside sized containers they are an error, as is a stray end
//! marker. Bytes after the first complete value are ignored.
//!
//! Containers may nest at most [`MAX_DEPTH`] levels deep.

use crate::error::DecodeError;
use crate::markers::{Marker, UNSIZED_LENGTH};
use crate::value::Value;

/// Default nesting limit of [`Decoder`] and the inspector.
pub const MAX_DEPTH: usize = 512;

/// Read cursor over an input slice.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pub(crate) pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Next byte, or `None` at the end of input.
    pub(crate) fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let bytes = self.buf(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub(crate) fn buf(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEof);
        }
        let s = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(s)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, DecodeError> {
        self.next_byte().ok_or(DecodeError::UnexpectedEof)
    }

    pub(crate) fn i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.u8()? as i8)
    }

    pub(crate) fn i16(&mut self) -> Result<i16, DecodeError> {
        self.take().map(i16::from_be_bytes)
    }

    pub(crate) fn i32(&mut self) -> Result<i32, DecodeError> {
        self.take().map(i32::from_be_bytes)
    }

    pub(crate) fn u32(&mut self) -> Result<u32, DecodeError> {
        self.take().map(u32::from_be_bytes)
    }

    pub(crate) fn i64(&mut self) -> Result<i64, DecodeError> {
        self.take().map(i64::from_be_bytes)
    }

    pub(crate) fn f32(&mut self) -> Result<f32, DecodeError> {
        self.take().map(f32::from_be_bytes)
    }

    pub(crate) fn f64(&mut self) -> Result<f64, DecodeError> {
        self.take().map(f64::from_be_bytes)
    }

    pub(crate) fn utf8(&mut self, len: usize) -> Result<&'a str, DecodeError> {
        std::str::from_utf8(self.buf(len)?).map_err(|_| DecodeError::InvalidUtf8)
    }

    /// Length field following a short (`u8`) or long (`u32`) marker.
    pub(crate) fn length(&mut self, long: bool) -> Result<usize, DecodeError> {
        if long {
            Ok(self.u32()? as usize)
        } else {
            Ok(self.u8()? as usize)
        }
    }

    /// Skips noop markers and returns the next marker byte.
    pub(crate) fn skip_noop(&mut self) -> Option<u8> {
        loop {
            match self.next_byte()? {
                b if b == Marker::Noop.byte() => continue,
                b => return Some(b),
            }
        }
    }
}

/// UBJSON decoder.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decoder accepting at most `max_depth` nested containers.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn decode(&self, input: &[u8]) -> Result<Value, DecodeError> {
        let mut c = Cursor::new(input);
        let marker = c.skip_noop().ok_or(DecodeError::Empty)?;
        self.read_value(&mut c, marker, 0)
    }

    /// `depth` counts the containers enclosing the value.
    fn read_value(&self, c: &mut Cursor, marker: u8, depth: usize) -> Result<Value, DecodeError> {
        let at = c.pos - 1;
        let Some(kind) = Marker::from_u8(marker) else {
            return Err(DecodeError::UnsupportedMarker(marker, at));
        };
        if kind.is_container() && depth >= self.max_depth {
            return Err(DecodeError::TooDeep(self.max_depth, at));
        }
        let inner = depth + 1;
        let value = match kind {
            Marker::Noop | Marker::End => return Err(DecodeError::UnexpectedMarker(marker, at)),
            Marker::Null => Value::Null,
            Marker::False => Value::Bool(false),
            Marker::True => Value::Bool(true),
            Marker::Byte => Value::Integer(c.i8()? as i128),
            Marker::Int16 => Value::Integer(c.i16()? as i128),
            Marker::Int32 => Value::Integer(c.i32()? as i128),
            Marker::Int64 => Value::Integer(c.i64()? as i128),
            Marker::Float32 => Value::Float(f64::from(c.f32()?)),
            Marker::Float64 => Value::Float(c.f64()?),
            Marker::HugeShort | Marker::HugeLong => {
                let len = c.length(kind == Marker::HugeLong)?;
                Value::HugeNumber(c.utf8(len)?.to_owned())
            }
            Marker::StrShort | Marker::StrLong => {
                let len = c.length(kind == Marker::StrLong)?;
                Value::String(c.utf8(len)?.to_owned())
            }
            Marker::ArrayShort => match c.u8()? {
                UNSIZED_LENGTH => self.read_unsized_array(c, inner)?,
                len => self.read_sized_array(c, len as usize, inner)?,
            },
            Marker::ArrayLong => {
                let len = c.length(true)?;
                self.read_sized_array(c, len, inner)?
            }
            Marker::ObjectShort => match c.u8()? {
                UNSIZED_LENGTH => self.read_unsized_object(c, inner)?,
                len => self.read_sized_object(c, len as usize, inner)?,
            },
            Marker::ObjectLong => {
                let len = c.length(true)?;
                self.read_sized_object(c, len, inner)?
            }
        };
        Ok(value)
    }

    fn read_item(&self, c: &mut Cursor, depth: usize) -> Result<Value, DecodeError> {
        let marker = c.u8()?;
        self.read_value(c, marker, depth)
    }

    fn read_sized_array(&self, c: &mut Cursor, len: usize, depth: usize) -> Result<Value, DecodeError> {
        let mut items = Vec::with_capacity(len.min(c.remaining()));
        for _ in 0..len {
            items.push(self.read_item(c, depth)?);
        }
        Ok(Value::SizedArray(items))
    }

    fn read_unsized_array(&self, c: &mut Cursor, depth: usize) -> Result<Value, DecodeError> {
        let mut items = Vec::new();
        loop {
            match c.skip_noop().ok_or(DecodeError::UnexpectedEof)? {
                b if b == Marker::End.byte() => return Ok(Value::SizedArray(items)),
                marker => items.push(self.read_value(c, marker, depth)?),
            }
        }
    }

    fn read_key(&self, c: &mut Cursor, marker: u8) -> Result<Value, DecodeError> {
        match Marker::from_u8(marker) {
            Some(Marker::StrShort) | Some(Marker::StrLong) => self.read_value(c, marker, 0),
            _ => Err(DecodeError::InvalidKey(marker, c.pos - 1)),
        }
    }

    fn read_sized_object(&self, c: &mut Cursor, len: usize, depth: usize) -> Result<Value, DecodeError> {
        let mut entries = Vec::with_capacity(len.min(c.remaining()));
        for _ in 0..len {
            let marker = c.u8()?;
            let key = self.read_key(c, marker)?;
            entries.push((key, self.read_item(c, depth)?));
        }
        Ok(Value::SizedObject(entries))
    }

    fn read_unsized_object(&self, c: &mut Cursor, depth: usize) -> Result<Value, DecodeError> {
        let mut entries = Vec::new();
        loop {
            let marker = c.skip_noop().ok_or(DecodeError::UnexpectedEof)?;
            if marker == Marker::End.byte() {
                return Ok(Value::SizedObject(entries));
            }
            let key = self.read_key(c, marker)?;
            let marker = c.skip_noop().ok_or(DecodeError::UnexpectedEof)?;
            entries.push((key, self.read_value(c, marker, depth)?));
        }
    }
}
