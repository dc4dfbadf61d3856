//! [`Chunks`]: lazy, pull-driven encoding of a [`Value`] graph.
//!
//! Containers are walked with an explicit frame stack rather than recursion,
//! so a suspended encode is just the stack plus the staged writer. Each pull
//! yields one scalar encoding, one container header, one object key or one
//! end marker.

use std::iter::FusedIterator;
use std::vec;

use ubjson_buffers::Writer;

use crate::encoder::{
    write_array_header, write_bool, write_end, write_float, write_huge, write_integer, write_noop,
    write_null, write_object_header, write_str, write_unsized_array_header,
    write_unsized_object_header,
};
use crate::error::EncodeError;
use crate::value::{Producer, Value};

enum Frame {
    Pending(Value),
    Array(vec::IntoIter<Value>),
    UnsizedArray(Producer<Value>),
    Object(vec::IntoIter<(Value, Value)>),
    UnsizedObject(Producer<(Value, Value)>),
}

/// Iterator of encoded byte chunks, returned by
/// [`Encoder::iterencode`](crate::Encoder::iterencode).
///
/// The first error is yielded once; the iterator is exhausted afterwards.
pub struct Chunks {
    stack: Vec<Frame>,
    writer: Writer,
    failed: bool,
}

impl Chunks {
    pub(crate) fn new(value: Value) -> Self {
        Self {
            stack: vec![Frame::Pending(value)],
            writer: Writer::with_capacity(16),
            failed: false,
        }
    }

    fn step(&mut self) -> Result<Option<Vec<u8>>, EncodeError> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Pending(value) => return self.begin(value).map(Some),
                Frame::Array(mut items) => {
                    if let Some(item) = items.next() {
                        self.stack.push(Frame::Array(items));
                        self.stack.push(Frame::Pending(item));
                    }
                }
                Frame::UnsizedArray(mut items) => match items.next() {
                    Some(item) => {
                        self.stack.push(Frame::UnsizedArray(items));
                        self.stack.push(Frame::Pending(item));
                    }
                    None => {
                        write_end(&mut self.writer);
                        return Ok(Some(self.writer.flush()));
                    }
                },
                Frame::Object(mut entries) => {
                    if let Some((key, value)) = entries.next() {
                        self.stack.push(Frame::Object(entries));
                        return self.entry(key, value).map(Some);
                    }
                }
                Frame::UnsizedObject(mut entries) => match entries.next() {
                    Some((key, value)) => {
                        self.stack.push(Frame::UnsizedObject(entries));
                        return self.entry(key, value).map(Some);
                    }
                    None => {
                        write_end(&mut self.writer);
                        return Ok(Some(self.writer.flush()));
                    }
                },
            }
        }
        Ok(None)
    }

    /// Emits the key chunk and schedules the value right after it.
    fn entry(&mut self, key: Value, value: Value) -> Result<Vec<u8>, EncodeError> {
        let Value::String(key) = key else {
            return Err(EncodeError::InvalidKey { found: key.kind() });
        };
        write_str(&mut self.writer, &key)?;
        self.stack.push(Frame::Pending(value));
        Ok(self.writer.flush())
    }

    fn begin(&mut self, value: Value) -> Result<Vec<u8>, EncodeError> {
        let w = &mut self.writer;
        match value {
            Value::Noop => write_noop(w),
            Value::Null => write_null(w),
            Value::Bool(b) => write_bool(w, b),
            Value::Integer(i) => write_integer(w, i)?,
            Value::Float(f) => write_float(w, f)?,
            Value::HugeNumber(text) => write_huge(w, &text)?,
            Value::String(s) => write_str(w, &s)?,
            Value::SizedArray(items) => {
                write_array_header(w, items.len())?;
                self.stack.push(Frame::Array(items.into_iter()));
            }
            Value::UnsizedArray(items) => {
                write_unsized_array_header(w);
                self.stack.push(Frame::UnsizedArray(items));
            }
            Value::SizedObject(entries) => {
                write_object_header(w, entries.len())?;
                self.stack.push(Frame::Object(entries.into_iter()));
            }
            Value::UnsizedObject(entries) => {
                write_unsized_object_header(w);
                self.stack.push(Frame::UnsizedObject(entries));
            }
        }
        Ok(self.writer.flush())
    }
}

impl Iterator for Chunks {
    type Item = Result<Vec<u8>, EncodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.step() {
            Ok(chunk) => chunk.map(Ok),
            Err(err) => {
                self.failed = true;
                self.stack.clear();
                self.writer.reset();
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Chunks {}
