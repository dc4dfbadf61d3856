//! Bracket-notation dump of UBJSON data, one token per line:
//!
//! ```text
//! [o] [2]
//!     [s] [2] [id]
//!     [I] [1234567890]
//!     [s] [4] [name]
//!     [s] [3] [bob]
//! ```

use std::io::Write;

use crate::decoder::{Cursor, MAX_DEPTH};
use crate::error::{DecodeError, InspectError};
use crate::markers::{Marker, UNSIZED_LENGTH};

#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// Prefix repeated once per nesting level.
    pub indent: String,
    /// Deeper levels are still walked but not printed.
    pub max_level: Option<usize>,
    /// Print `[N]` tokens.
    pub allow_noop: bool,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_owned(),
            max_level: None,
            allow_noop: true,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scope {
    Root,
    Unsized,
    Sized(usize),
}

/// Writes the token listing of `data` to `out`.
///
/// Every top-level value in `data` is listed, not only the first.
pub fn inspect<W: Write + ?Sized>(
    data: &[u8],
    out: &mut W,
    options: &InspectOptions,
) -> Result<(), InspectError> {
    let mut inspector = Inspector {
        c: Cursor::new(data),
        out,
        options,
    };
    inspector.walk(0, Scope::Root)
}

struct Inspector<'a, 'o, W: ?Sized> {
    c: Cursor<'a>,
    out: &'o mut W,
    options: &'o InspectOptions,
}

impl<W: Write + ?Sized> Inspector<'_, '_, W> {
    fn line(&mut self, level: usize, text: &str) -> Result<(), InspectError> {
        if self.options.max_level.is_some_and(|max| level > max) {
            return Ok(());
        }
        for _ in 0..level {
            self.out.write_all(self.options.indent.as_bytes())?;
        }
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn walk(&mut self, level: usize, mut scope: Scope) -> Result<(), InspectError> {
        loop {
            if scope == Scope::Sized(0) {
                return Ok(());
            }
            let Some(byte) = self.c.next_byte() else {
                return match scope {
                    Scope::Root => Ok(()),
                    _ => Err(DecodeError::UnexpectedEof.into()),
                };
            };
            let at = self.c.pos - 1;
            let marker = Marker::from_u8(byte).ok_or(DecodeError::UnsupportedMarker(byte, at))?;
            let tag = marker.as_char();
            match marker {
                Marker::Noop => {
                    if self.options.allow_noop {
                        self.line(level, "[N]")?;
                    }
                    continue;
                }
                Marker::End => {
                    self.line(level, "[E]")?;
                    return match scope {
                        Scope::Sized(_) => Err(DecodeError::UnexpectedMarker(byte, at).into()),
                        _ => Ok(()),
                    };
                }
                Marker::Null | Marker::False | Marker::True => self.line(level, &format!("[{tag}]"))?,
                Marker::Byte => {
                    let v = self.c.i8()?;
                    self.line(level, &format!("[{tag}] [{v}]"))?;
                }
                Marker::Int16 => {
                    let v = self.c.i16()?;
                    self.line(level, &format!("[{tag}] [{v}]"))?;
                }
                Marker::Int32 => {
                    let v = self.c.i32()?;
                    self.line(level, &format!("[{tag}] [{v}]"))?;
                }
                Marker::Int64 => {
                    let v = self.c.i64()?;
                    self.line(level, &format!("[{tag}] [{v}]"))?;
                }
                Marker::Float32 => {
                    let v = f64::from(self.c.f32()?);
                    self.line(level, &format!("[{tag}] [{v}]"))?;
                }
                Marker::Float64 => {
                    let v = self.c.f64()?;
                    self.line(level, &format!("[{tag}] [{v}]"))?;
                }
                Marker::HugeShort | Marker::HugeLong | Marker::StrShort | Marker::StrLong => {
                    let long = matches!(marker, Marker::HugeLong | Marker::StrLong);
                    let len = self.c.length(long)?;
                    let text = self.c.utf8(len)?;
                    self.line(level, &format!("[{tag}] [{len}] [{text}]"))?;
                }
                Marker::ArrayShort | Marker::ArrayLong | Marker::ObjectShort | Marker::ObjectLong => {
                    if level >= MAX_DEPTH {
                        return Err(DecodeError::TooDeep(MAX_DEPTH, at).into());
                    }
                    let long = matches!(marker, Marker::ArrayLong | Marker::ObjectLong);
                    let len = self.c.length(long)?;
                    self.line(level, &format!("[{tag}] [{len}]"))?;
                    let child = if !long && len == UNSIZED_LENGTH as usize {
                        Scope::Unsized
                    } else if matches!(marker, Marker::ObjectShort | Marker::ObjectLong) {
                        Scope::Sized(len * 2)
                    } else {
                        Scope::Sized(len)
                    };
                    self.walk(level + 1, child)?;
                }
            }
            if let Scope::Sized(n) = &mut scope {
                *n -= 1;
            }
        }
    }
}
