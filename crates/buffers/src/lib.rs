//! Byte buffers for the UBJSON codec.
//!
//! The encoder produces its output one chunk at a time: every marker plus
//! payload is staged in a [`Writer`] and handed out with [`Writer::flush`];
//! [`concat_list`] joins the chunks when a single buffer is wanted.
//!
//! # Example
//!
//! ```
//! use ubjson_buffers::Writer;
//!
//! let mut writer = Writer::new();
//! writer.u8(b'i');
//! writer.i16(30000);
//! assert_eq!(writer.flush(), [b'i', 0x75, 0x30]);
//! assert!(writer.is_empty());
//! ```

mod concat;
mod writer;

pub use concat::concat_list;
pub use writer::Writer;
