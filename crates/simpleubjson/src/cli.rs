//! Shared logic for the `ubjson-pack`, `ubjson-unpack` and `ubjson-inspect`
//! binaries.

use std::io::Write;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::error::{DecodeError, EncodeError, InspectError};
use crate::inspect::{inspect, InspectOptions};
use crate::{Decoder, Encoder, Value};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Inspect(#[from] InspectError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Encodes JSON text to UBJSON, streaming into `sink`.
///
/// With `unsized_root`, a top-level JSON array is written as an unsized
/// array closed by the end marker.
pub fn pack<W: Write + ?Sized>(json: &str, unsized_root: bool, sink: &mut W) -> Result<(), CliError> {
    let json: serde_json::Value = serde_json::from_str(json)?;
    let value = match Value::from(json) {
        Value::SizedArray(items) if unsized_root => Value::unsized_array(items),
        value => value,
    };
    Encoder::new().encode_to(value, sink)?;
    Ok(())
}

/// Decodes UBJSON bytes to pretty-printed JSON.
pub fn unpack(bytes: &[u8]) -> Result<String, CliError> {
    let value = Decoder::new().decode(bytes)?;
    Ok(serde_json::to_string_pretty(&value.into_json())?)
}

pub fn inspect_to<W: Write + ?Sized>(
    bytes: &[u8],
    options: &InspectOptions,
    out: &mut W,
) -> Result<(), CliError> {
    inspect(bytes, out, options)?;
    Ok(())
}
