//! Encoding probing and decoding.
//!
//! All candidate encodings are ASCII-compatible, so callers can split raw
//! bytes on `\n` before decoding.

use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csvtidy_model::TextEncoding;
use encoding_rs::WINDOWS_1252;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Characters that must decode cleanly for an encoding to be selected.
pub const ENCODING_PROBE_CHARS: usize = 1000;

// Upper bound on UTF-8 bytes needed for the probe characters.
const PROBE_BYTES: usize = ENCODING_PROBE_CHARS * 4;

/// Decodes `bytes` strictly, returning `None` when the encoding rejects them.
pub fn decode(bytes: &[u8], encoding: TextEncoding) -> Option<Cow<'_, str>> {
    match encoding {
        TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
        TextEncoding::Latin1 | TextEncoding::Iso8859_1 => Some(match std::str::from_utf8(bytes) {
            Ok(text) if bytes.is_ascii() => Cow::Borrowed(text),
            _ => Cow::Owned(bytes.iter().copied().map(char::from).collect()),
        }),
        TextEncoding::Cp1252 => {
            WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
        }
    }
}

/// Whether the first [`ENCODING_PROBE_CHARS`] characters of `bytes` decode.
///
/// `truncated` marks a sample cut from a longer file; a UTF-8 sequence split
/// at the very end of such a sample is not a decoding failure.
pub fn probe_encoding(bytes: &[u8], encoding: TextEncoding, truncated: bool) -> bool {
    match encoding {
        TextEncoding::Utf8 => match std::str::from_utf8(bytes) {
            Ok(_) => true,
            Err(error) => {
                let valid = bytes.get(..error.valid_up_to()).unwrap_or_default();
                let valid_chars = String::from_utf8_lossy(valid).chars().count();
                valid_chars >= ENCODING_PROBE_CHARS || (truncated && error.error_len().is_none())
            }
        },
        _ => decode(bytes, encoding).is_some(),
    }
}

/// Picks the first candidate encoding that decodes the start of the file.
///
/// Falls back to UTF-8 when no candidate decodes cleanly; this sub-step never
/// fails on content, only on I/O.
pub fn detect_encoding(path: &Path) -> Result<TextEncoding> {
    let file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;
    let mut sample = Vec::with_capacity(PROBE_BYTES);
    file.take(PROBE_BYTES as u64)
        .read_to_end(&mut sample)
        .map_err(|e| IngestError::from_io(path, e))?;
    let truncated = sample.len() == PROBE_BYTES;

    for encoding in TextEncoding::CANDIDATES {
        if probe_encoding(&sample, encoding, truncated) {
            debug!(path = %path.display(), %encoding, "encoding detected");
            return Ok(encoding);
        }
    }
    warn!(path = %path.display(), "no candidate encoding decoded cleanly, using utf-8");
    Ok(TextEncoding::Utf8)
}
