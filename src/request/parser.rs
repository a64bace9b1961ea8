use std::io::Read;

use tracing::debug;

use crate::error::DocumentError;

use super::{Metadata, Request};

const DIVIDER: &[u8] = b"---";

/// Reads a whole request document from `reader` and parses it.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] when the reader fails, and otherwise the
/// errors of [`parse_bytes`].
pub fn parse_document<R: Read>(mut reader: R) -> Result<Request, DocumentError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|err| DocumentError::Read { source: err })?;
    parse_bytes(&bytes)
}

/// Parses an in-memory request document.
///
/// # Errors
///
/// Returns [`DocumentError::NoFrontMatter`] when no divider line exists and
/// [`DocumentError::InvalidMetadata`] when the front matter is not valid
/// JSON for a request.
pub fn parse_bytes(bytes: &[u8]) -> Result<Request, DocumentError> {
    let (front_matter, body) = split_front_matter(bytes).ok_or(DocumentError::NoFrontMatter)?;
    debug!(
        "Split request document: {} bytes front matter, {} bytes body",
        front_matter.len(),
        body.len()
    );
    let metadata = decode_metadata(front_matter)?;
    Ok(metadata.into_request(body.to_vec()))
}

/// Splits at the first line consisting of exactly `---`. A line ends at
/// `\n`, `\r\n` or a lone `\r`; one line ending after the divider is
/// consumed and everything after it is returned untouched.
pub(crate) fn split_front_matter(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    let mut line_start = 0usize;
    loop {
        let rest = bytes.get(line_start..)?;
        if let Some(after) = rest.strip_prefix(DIVIDER)
            && matches!(after.first(), None | Some(b'\r' | b'\n'))
        {
            let after = after.strip_prefix(b"\r").unwrap_or(after);
            let body = after.strip_prefix(b"\n").unwrap_or(after);
            return Some((bytes.get(..line_start)?, body));
        }
        let line_len = rest
            .iter()
            .position(|byte| matches!(byte, b'\n' | b'\r'))?;
        line_start = line_start.saturating_add(line_len).saturating_add(1);
    }
}

// An empty (or blank) front matter is an empty object, not a decode error.
fn decode_metadata(front_matter: &[u8]) -> Result<Metadata, DocumentError> {
    if front_matter.iter().all(u8::is_ascii_whitespace) {
        return Ok(Metadata::default());
    }
    serde_json::from_slice(front_matter)
        .map_err(|err| DocumentError::InvalidMetadata { source: err })
}
