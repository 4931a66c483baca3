//! URI-component percent-encoding.
//!
//! Escapes every byte except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, which is the set a
//! browser's `encodeURIComponent` leaves alone. Structural characters of the tagged
//! value (`:` and `,`) are escaped along with everything else.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::borrow::Cow;

use crate::errors::FilterError;

/// Bytes escaped inside a query component
pub const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode one key or value
#[must_use]
pub fn encode_component(input: &str) -> Cow<'_, str> {
    utf8_percent_encode(input, URI_COMPONENT).into()
}

/// Decode one percent-encoded key or value
///
/// `+` is kept literally; this crate never writes it for a space.
///
/// # Errors
///
/// Returns [`FilterError::Decode`] if the decoded bytes are not UTF-8.
pub fn decode_component(input: &str) -> Result<Cow<'_, str>, FilterError> {
    Ok(percent_decode_str(input).decode_utf8()?)
}
