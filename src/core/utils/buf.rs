//! Fixed-capacity, nul-terminated text buffers owned by the caller.
//!
//! Writers never touch bytes beyond the slice they are given; the final byte
//! is always reserved for the terminator.

use std::str::Utf8Error;

/// Copy as much of `text` as fits into `buf` followed by a nul terminator.
/// Truncation happens on a char boundary. Returns the number of text bytes
/// written; an empty buffer receives nothing.
pub fn write_truncated(buf: &mut [u8], text: &str) -> usize {
	let Some(max) = buf.len().checked_sub(1) else {
		return 0;
	};

	let len = floor_char_boundary(text, max);
	buf[..len].copy_from_slice(&text.as_bytes()[..len]);
	buf[len] = 0;
	len
}

/// Copy all of `bytes` followed by a terminator, or write nothing and return
/// `None` when they do not fit.
pub fn write_exact(buf: &mut [u8], bytes: &[u8]) -> Option<usize> {
	let len = bytes.len();
	let dst = buf.get_mut(..=len)?;
	dst[..len].copy_from_slice(bytes);
	dst[len] = 0;
	Some(len)
}

/// Reset the buffer to the empty string.
#[inline]
pub fn clear(buf: &mut [u8]) {
	if let Some(first) = buf.first_mut() {
		*first = 0;
	}
}

/// Length of the string held in `buf`, up to the first terminator.
#[must_use]
pub fn strlen(buf: &[u8]) -> usize { buf.iter().position(|&b| b == 0).unwrap_or(buf.len()) }

/// View the string held in `buf`.
#[inline]
pub fn as_str(buf: &[u8]) -> Result<&str, Utf8Error> { std::str::from_utf8(&buf[..strlen(buf)]) }

#[allow(clippy::string_slice)]
fn floor_char_boundary(text: &str, max: usize) -> usize {
	if max >= text.len() {
		return text.len();
	}

	(0..=max)
		.rev()
		.find(|&i| text.is_char_boundary(i))
		.unwrap_or(0)
}
