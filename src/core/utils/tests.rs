#![cfg(test)]

use crate::utils::buf;

#[test]
fn write_truncated_fits() {
	let mut out = [0xFF_u8; 16];
	let len = buf::write_truncated(&mut out, "hello");
	assert_eq!(len, 5, "all bytes written");
	assert_eq!(&out[..6], b"hello\0");
	assert_eq!(buf::as_str(&out), Ok("hello"));
}

#[test]
fn write_truncated_reserves_terminator() {
	let mut out = [0xFF_u8; 4];
	let len = buf::write_truncated(&mut out, "hello");
	assert_eq!(len, 3, "capacity minus terminator");
	assert_eq!(&out, b"hel\0");
}

#[test]
fn write_truncated_empty_buffer() {
	let mut out: [u8; 0] = [];
	assert_eq!(buf::write_truncated(&mut out, "hello"), 0);
}

#[test]
fn write_truncated_char_boundary() {
	let mut out = [0xFF_u8; 3];
	// 'é' is two bytes; only one byte of room remains after 'a'.
	let len = buf::write_truncated(&mut out, "aé");
	assert_eq!(len, 1, "multi-byte char is not split");
	assert_eq!(buf::as_str(&out), Ok("a"));
}

#[test]
fn write_exact_overflow_untouched() {
	let mut out = [0xFF_u8; 5];
	assert_eq!(buf::write_exact(&mut out, b"hello"), None);
	assert_eq!(out, [0xFF; 5], "nothing written on overflow");

	let mut out = [0xFF_u8; 6];
	assert_eq!(buf::write_exact(&mut out, b"hello"), Some(5));
	assert_eq!(&out, b"hello\0");
}

#[test]
fn clear_and_strlen() {
	let mut out = *b"abc\0";
	assert_eq!(buf::strlen(&out), 3);
	buf::clear(&mut out);
	assert_eq!(buf::strlen(&out), 0);
	assert_eq!(buf::as_str(&out), Ok(""));
}
