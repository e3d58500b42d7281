//! Diagnostic text for loader failures.
//!
//! Errors come from two tiers: the platform loader or operating system
//! (`dlerror(3)` on unix, `GetLastError` on windows) and the C runtime's
//! `errno`. The loader tier always takes precedence. Call sites in this crate
//! capture a [`Fault`] immediately after the failing call; [`capture`] and
//! [`last_error_string`] remain for callers which still consult the ambient
//! thread-local state. Those must run on the failing thread with no other
//! platform call in between.

use std::{borrow::Cow, fmt};

use crate::{Error, Result, utils::buf};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fault {
	/// Reported by the platform loader or operating system. `code` is the
	/// raw OS error code where the platform has one.
	Os { code: Option<i32>, message: String },

	/// C runtime error with no loader-level counterpart.
	Runtime(i32),
}

impl Fault {
	/// Fault from the error libloading captured for a failed call. Where
	/// libloading wraps an OS error (every windows failure) the system's own
	/// message and code are used; its summary names only the failed call.
	#[must_use]
	pub fn from_loader(error: &libloading::Error) -> Self {
		use std::error::Error as _;

		let code = error
			.source()
			.and_then(|source| source.downcast_ref::<std::io::Error>())
			.and_then(std::io::Error::raw_os_error);

		match code {
			| Some(code) => Self::Os { code: Some(code), message: os_description(code) },
			| None => Self::Os { code: None, message: error.to_string() },
		}
	}

	#[must_use]
	pub fn code(&self) -> Option<i32> {
		match self {
			| Self::Os { code, .. } => *code,
			| Self::Runtime(code) => Some(*code),
		}
	}

	#[must_use]
	pub fn is_os(&self) -> bool { matches!(self, Self::Os { .. }) }
}

impl fmt::Display for Fault {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			| Self::Os { message, .. } => f.write_str(trim_os_message(message)),
			| Self::Runtime(code) => f.write_str(&runtime_description(*code)),
		}
	}
}

/// Read the pending error of the calling thread, loader tier first.
#[must_use]
pub fn capture() -> Option<Fault> { os_fault().or_else(runtime_fault) }

/// Format the pending error of the calling thread into `buf`. Returns the
/// number of bytes written excluding the terminator; 0 when nothing is
/// pending.
pub fn last_error_string(buf: &mut [u8]) -> usize {
	capture().map_or(0, |fault| format_into(&fault, buf))
}

/// Format `fault` into `buf`, silently truncating to `buf.len() - 1` bytes.
pub fn format_into(fault: &Fault, buf: &mut [u8]) -> usize {
	buf::write_truncated(buf, &fault.to_string())
}

/// Format `fault` into `buf`, or fail without writing anything when the text
/// and its terminator do not fit.
pub fn try_format_into(fault: &Fault, buf: &mut [u8]) -> Result<usize> {
	let text = fault.to_string();
	let needed = text.len().saturating_add(1);
	if needed > buf.len() {
		return Err(Error::InsufficientCapacity { needed, capacity: buf.len() });
	}

	Ok(buf::write_truncated(buf, &text))
}

/// Drop the final newline, carriage return and period of a system message,
/// at most one of each and in that order. Messages of three bytes or fewer
/// are returned untouched.
#[must_use]
pub fn trim_os_message(message: &str) -> &str {
	if message.len() <= 3 {
		return message;
	}

	let message = message.strip_suffix('\n').unwrap_or(message);
	let message = message.strip_suffix('\r').unwrap_or(message);
	message.strip_suffix('.').unwrap_or(message)
}

/// Standard description of a C runtime error number.
#[cfg(unix)]
#[must_use]
pub fn runtime_description(code: i32) -> Cow<'static, str> {
	nix::errno::Errno::from_raw(code).desc().into()
}

#[cfg(not(unix))]
#[must_use]
pub fn runtime_description(code: i32) -> Cow<'static, str> {
	use std::ffi::CStr;

	// SAFETY: strerror returns a pointer to a nul-terminated string owned by the
	// runtime; it is copied out before any other runtime call on this thread.
	let ptr = unsafe { libc::strerror(code) };
	if ptr.is_null() {
		return format!("Unknown error {code}").into();
	}

	// SAFETY: non-null and nul-terminated per strerror's contract.
	unsafe { CStr::from_ptr(ptr) }
		.to_string_lossy()
		.into_owned()
		.into()
}

/// Reset both tiers of pending error state on the calling thread.
#[cfg(unix)]
pub fn clear() {
	// SAFETY: dlerror(3) only reads and resets the thread's loader error.
	unsafe { libc::dlerror() };
	nix::errno::Errno::clear();
}

#[cfg(unix)]
fn os_fault() -> Option<Fault> {
	use std::ffi::CStr;

	// SAFETY: dlerror(3) returns null or a thread-local nul-terminated string
	// which stays valid until the next dl* call; it is copied out immediately.
	let ptr = unsafe { libc::dlerror() };
	if ptr.is_null() {
		return None;
	}

	// SAFETY: checked non-null above.
	let message = unsafe { CStr::from_ptr(ptr) }
		.to_string_lossy()
		.into_owned();

	Some(Fault::Os { code: None, message })
}

#[cfg(windows)]
fn os_fault() -> Option<Fault> {
	let code = std::io::Error::last_os_error()
		.raw_os_error()
		.filter(|&code| code != 0)?;

	Some(Fault::Os { code: Some(code), message: os_description(code) })
}

/// System message for a raw OS error code, without std's "(os error N)"
/// suffix.
#[must_use]
pub fn os_description(code: i32) -> String {
	let text = std::io::Error::from_raw_os_error(code).to_string();
	let suffix = format!(" (os error {code})");
	text.strip_suffix(&suffix)
		.map_or_else(|| text.clone(), ToOwned::to_owned)
}

#[cfg(unix)]
fn runtime_fault() -> Option<Fault> {
	let code = nix::errno::Errno::last_raw();
	(code != 0).then_some(Fault::Runtime(code))
}

// errno is not reachable portably outside of unix; the OS tier covers it.
#[cfg(not(unix))]
fn runtime_fault() -> Option<Fault> { None }
