use std::{ffi::OsStr, path::Path};

use serde::Deserialize;

use super::Handle;
use crate::{Error, Fault, Result, debug, debug_warn};

/// Fixed diagnostic for a library whose own dependencies could not be found;
/// the platform's text for this case rarely names the real problem.
pub const DEPENDENCY_MISSING: &str = "cannot find dependent libraries";

/// `ERROR_MOD_NOT_FOUND`
pub const MOD_NOT_FOUND: i32 = 126;

/// When the loader binds a library's function references.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
	/// On first call (`RTLD_LAZY`).
	#[default]
	Lazy,

	/// Before open returns (`RTLD_NOW`).
	Now,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Flags {
	pub binding: Binding,

	/// Export the library's symbols to subsequently loaded libraries
	/// (`RTLD_GLOBAL`).
	pub global: bool,
}

impl Flags {
	/// dlopen(3) mode bits.
	#[cfg(unix)]
	#[must_use]
	pub fn mode(self) -> i32 {
		use libloading::os::unix::{RTLD_GLOBAL, RTLD_LAZY, RTLD_LOCAL, RTLD_NOW};

		let binding = match self.binding {
			| Binding::Lazy => RTLD_LAZY,
			| Binding::Now => RTLD_NOW,
		};

		let scope = if self.global { RTLD_GLOBAL } else { RTLD_LOCAL };

		binding | scope
	}
}

/// Map the library at `path` into the process.
///
/// The library's static initializers run as part of this call. Failures are
/// classified on the spot: a library whose dependencies are missing yields
/// [`Error::DependencyMissing`], anything else [`Error::LoadFailed`] with the
/// platform's diagnostic.
pub fn open(path: &OsStr, flags: Flags) -> Result<Handle> {
	//SAFETY: Calls dlopen(3) on unix platforms and LoadLibraryExW on windows. The
	// initializers of the library run here; loading it is the caller's request.
	let lib = unsafe { load(path, flags) };
	match lib {
		| Ok(handle) => {
			debug!(?path, ?flags, "Opened library");
			Ok(handle)
		},
		| Err(e) => {
			let error = classify(Path::new(path), Fault::from_loader(&e));
			debug_warn!(?path, "Opening library failed: {error}");
			Err(error)
		},
	}
}

/// Decide which error a failed open reports.
#[must_use]
pub fn classify(path: &Path, fault: Fault) -> Error {
	let path_str = path.to_string_lossy().into_owned();
	if dependency_missing(path, &fault) {
		Error::DependencyMissing { path: path_str }
	} else {
		Error::LoadFailed { path: path_str, fault }
	}
}

/// Whether the loader failed on one of the library's dependencies rather than
/// on the library itself.
#[must_use]
pub fn dependency_missing(path: &Path, fault: &Fault) -> bool {
	match fault {
		| Fault::Os { code: Some(code), .. } if cfg!(windows) => *code == MOD_NOT_FOUND,
		| Fault::Os { message, .. } => missing_dependency_message(path, message),
		| Fault::Runtime(_) => false,
	}
}

// glibc names the object it could not open ahead of CANNOT_OPEN; it is the
// requested path unless a dependency is at fault. The path may itself hold
// ": ", so the name runs up to CANNOT_OPEN. musl appends "(needed by ...)"
// and darwin reports "Library not loaded" for dependencies only.
fn missing_dependency_message(path: &Path, message: &str) -> bool {
	const CANNOT_OPEN: &str = ": cannot open shared object file";

	if message.contains("Library not loaded") || message.contains("(needed by ") {
		return true;
	}

	message
		.split_once(CANNOT_OPEN)
		.is_some_and(|(culprit, _)| Path::new(culprit) != path)
}

#[cfg(unix)]
unsafe fn load(path: &OsStr, flags: Flags) -> Result<Handle, libloading::Error> {
	// SAFETY: forwarded from open().
	unsafe { Handle::open(Some(path), flags.mode()) }
}

#[cfg(windows)]
unsafe fn load(path: &OsStr, _flags: Flags) -> Result<Handle, libloading::Error> {
	// SAFETY: forwarded from open().
	unsafe { Handle::new(path) }
}
