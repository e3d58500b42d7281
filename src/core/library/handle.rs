use std::{
	ffi::c_void,
	path::{Path, PathBuf},
	ptr::NonNull,
};

use super::{Builder, Flags, Handle, Symbol, name, open};
use crate::{Err, Error, Fault, Result, debug, debug::type_name, trace, warn};

/// A library mapped into the process, owned by this value until it is
/// unloaded. Dropping a loaded library unloads it.
pub struct Library {
	handle: Option<Handle>,
	path: PathBuf,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
	Loaded,
	Unloaded,
}

impl Library {
	/// Build the file name for `name` along `search_path` and open it. When no
	/// directory holds the file the logical name itself is handed to the
	/// loader, whose failure then carries the diagnostic.
	pub fn from_name(builder: &Builder, search_path: &str, name: &str, flags: Flags) -> Result<Self> {
		let path = builder
			.build(search_path, name)?
			.unwrap_or_else(|| PathBuf::from(name));

		Self::open_with(path, flags)
	}

	pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> { Self::open_with(path, Flags::default()) }

	pub fn open_with<P: Into<PathBuf>>(path: P, flags: Flags) -> Result<Self> {
		let path = path.into();
		Ok(Self {
			handle: Some(open::open(path.as_os_str(), flags)?),
			path,
		})
	}

	/// Address of the symbol `name`, or `None` when the library does not
	/// define it or is no longer loaded.
	#[must_use]
	pub fn resolve(&self, name: &str) -> Option<NonNull<c_void>> {
		let handle = self.handle.as_ref()?;

		// SAFETY: Calls dlsym(3) on unix platforms. The symbol is read back as an
		// untyped address and never dereferenced here.
		let sym = unsafe { handle.get::<*mut c_void>(name.as_bytes()) };
		let addr = sym.ok().and_then(|sym| NonNull::new(*sym));
		trace!(path = ?self.path, name, found = addr.is_some(), "resolve");

		addr
	}

	/// Typed lookup of the symbol `name`.
	///
	/// # Safety
	/// `Prototype` must match the symbol's actual type, and the returned symbol
	/// must not be used once this library is unloaded.
	pub unsafe fn get<Prototype>(&self, name: &str) -> Result<Symbol<Prototype>> {
		let Some(handle) = self.handle.as_ref() else {
			return Err!(Unloaded("{}", self.path.display()));
		};

		// SAFETY: The caller vouches for Prototype per this function's contract.
		let sym = unsafe { handle.get::<Prototype>(name.as_bytes()) };
		sym.map_err(|e| {
			trace!(path = ?self.path, name, prototype = type_name::<Prototype>(), "get failed: {e}");
			Error::SymbolNotFound {
				name: name.to_owned(),
				fault: Fault::from_loader(&e),
			}
		})
	}

	/// Release the mapping. A failure of the platform to unmap is logged, not
	/// returned; only unloading twice is an error.
	pub fn unload(&mut self) -> Result {
		let Some(handle) = self.handle.take() else {
			return Err!(Unloaded("{}", self.path.display()));
		};

		match handle.close() {
			| Ok(()) => {
				debug!(path = ?self.path, "Unloaded library");
			},
			| Err(e) => {
				warn!(path = ?self.path, "Library failed to unload: {e}");
			},
		}

		Ok(())
	}

	#[inline]
	#[must_use]
	pub fn state(&self) -> State {
		if self.handle.is_some() {
			State::Loaded
		} else {
			State::Unloaded
		}
	}

	#[inline]
	#[must_use]
	pub fn is_loaded(&self) -> bool { self.state() == State::Loaded }

	/// Logical name of the library: its file stem without the platform
	/// prefix.
	#[must_use]
	pub fn name(&self) -> Option<&str> {
		let stem = self.path.file_stem()?.to_str()?;
		Some(stem.strip_prefix(name::PREFIX).unwrap_or(stem))
	}

	#[inline]
	#[must_use]
	pub fn path(&self) -> &Path { &self.path }
}

impl Drop for Library {
	fn drop(&mut self) {
		if self.is_loaded() {
			self.unload().ok();
		}
	}
}
