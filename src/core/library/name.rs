//! Build a platform library file name from a logical name and search path.

use std::{
	env::consts::{DLL_PREFIX, DLL_SUFFIX},
	path::{MAIN_SEPARATOR, Path, PathBuf, is_separator},
};

use serde::Deserialize;

use crate::{Error, Result, trace, utils::buf};

/// Delimiter between directories of a search path.
#[cfg(windows)]
pub const SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const SEPARATOR: char = ':';

/// File name suffix appended to every logical name.
pub const SUFFIX: &str = DLL_SUFFIX;

/// File name prefix prepended when decoration is enabled.
pub const PREFIX: &str = DLL_PREFIX;

/// Minimum room reserved for the joiner, suffix, prefix and terminator when
/// checking inputs against a capacity. Platforms with a longer prefix and
/// suffix reserve more; see [`Builder::overhead`].
pub const OVERHEAD: usize = 10;

/// Treatment of a zero-length directory in a search path.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum EmptySegments {
	/// Produce no candidate for the segment.
	#[default]
	Skip,

	/// Probe the current working directory in its place.
	CurrentDir,
}

#[derive(Clone, Debug)]
pub struct Builder {
	capacity: usize,
	empty_segments: EmptySegments,
	decorate: bool,
}

impl Builder {
	#[must_use]
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity,
			empty_segments: EmptySegments::default(),
			decorate: false,
		}
	}

	#[must_use]
	pub fn empty_segments(mut self, empty_segments: EmptySegments) -> Self {
		self.empty_segments = empty_segments;
		self
	}

	#[must_use]
	pub fn decorate(mut self, decorate: bool) -> Self {
		self.decorate = decorate;
		self
	}

	/// The file name a logical name maps to, e.g. "backend" to "backend.so".
	#[must_use]
	pub fn file_name(&self, name: &str) -> String {
		let prefix = if self.decorate { PREFIX } else { "" };
		format!("{prefix}{name}{SUFFIX}")
	}

	/// Locate `name` on `search_path`.
	///
	/// An empty search path yields the bare file name without probing; the
	/// loader's own search is then the existence test. Otherwise the first
	/// directory holding the file wins and `None` means no directory did.
	/// Inputs too long for the capacity are refused with
	/// [`Error::NameTooLong`] before anything is probed.
	#[tracing::instrument(level = "trace", skip(self), ret)]
	pub fn build(&self, search_path: &str, name: &str) -> Result<Option<PathBuf>> {
		self.fits(search_path, name)?;

		let file = self.file_name(name);
		if search_path.is_empty() {
			return Ok(Some(file.into()));
		}

		let found = self
			.candidates(search_path, &file)
			.find(|candidate| exists(candidate));

		Ok(found)
	}

	/// Buffer form of [`Builder::build`]: the result is written into `buf`
	/// nul-terminated and its length returned. Whenever no usable name is
	/// produced (inputs too long for `buf`, or no directory holds the file)
	/// `buf` is left holding the empty string and 0 is returned. Nothing is
	/// written beyond `buf.len()`.
	pub fn build_into(&self, buf: &mut [u8], search_path: &str, name: &str) -> usize {
		buf::clear(buf);
		let builder = Self { capacity: buf.len(), ..self.clone() };
		match builder.build(search_path, name) {
			| Ok(Some(path)) => buf::write_exact(buf, path.as_os_str().as_encoded_bytes()).unwrap_or(0),
			| Ok(None) | Err(_) => 0,
		}
	}

	/// Every path probed for `file` along `search_path`, in order.
	pub fn candidates<'a>(&self, search_path: &'a str, file: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
		let empty_segments = self.empty_segments;
		segments(search_path).filter_map(move |dir| match (dir.is_empty(), empty_segments) {
			| (false, _) => Some(join(dir, file)),
			| (true, EmptySegments::CurrentDir) => Some(join(".", file)),
			| (true, EmptySegments::Skip) => None,
		})
	}

	/// Bytes reserved beyond the search path and logical name: the joiner, a
	/// "." standing in for an empty segment, the prefix when decorating, the
	/// suffix and the terminator. Never less than [`OVERHEAD`].
	#[must_use]
	pub fn overhead(&self) -> usize {
		let dot = usize::from(self.empty_segments == EmptySegments::CurrentDir);
		let prefix = if self.decorate { PREFIX.len() } else { 0 };
		let reserved = 2_usize
			.saturating_add(dot)
			.saturating_add(prefix)
			.saturating_add(SUFFIX.len());

		reserved.max(OVERHEAD)
	}

	fn fits(&self, search_path: &str, name: &str) -> Result {
		let needed = search_path
			.len()
			.saturating_add(name.len())
			.saturating_add(self.overhead());

		if needed > self.capacity {
			return Err(Error::NameTooLong { needed, capacity: self.capacity });
		}

		Ok(())
	}
}

/// Directories of a search path in order, empty ones included.
pub fn segments(search_path: &str) -> impl Iterator<Item = &str> { search_path.split(SEPARATOR) }

/// Join a directory and file name, adding a separator only when the
/// directory does not already end in one (or in a drive colon on windows).
#[must_use]
pub fn join(dir: &str, file: &str) -> PathBuf {
	let mut path = String::with_capacity(dir.len().saturating_add(file.len()).saturating_add(1));
	path.push_str(dir);
	if !ends_with_separator(dir) {
		path.push(MAIN_SEPARATOR);
	}

	path.push_str(file);
	path.into()
}

fn ends_with_separator(dir: &str) -> bool {
	dir.ends_with(is_separator) || (cfg!(windows) && dir.ends_with(':'))
}

fn exists(candidate: &Path) -> bool {
	let exists = candidate.exists();
	trace!(?candidate, exists, "probe");
	exists
}
