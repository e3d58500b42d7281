mod err;
mod log;
pub mod report;

use std::{borrow::Cow, fmt};

pub use self::{log::*, report::Fault};
use crate::utils::buf;

#[derive(thiserror::Error)]
pub enum Error {
	// third-party
	#[error("Tracing filter error: {0}")]
	TracingFilter(#[from] tracing_subscriber::filter::ParseError),

	// modlink
	#[error("There was a problem with the '{0}' directive in your configuration: {1}")]
	Config(&'static str, Cow<'static, str>),
	#[error("library name needs {needed} bytes but the buffer holds {capacity}")]
	NameTooLong { needed: usize, capacity: usize },
	#[error("diagnostic needs {needed} bytes but the buffer holds {capacity}")]
	InsufficientCapacity { needed: usize, capacity: usize },
	#[error("{fault}")]
	LoadFailed { path: String, fault: Fault },
	#[error("cannot find dependent libraries")]
	DependencyMissing { path: String },
	#[error("{fault}")]
	SymbolNotFound { name: String, fault: Fault },
	#[error("library {0:?} is not loaded")]
	Unloaded(String),

	// unique / untyped
	#[error("{0}")]
	Err(Cow<'static, str>),
}

impl Error {
	/// The diagnostic captured from the platform when the error was raised.
	#[must_use]
	pub fn fault(&self) -> Option<&Fault> {
		match self {
			| Self::LoadFailed { fault, .. } | Self::SymbolNotFound { fault, .. } => Some(fault),
			| _ => None,
		}
	}

	/// Write this error's diagnostic text into a caller-owned buffer. At most
	/// `buf.len() - 1` bytes are written followed by a nul terminator; the
	/// number of text bytes is returned.
	pub fn report(&self, buf: &mut [u8]) -> usize { buf::write_truncated(buf, &self.to_string()) }

	/// True for both flavors of a failed open.
	#[inline]
	#[must_use]
	pub fn is_load_failure(&self) -> bool {
		matches!(self, Self::LoadFailed { .. } | Self::DependencyMissing { .. })
	}
}

impl fmt::Debug for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{self}") }
}

mod tests;
