//! Native library resolution, loading and unloading.
//!
//! The caller builds a file name from a logical name and a search path
//! ([`name::Builder`]), opens it ([`Library::open`]), resolves entry points
//! ([`Library::resolve`], [`Library::get`]) and finally unloads it
//! ([`Library::unload`], or on drop). Every operation is a synchronous pass
//! through to the platform loader.

pub mod handle;
pub mod name;
pub mod open;

#[cfg(unix)]
pub(crate) use libloading::os::unix::Library as Handle;
#[cfg(unix)]
pub use libloading::os::unix::Symbol;
#[cfg(windows)]
pub(crate) use libloading::os::windows::Library as Handle;
#[cfg(windows)]
pub use libloading::os::windows::Symbol;

pub use self::{
	handle::{Library, State},
	name::{Builder, EmptySegments},
	open::{Binding, Flags},
};
