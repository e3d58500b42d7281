pub mod check;

use std::path::Path;

use figment::providers::{Env, Format, Toml};
pub use figment::Figment;
use serde::Deserialize;

pub use self::check::check;
use crate::{
	Result, err,
	error::Error,
	library::{Binding, Builder, EmptySegments, Flags},
};

/// All the config options for modlink.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	/// Directories probed in order for a library, joined with the platform
	/// path-list separator (':' on unix, ';' on windows). When empty the bare
	/// file name is handed to the system loader, which then applies its own
	/// search rules.
	///
	/// example: "/opt/backends/lib:/usr/local/lib"
	#[serde(default)]
	pub search_path: String,

	/// Capacity of the buffer a library name is built into, including its
	/// terminator. Inputs which cannot fit are refused.
	///
	/// default: 4096
	#[serde(default = "default_name_capacity")]
	pub name_capacity: usize,

	/// Capacity of the buffer diagnostics are written into, including its
	/// terminator. Longer messages are truncated.
	///
	/// default: 1024
	#[serde(default = "default_error_capacity")]
	pub error_capacity: usize,

	/// How a zero-length entry in `search_path` is treated: "skip" ignores it,
	/// "current_dir" probes the working directory in its place.
	///
	/// default: "skip"
	#[serde(default)]
	pub empty_segments: EmptySegments,

	/// Prepend the platform's library prefix ("lib" on unix) to the logical
	/// name.
	///
	/// default: false
	#[serde(default)]
	pub decorate: bool,

	/// Symbol binding on open: "lazy" resolves functions on first call, "now"
	/// resolves everything before open returns. Ignored on windows.
	///
	/// default: "lazy"
	#[serde(default)]
	pub binding: Binding,

	/// Make the library's symbols available to libraries loaded after it.
	/// Ignored on windows.
	///
	/// default: false
	#[serde(default)]
	pub global: bool,

	/// Log filter directive in tracing's EnvFilter syntax.
	///
	/// default: "info" ("debug" in debug builds)
	#[serde(default = "default_log")]
	pub log: String,
}

impl Config {
	/// Pre-initialize config
	pub fn load<'a, I>(paths: I) -> Result<Figment>
	where
		I: Iterator<Item = &'a Path>,
	{
		let config = Env::var("MODLINK_CONFIG")
			.into_iter()
			.map(Toml::file)
			.chain(paths.map(Toml::file))
			.fold(Figment::new(), |config, file| config.merge(file.nested()))
			.merge(Env::prefixed("MODLINK_").ignore(&["CONFIG"]).global().split("__"));

		Ok(config)
	}

	/// Finalize config
	pub fn new(raw_config: &Figment) -> Result<Self> {
		let config = raw_config
			.extract::<Self>()
			.map_err(|e| err!("There was a problem with your configuration file: {e}"))?;

		Ok(config)
	}

	/// Name builder configured from these options.
	#[must_use]
	pub fn builder(&self) -> Builder {
		Builder::new(self.name_capacity)
			.empty_segments(self.empty_segments)
			.decorate(self.decorate)
	}

	/// Open flags configured from these options.
	#[must_use]
	pub fn flags(&self) -> Flags { Flags { binding: self.binding, global: self.global } }

	pub fn check(&self) -> Result<(), Error> { check(self) }
}

impl Default for Config {
	fn default() -> Self {
		Self {
			search_path: String::new(),
			name_capacity: default_name_capacity(),
			error_capacity: default_error_capacity(),
			empty_segments: EmptySegments::default(),
			decorate: false,
			binding: Binding::default(),
			global: false,
			log: default_log(),
		}
	}
}

fn default_name_capacity() -> usize { 4096 }

fn default_error_capacity() -> usize { 1024 }

#[must_use]
pub fn default_log() -> String {
	cfg!(debug_assertions)
		.then_some("debug")
		.unwrap_or("info")
		.to_owned()
}

mod tests;
