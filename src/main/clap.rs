//! Integration with `clap`

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use modlink_core::{Config, Result};

/// Commandline arguments
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
pub(crate) struct Args {
	#[arg(short, long)]
	/// Path to a modlink config TOML file; may be given more than once
	pub(crate) config: Option<Vec<PathBuf>>,

	/// Directories to probe, overriding the configured search_path
	#[arg(long, global = true)]
	pub(crate) search_path: Option<String>,

	/// Log filter, overriding the configured log directive
	#[arg(long, global = true)]
	pub(crate) log: Option<String>,

	#[command(subcommand)]
	pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
	/// Print the file a logical library name resolves to
	Name {
		/// Logical library name, without prefix or suffix
		name: String,
	},

	/// Load a library, look up symbols in it, then unload it
	Load {
		/// Logical library name, or a file path with --path
		name: String,

		/// Symbol to look up; may be given more than once
		#[arg(short, long = "symbol")]
		symbols: Vec<String>,

		/// Treat NAME as a file path and skip name building
		#[arg(long)]
		path: bool,
	},
}

/// Parse commandline arguments into structured data
#[must_use]
pub(super) fn parse() -> Args { Args::parse() }

/// Load the configuration named by the arguments and the environment, apply
/// commandline overrides and validate the result.
pub(crate) fn config(args: &Args) -> Result<Config> {
	let paths = args.config.iter().flatten().map(PathBuf::as_path);
	let raw_config = Config::load(paths)?;
	let mut config = Config::new(&raw_config)?;
	update(&mut config, args)?;
	config.check()?;

	Ok(config)
}

/// Synthesize any command line options with configuration file options.
pub(crate) fn update(config: &mut Config, args: &Args) -> Result<()> {
	if let Some(search_path) = &args.search_path {
		config.search_path.clone_from(search_path);
	}

	if let Some(log) = &args.log {
		config.log.clone_from(log);
	}

	Ok(())
}
