use std::{ffi::c_void, path::PathBuf, process::ExitCode};

use modlink_core::{Config, Error, Library, Result, debug, error::map_log, info, utils::buf};

use crate::clap::Command;

pub(crate) fn run(config: &Config, command: &Command) -> Result<ExitCode> {
	match command {
		| Command::Name { name } => find(config, name),
		| Command::Load { name, symbols, path } => load(config, name, symbols, *path),
	}
}

fn find(config: &Config, name: &str) -> Result<ExitCode> {
	let builder = config.builder();
	match builder.build(&config.search_path, name)? {
		| Some(path) => {
			println!("{}", path.display());
			Ok(ExitCode::SUCCESS)
		},
		| None => {
			let file = builder.file_name(name);
			info!(search_path = %config.search_path, "No directory holds {file}");
			Ok(ExitCode::FAILURE)
		},
	}
}

fn load(config: &Config, name: &str, symbols: &[String], path: bool) -> Result<ExitCode> {
	let opened = if path {
		Library::open_with(PathBuf::from(name), config.flags())
	} else {
		Library::from_name(&config.builder(), &config.search_path, name, config.flags())
	};

	let mut lib = match opened {
		| Ok(lib) => lib,
		| Err(e) if e.is_load_failure() => {
			eprintln!("{}", diagnostic(config, &e));
			return Ok(ExitCode::FAILURE);
		},
		| Err(e) => return Err(map_log(e)),
	};

	debug!(path = ?lib.path(), name = ?lib.name(), "Loaded");
	for symbol in symbols {
		match lib.resolve(symbol) {
			| Some(addr) => println!("{symbol}\t{addr:p}"),
			| None => println!("{symbol}\tnot found: {}", symbol_diagnostic(config, &lib, symbol)),
		}
	}

	lib.unload()?;
	Ok(ExitCode::SUCCESS)
}

/// Diagnostic text bounded by the configured error capacity.
fn diagnostic(config: &Config, error: &Error) -> String {
	let mut out = vec![0_u8; config.error_capacity];
	error.report(&mut out);
	buf::as_str(&out).map_or_else(|_| error.to_string(), ToOwned::to_owned)
}

fn symbol_diagnostic(config: &Config, lib: &Library, symbol: &str) -> String {
	// SAFETY: the result is only formatted; the symbol is never read or called.
	match unsafe { lib.get::<*mut c_void>(symbol) } {
		| Err(e) => diagnostic(config, &e),
		| Ok(_) => String::from("null address"),
	}
}
