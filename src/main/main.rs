pub(crate) mod clap;
mod commands;
mod logging;

use std::process::ExitCode;

use modlink_core::{Result, debug_info};

fn main() -> Result<ExitCode> {
	let args = clap::parse();
	let config = clap::config(&args)?;
	logging::init(&config);

	let code = commands::run(&config, &args.command)?;

	debug_info!("Exit");
	Ok(code)
}
