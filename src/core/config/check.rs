use crate::{Config, Err, error::Error, library::name, log, warn};

pub fn check(config: &Config) -> Result<(), Error> {
	#[cfg(debug_assertions)]
	crate::debug_info!("Note: modlink was built without optimisations (i.e. debug build)");

	if config.name_capacity <= name::OVERHEAD {
		return Err!(Config(
			"name_capacity",
			"Must be larger than the {} bytes of name formatting overhead.",
			name::OVERHEAD
		));
	}

	if config.error_capacity < 2 {
		return Err!(Config(
			"error_capacity",
			"Must hold at least one byte of text and the terminator."
		));
	}

	let needed = config
		.search_path
		.len()
		.saturating_add(config.builder().overhead());
	if needed >= config.name_capacity {
		warn!(
			search_path = config.search_path.len(),
			name_capacity = config.name_capacity,
			"search_path leaves no room for a library name; every lookup will be refused."
		);
	}

	if let Err(e) = log::env_filter(&config.log) {
		return Err!(Config("log", "Not a valid log filter directive: {e}"));
	}

	#[cfg(windows)]
	if config.global || config.binding != crate::library::Binding::default() {
		warn!("'binding' and 'global' have no effect on windows.");
	}

	Ok(())
}
