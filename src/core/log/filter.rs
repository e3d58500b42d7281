use tracing_subscriber::EnvFilter;

use crate::{Result, config};

/// Parse a log directive (e.g. "info,modlink_core::library=trace") into a
/// filter for the subscriber.
pub fn env_filter(directive: &str) -> Result<EnvFilter> { Ok(EnvFilter::try_new(directive)?) }

/// Filter built from the default log level; infallible.
#[must_use]
pub fn default_filter() -> EnvFilter { EnvFilter::new(config::default_log()) }
