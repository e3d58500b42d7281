use modlink_core::{Config, log};
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt};

pub(crate) fn init(config: &Config) {
	let fmt_layer = tracing_subscriber::fmt::Layer::new().with_writer(std::io::stderr);
	let filter_layer = match log::env_filter(&config.log) {
		| Ok(s) => s,
		| Err(e) => {
			eprintln!("It looks like your config is invalid. The following error occured while parsing it: {e}");
			log::default_filter()
		},
	};

	let subscriber = Registry::default().with(fmt_layer.with_filter(filter_layer));
	set_global_default(subscriber);
}

fn set_global_default<S: SubscriberExt + Send + Sync + 'static>(subscriber: S) {
	tracing::subscriber::set_global_default(subscriber)
		.expect("the global default tracing subscriber failed to be initialized");
}
