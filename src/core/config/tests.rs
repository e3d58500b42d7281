#![cfg(test)]

use figment::{
	Figment,
	providers::{Format, Toml},
};

use super::Config;
use crate::library::{Binding, EmptySegments};

fn from_toml(toml: &str) -> Config {
	let figment = Figment::new().merge(Toml::string(toml).nested());
	Config::new(&figment).expect("valid config")
}

#[test]
fn defaults() {
	let config = from_toml("[global]\n");
	assert_eq!(config.search_path, "");
	assert_eq!(config.name_capacity, 4096);
	assert_eq!(config.error_capacity, 1024);
	assert_eq!(config.empty_segments, EmptySegments::Skip);
	assert_eq!(config.binding, Binding::Lazy);
	assert!(!config.decorate, "undecorated by default");
	assert!(!config.global, "local by default");
	assert!(config.check().is_ok(), "defaults pass the checks");
}

#[test]
fn overrides() {
	let config = from_toml(
		r#"
		[global]
		search_path = "/opt/a:/opt/b"
		empty_segments = "current_dir"
		binding = "now"
		global = true
		decorate = true
		"#,
	);

	assert_eq!(config.search_path, "/opt/a:/opt/b");
	assert_eq!(config.empty_segments, EmptySegments::CurrentDir);
	assert_eq!(config.flags().binding, Binding::Now);
	assert!(config.flags().global, "global flag carried into open flags");
}

#[test]
fn check_name_capacity() {
	let config = Config { name_capacity: 10, ..Config::default() };
	let error = config.check().expect_err("capacity below overhead");
	assert!(error.to_string().contains("name_capacity"), "names the directive: {error}");
}

#[test]
fn check_error_capacity() {
	let config = Config { error_capacity: 1, ..Config::default() };
	assert!(config.check().is_err(), "no room for text");
}

#[test]
fn check_log_filter() {
	let config = Config { log: "modlink=notalevel".to_owned(), ..Config::default() };
	let error = config.check().expect_err("bad filter");
	assert!(error.to_string().contains("'log'"), "names the directive: {error}");
}

#[test]
fn unknown_enum_value() {
	let figment = Figment::new().merge(Toml::string("[global]\nbinding = \"eager\"\n").nested());
	assert!(Config::new(&figment).is_err(), "unknown binding refused");
}
