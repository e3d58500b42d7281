//! Error construction macros
//!
//! The primary macros `Err!` and `err!` are provided. `Err!` simply wraps
//! `err!` in the Result variant to reduce `Err(err!(...))` boilerplate, thus
//! `err!` can be used in any case.
//!
//! 1. General construction: `return Err!("something went wrong")` replaces
//!    `return Err(Error::Err("something went wrong".into()))`.
//!
//! 2. Format strings are integrated: `return Err!("bad name: {name}")`.
//!
//! 3. Variants are scoped: `return Err!(Unloaded("{path}"))` replaces
//!    `return Err(Error::Unloaded(format!("{path}")))`.
//!
//! 4. The message can be logged at the callsite with the same text:
//!    `return Err!(debug_warn!("probe failed: {msg}"))`.
#[macro_export]
macro_rules! Err {
	($($args:tt)*) => {
		Err($crate::err!($($args)*))
	};
}

#[macro_export]
macro_rules! err {
	(Config($item:literal, $($args:tt)+)) => {{
		$crate::error!(config = %$item, $($args)+);
		$crate::error::Error::Config($item, ::std::format!($($args)+).into())
	}};

	($variant:ident($level:ident!($($args:tt)+))) => {{
		$crate::$level!($($args)+);
		$crate::error::Error::$variant(::std::format!($($args)+).into())
	}};

	($variant:ident($($args:tt)+)) => {
		$crate::error::Error::$variant(::std::format!($($args)+).into())
	};

	($level:ident!($($args:tt)+)) => {{
		$crate::$level!($($args)+);
		$crate::error::Error::Err(::std::format!($($args)+).into())
	}};

	($($args:tt)+) => {
		$crate::error::Error::Err(::std::format!($($args)+).into())
	};
}
