pub mod config;
pub mod debug;
pub mod error;
pub mod library;
pub mod log;
pub mod utils;

pub use config::Config;
pub use error::{Error, Fault};
pub use library::{Library, State};

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
