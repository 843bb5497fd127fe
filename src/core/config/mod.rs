pub mod data;
pub mod io;
pub mod printing;

pub use data::{Config, DEFAULT_API_BASE_URL, ENV_API_BASE_URL};
pub use io::ConfigError;
