pub mod app;
pub mod config;
pub mod identity;
pub mod location;
pub mod notifications;
pub mod state_file;
pub mod transcript;
