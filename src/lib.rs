//! spur-chat is a terminal client for thread-based AI chat backends.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`api`] defines the REST payloads and the [`api::ChatApi`] port, with a
//!   reqwest-backed implementation.
//! - [`core`] owns runtime state: the thread list, the optimistic message
//!   log, the selected-thread link, the anonymous identity, and on-disk
//!   configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input, background requests, and display updates.
//! - [`commands`] implements slash-command parsing used by the chat input.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which resolves the backend and identity and
//! dispatches into [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod logging;
pub mod ui;
pub mod utils;
