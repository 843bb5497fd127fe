//! Terminal UI layer for interactive chat sessions.
//!
//! Key submodules include:
//! - [`chat_loop`]: the main interaction loop that turns key presses into
//!   [`crate::core::app::AppAction`]s and runs backend requests in the
//!   background.
//! - [`renderer`] and [`layout`]: view composition and frame output.
//! - [`theme`]: color and style policy.
//!
//! Ownership boundary: this layer presents and captures interaction state, while
//! [`crate::core`] owns domain logic and backend coordination.

pub mod chat_loop;
pub mod layout;
pub mod renderer;
pub mod theme;
