//! # echo_core
//!
//! Core domain logic for Echo Chamber: the persona table, the upstream wire
//! format, the markdown-lite renderer and the chat controller state machine.
//!
//! Nothing in this crate performs I/O, so it builds for native targets and
//! for `wasm32-unknown-unknown` alike.

pub mod chat;
pub mod gemini;
pub mod markdown;
pub mod models;
pub mod persona;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
