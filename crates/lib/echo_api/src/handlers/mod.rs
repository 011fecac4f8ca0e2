//! Request handlers.

pub mod echo;
