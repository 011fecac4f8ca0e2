//! Outbound services.

pub mod gemini;
