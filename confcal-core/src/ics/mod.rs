//! ICS generation.
//!
//! Renders calendar events as RFC 5545 text.

mod generate;

pub use generate::{format_instant, generate_ics};
