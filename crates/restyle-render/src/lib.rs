//! Stylesheet generation for the restyle pipeline.

mod generator;
mod scope;

pub use generator::{render_theme, write_theme};
pub use scope::{PLACEHOLDER_HOST, sanitized_host};
