//! Rendering outlines to output formats.

mod json;

pub use json::{layout_to_json, to_json, JsonFormat};
