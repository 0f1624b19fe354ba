//! Output encoders for formats beyond the built-in debug rendering.

pub mod cbor;
pub mod toml;
pub mod yaml;
