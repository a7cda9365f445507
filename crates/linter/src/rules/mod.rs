//! vibe-coder lint rules

pub mod no_optional_properties;

// Re-export rule structs
pub use no_optional_properties::{NoOptionalProperties, PropertyField};
