//! Formula - Elm-style editing core for a structured formula-entry widget
//!
//! The formula is a mixed sequence of free-text fragments, sensor
//! references, and operator symbols. This crate provides the token-stream
//! editing core: the in-memory model of the composed formula, the logical
//! cursor over it, the `@`/`#` trigger protocol that opens contextual
//! pickers, and validation/serialization into a simplified AST. Rendering,
//! the picker widgets themselves, and formula evaluation live in the host.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod input;
pub mod messages;
pub mod model;
pub mod sensors;
pub mod tracing;
pub mod trigger;
pub mod update;
pub mod validate;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::EditorModel;
pub use validate::{Ast, ValidationError, ValidationState};
