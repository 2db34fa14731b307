//! Sonotex CLI library.
//!
//! Input loading and the `render` and `validate` command implementations.

pub mod commands;
pub mod input;
