//! Procedural seashell geometry on a logarithmic helicospiral.
//!
//! The crate produces a parameter-space mesh, the morphospace anchors that
//! shape it, and the draw ranges a renderer issues each frame.

pub mod config;
pub mod error;
pub mod shell;

pub use error::{Result, ShellError};
