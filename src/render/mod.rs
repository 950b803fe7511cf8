//! Writes rendered frames to the terminal.

mod core;

pub use core::{AnsiRenderer, RendererSettings};
