//! Ready-made screens.

pub mod color;

pub use color::{ColorScreen, ColorSelected};
