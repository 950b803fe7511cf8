//! Error types shared by the navigation stack, screens and runtime.

mod types;

pub use types::{NavError, Result};
