//! Paginated single-selection list widget used by menu screens.

mod core;

pub use core::{DEFAULT_LIST_HEIGHT, DEFAULT_LIST_WIDTH, ListItem, SelectList};
