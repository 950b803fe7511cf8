//! Back-stack of titled screens.
//!
//! Index 0 is the root, the last item is the active screen. Only the active
//! screen receives input and renders; resize reaches every item. A stack is
//! also a screen, so a nested stack can be pushed like any other item.

mod core;

pub use core::{NavigationItem, NavigationStack, STACK_LOG_TARGET};
