//! Menu screen: a titled list of choices, each leading to a child screen.
//!
//! Confirming a choice asks the stack to push a fresh instance of its child;
//! cancelling asks the stack to pop. The menu never swaps itself out.

mod core;

pub use core::{Choice, ChoiceId, MenuScreen};
