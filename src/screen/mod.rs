//! Screen capability and the effect values screens hand back to the stack.
//!
//! A screen never sees the stack that owns it. Anything it wants done outside
//! its own state (navigate, quit, notify the application) is returned as an
//! [`Effect`] and interpreted by [`crate::NavigationStack`] or the runtime.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::geometry::Size;
use crate::stack::NavigationItem;

/// Builds a fresh screen instance on demand.
pub type ScreenFactory = Arc<dyn Fn() -> Box<dyn Screen> + Send + Sync>;

/// Wrap a cloneable screen so every call yields an independent copy of it.
pub fn factory_from<S>(screen: S) -> ScreenFactory
where
    S: Screen + Clone + Sync + 'static,
{
    Arc::new(move || -> Box<dyn Screen> { Box::new(screen.clone()) })
}

/// Events delivered to the active screen.
#[derive(Debug)]
pub enum ScreenEvent {
    Key(KeyEvent),
    Resize(Size),
    Tick { elapsed: Duration },
    Paste(String),
    /// Application payload produced by an earlier [`Effect::Message`].
    Message(Message),
}

impl ScreenEvent {
    pub fn describe(&self) -> &'static str {
        match self {
            ScreenEvent::Key(_) => "key",
            ScreenEvent::Resize(_) => "resize",
            ScreenEvent::Tick { .. } => "tick",
            ScreenEvent::Paste(_) => "paste",
            ScreenEvent::Message(_) => "message",
        }
    }
}

/// Deferred action returned from [`Screen::init`] or [`Screen::handle`].
pub enum Effect {
    /// Put a new item on top of the stack.
    Push(NavigationItem),
    /// Drop the current top. Ignored when only the root remains.
    Pop,
    /// Deliver a payload back through the event queue.
    Message(Message),
    /// Ask the runtime to stop after the current frame.
    Quit,
    Batch(Vec<Effect>),
}

impl Effect {
    pub fn push(title: impl Into<String>, screen: impl Screen + 'static) -> Self {
        Effect::Push(NavigationItem::new(title, screen))
    }

    pub fn message<T>(payload: T) -> Self
    where
        T: Any + Send,
    {
        Effect::Message(Message::new(payload))
    }

    /// Collapse a list of effects: nothing for an empty list, the effect
    /// itself for a single one, a batch otherwise.
    pub fn batch(mut effects: Vec<Effect>) -> Option<Effect> {
        match effects.len() {
            0 => None,
            1 => effects.pop(),
            _ => Some(Effect::Batch(effects)),
        }
    }

    pub fn is_navigation(&self) -> bool {
        matches!(self, Effect::Push(_) | Effect::Pop)
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Push(item) => f.debug_tuple("Push").field(item).finish(),
            Effect::Pop => f.write_str("Pop"),
            Effect::Message(message) => f.debug_tuple("Message").field(message).finish(),
            Effect::Quit => f.write_str("Quit"),
            Effect::Batch(effects) => f.debug_tuple("Batch").field(effects).finish(),
        }
    }
}

/// Type-erased application payload.
pub struct Message {
    payload: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Message {
    pub fn new<T>(payload: T) -> Self
    where
        T: Any + Send,
    {
        Self {
            payload: Box::new(payload),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message<{}>", self.type_name)
    }
}

/// Interactive, renderable unit of UI state owned by one stack slot.
pub trait Screen: Send {
    fn name(&self) -> &str {
        "screen"
    }

    /// Runs once when the screen is pushed, before it receives input.
    fn init(&mut self) -> Option<Effect> {
        None
    }

    fn handle(&mut self, event: &ScreenEvent) -> Option<Effect>;

    fn render(&self) -> String;

    /// Called for every item in the stack, dormant ones included.
    fn resize(&mut self, _size: Size) {}
}
