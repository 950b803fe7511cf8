//! Stack-based screen navigation for terminal applications.
//!
//! A [`NavigationStack`] owns a stack of screens and routes input to the top
//! one. Screens never touch the stack directly; they hand back [`Effect`]s
//! such as [`Effect::Push`] or [`Effect::Pop`]. [`MenuScreen`] is a ready-made
//! selectable list that pushes the chosen entry's screen, and [`NavRuntime`]
//! drives a stack from crossterm events.

pub mod cursor;
pub mod error;
pub mod geometry;
pub mod keymap;
pub mod list;
pub mod logging;
pub mod menu;
pub mod metrics;
pub mod render;
pub mod runtime;
pub mod screen;
pub mod screens;
pub mod stack;
pub mod style;
pub mod width;

pub use error::{NavError, Result};
pub use geometry::Size;
pub use keymap::{KeyAction, KeyMap};
pub use list::{ListItem, SelectList};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use menu::{Choice, ChoiceId, MenuScreen};
pub use metrics::{MetricSnapshot, NavigationMetrics};
pub use render::{AnsiRenderer, RendererSettings};
pub use runtime::diagnostics::LifecycleLoggerPlugin;
pub use runtime::driver::{CliDriver, CliDriverError, DriverResult, SessionOutcome};
pub use runtime::{EventFlow, NavPlugin, NavRuntime, RuntimeConfig, RuntimeContext};
pub use screen::{Effect, Message, Screen, ScreenEvent, ScreenFactory, factory_from};
pub use stack::{NavigationItem, NavigationStack};
pub use style::FrameStyle;
pub use width::display_width;
