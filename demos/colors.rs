//! Colorful Choices
//!
//! A three-entry menu. Enter opens a color sample, Enter on the sample picks
//! the color and exits, Esc goes back, Ctrl+C quits.
//!
//! Set `HEADLESS=1` (or `CI`) to replay a short script instead of opening the
//! terminal, and `ROOM_NAV_LOG=<path>` to write JSON logs.

use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use room_nav::screens::{ColorScreen, ColorSelected};
use room_nav::{
    Choice, CliDriver, EventFlow, FileSink, LifecycleLoggerPlugin, Logger, MenuScreen, NavPlugin,
    NavRuntime, NavigationItem, Result, RuntimeConfig, RuntimeContext, ScreenEvent, Size,
};

const LOG_MAX_BYTES: u64 = 1024 * 1024;

/// Remembers the confirmed color and ends the session.
struct SelectionPlugin {
    selected: Arc<Mutex<Option<String>>>,
}

impl NavPlugin for SelectionPlugin {
    fn name(&self) -> &str {
        "colors.selection"
    }

    fn on_event(&mut self, ctx: &mut RuntimeContext<'_>, event: &ScreenEvent) -> Result<EventFlow> {
        let ScreenEvent::Message(message) = event else {
            return Ok(EventFlow::Continue);
        };
        let Some(picked) = message.downcast_ref::<ColorSelected>() else {
            return Ok(EventFlow::Continue);
        };
        if let Ok(mut selected) = self.selected.lock() {
            *selected = Some(picked.rgb.clone());
        }
        ctx.request_exit();
        Ok(EventFlow::Consumed)
    }
}

fn choices() -> Vec<Choice> {
    vec![
        Choice::new(
            "Red Envy",
            "Raindrops on roses",
            ColorScreen::new("#FF0000", "❤️ Love makes the world go around ❤️"),
        ),
        Choice::new(
            "Green Grass",
            "Green grows the grass over thy neighbors septic tank",
            ColorScreen::new("#00FF00", "☘️ The luck you make for yourself ☘️"),
        ),
        Choice::new(
            "Blue Shoes",
            "But did he cry?! No!",
            ColorScreen::new("#0000FF", "🧿 Never forget what it's like to feel young 🧿"),
        ),
    ]
}

fn key(code: KeyCode) -> ScreenEvent {
    ScreenEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut config = RuntimeConfig::default();
    if let Ok(path) = std::env::var("ROOM_NAV_LOG") {
        config.logger = Some(Logger::new(FileSink::new(path, LOG_MAX_BYTES)?));
    }

    let menu = MenuScreen::new("Colorful Choices", choices(), None);
    let root = NavigationItem::new("Colorful Choices", menu);
    let mut runtime = NavRuntime::with_config(root, Size::new(120, 30), config.clone());

    let selected = Arc::new(Mutex::new(None));
    runtime.register_plugin(SelectionPlugin {
        selected: Arc::clone(&selected),
    });
    if let Some(logger) = config.logger {
        runtime.register_plugin(LifecycleLoggerPlugin::new(logger));
    }

    let is_headless = std::env::var("CI").is_ok() || std::env::var("HEADLESS").is_ok();
    if is_headless {
        let mut buffer = Vec::new();
        runtime.run_scripted(
            &mut buffer,
            [
                key(KeyCode::Down),
                key(KeyCode::Enter),
                key(KeyCode::Esc),
                key(KeyCode::Down),
                key(KeyCode::Enter),
                key(KeyCode::Enter),
            ],
        )?;
        println!("{}", String::from_utf8_lossy(&buffer));
    } else {
        let outcome = CliDriver::new(runtime).run()?;
        println!("Closed at: {}", outcome.breadcrumb(" > "));
    }

    match selected.lock().ok().and_then(|selected| selected.clone()) {
        Some(rgb) => println!("You selected the color: {rgb}"),
        None => println!("No color selected"),
    }
    Ok(())
}
