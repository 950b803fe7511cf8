use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use serde_json::json;

use crate::logging::{LogLevel, event_with_fields, json_kv, json_str};
use crate::{
    AnsiRenderer, Effect, FrameStyle, Logger, Message, NavigationItem, NavigationMetrics,
    NavigationStack, Result, ScreenEvent, Size,
};

pub mod diagnostics;
pub mod driver;

pub const RUNTIME_LOG_TARGET: &str = "room_nav::runtime";

/// Configuration knobs for the runtime loop.
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Interval between synthetic tick events.
    pub tick_interval: Duration,
    /// Optional structured logger shared with the navigation stack.
    pub logger: Option<Logger>,
    /// Metrics accumulator used for periodic snapshots.
    pub metrics: Option<Arc<Mutex<NavigationMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
    /// Margins drawn around the active screen.
    pub frame: FrameStyle,
    /// Stop the loop on Ctrl+C before plugins or screens see the key.
    pub exit_on_ctrl_c: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(200),
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: "room_nav::runtime.metrics".to_string(),
            frame: FrameStyle::default(),
            exit_on_ctrl_c: true,
        }
    }
}

impl RuntimeConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(NavigationMetrics::new())));
        }
    }

    /// Disable metrics collection and prevent further snapshots.
    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<NavigationMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Control the propagation of an event across plugins and the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    Consumed,
}

/// Context passed to plugins. Plugins read the stack but change it only by
/// queueing effects, which the runtime applies after the plugin returns.
pub struct RuntimeContext<'a> {
    stack: &'a NavigationStack,
    effects: Vec<Effect>,
    redraw_requested: bool,
    exit_requested: bool,
}

impl<'a> RuntimeContext<'a> {
    fn new(stack: &'a NavigationStack) -> Self {
        Self {
            stack,
            effects: Vec::new(),
            redraw_requested: false,
            exit_requested: false,
        }
    }

    pub fn stack(&self) -> &NavigationStack {
        self.stack
    }

    pub fn push(&mut self, item: NavigationItem) {
        self.effects.push(Effect::Push(item));
    }

    pub fn pop(&mut self) {
        self.effects.push(Effect::Pop);
    }

    /// Queue an arbitrary effect, executed as if a screen had returned it.
    pub fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Request that the renderer runs even if nothing changed.
    pub fn request_render(&mut self) {
        self.redraw_requested = true;
    }

    /// Signal to the runtime that execution should terminate at the end of the frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn into_outcome(self) -> ContextOutcome {
        ContextOutcome {
            effects: self.effects,
            redraw_requested: self.redraw_requested,
            exit_requested: self.exit_requested,
        }
    }
}

struct ContextOutcome {
    effects: Vec<Effect>,
    redraw_requested: bool,
    exit_requested: bool,
}

/// Behaviour injection point for the runtime. Plugins see every event before
/// the active screen does.
pub trait NavPlugin: Send {
    fn name(&self) -> &str {
        "nav_plugin"
    }

    fn init(&mut self, _ctx: &mut RuntimeContext<'_>) -> Result<()> {
        Ok(())
    }

    fn on_event(
        &mut self,
        _ctx: &mut RuntimeContext<'_>,
        _event: &ScreenEvent,
    ) -> Result<EventFlow> {
        Ok(EventFlow::Continue)
    }

    fn before_render(&mut self, _ctx: &mut RuntimeContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Event loop adapter between the terminal and a [`NavigationStack`].
pub struct NavRuntime {
    stack: NavigationStack,
    renderer: AnsiRenderer,
    plugins: Vec<Box<dyn NavPlugin>>,
    config: RuntimeConfig,
    messages: VecDeque<Message>,
    terminal_size: Size,
    should_exit: bool,
    redraw_requested: bool,
    start_instant: Option<Instant>,
    last_metrics_emit: Option<Instant>,
}

impl NavRuntime {
    pub fn new(root: NavigationItem, initial_size: Size) -> Self {
        Self::with_config(root, initial_size, RuntimeConfig::default())
    }

    /// Build a runtime around `root`. The logger and metrics of `config` are
    /// shared with the stack, and the root is sized to the frame's interior.
    pub fn with_config(root: NavigationItem, initial_size: Size, mut config: RuntimeConfig) -> Self {
        if config.metrics_interval > Duration::ZERO {
            config.enable_metrics();
        }

        let mut stack = NavigationStack::new();
        stack.set_logger(config.logger.clone());
        stack.set_metrics(config.metrics_handle());
        stack.push(root);

        let mut runtime = Self {
            stack,
            renderer: AnsiRenderer::with_default(),
            plugins: Vec::new(),
            config,
            messages: VecDeque::new(),
            terminal_size: initial_size,
            should_exit: false,
            redraw_requested: true,
            start_instant: None,
            last_metrics_emit: None,
        };
        let content = runtime.content_size();
        runtime.stack.resize(content);
        runtime
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn renderer_mut(&mut self) -> &mut AnsiRenderer {
        &mut self.renderer
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut NavigationStack {
        &mut self.stack
    }

    pub fn terminal_size(&self) -> Size {
        self.terminal_size
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn register_plugin<P>(&mut self, plugin: P)
    where
        P: NavPlugin + 'static,
    {
        self.plugins.push(Box::new(plugin));
    }

    /// Area left for screens once the frame margins are taken.
    pub fn content_size(&self) -> Size {
        let (horizontal, vertical) = self.config.frame.frame_size();
        self.terminal_size.shrink(horizontal, vertical)
    }

    /// Adopt a new terminal size and fan it out to every screen.
    pub fn resize(&mut self, size: Size) -> Result<()> {
        self.step(ScreenEvent::Resize(size))
    }

    /// Process one external event plus every message it leads to.
    pub fn step(&mut self, event: ScreenEvent) -> Result<()> {
        self.deliver(event)?;
        while !self.should_exit {
            let Some(message) = self.messages.pop_front() else {
                break;
            };
            self.deliver(ScreenEvent::Message(message))?;
        }
        self.maybe_emit_metrics();
        Ok(())
    }

    pub fn run(&mut self, stdout: &mut impl Write) -> Result<()> {
        self.bootstrap(stdout)?;
        let mut last_tick = Instant::now();

        while !self.should_exit {
            let timeout = self
                .config
                .tick_interval
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);

            if event::poll(timeout)? {
                if let Some(event) = Self::map_event(event::read()?) {
                    self.step(event)?;
                    self.render_frame(stdout)?;
                }
            }

            if last_tick.elapsed() >= self.config.tick_interval {
                let now = Instant::now();
                let elapsed = now.duration_since(last_tick);
                last_tick = now;
                self.step(ScreenEvent::Tick { elapsed })?;
                self.render_frame(stdout)?;
            }
        }

        self.finalize();
        Ok(())
    }

    /// Replay `events` without touching the terminal, rendering after each.
    pub fn run_scripted<I>(&mut self, stdout: &mut impl Write, events: I) -> Result<()>
    where
        I: IntoIterator<Item = ScreenEvent>,
    {
        self.bootstrap(stdout)?;
        for event in events {
            self.step(event)?;
            self.render_frame(stdout)?;
            if self.should_exit {
                break;
            }
        }
        self.finalize();
        Ok(())
    }

    /// Render the active screen inside the frame if anything may have changed.
    pub fn render_frame(&mut self, stdout: &mut impl Write) -> Result<()> {
        if !self.redraw_requested {
            return Ok(());
        }
        self.redraw_requested = false;

        for idx in 0..self.plugins.len() {
            let outcome = {
                let plugin = &mut self.plugins[idx];
                let mut ctx = RuntimeContext::new(&self.stack);
                plugin.before_render(&mut ctx)?;
                ctx.into_outcome()
            };
            self.apply_outcome(outcome);
        }

        let body = self.stack.render()?;
        let frame = self.config.frame.render(&body);
        if self.renderer.render(stdout, &frame, self.terminal_size)? {
            self.record_metric(NavigationMetrics::record_render);
            self.log_runtime_event(
                LogLevel::Debug,
                "render_completed",
                [json_str("top", self.stack.current()?.title())],
            );
        }
        Ok(())
    }

    fn deliver(&mut self, event: ScreenEvent) -> Result<()> {
        let event = match event {
            ScreenEvent::Resize(size) => self.handle_resize(size),
            other => other,
        };

        if self.config.exit_on_ctrl_c && is_ctrl_c(&event) {
            self.should_exit = true;
            self.log_runtime_event(LogLevel::Info, "exit_requested", [json_str("by", "ctrl_c")]);
            return Ok(());
        }

        let mut consumed = false;
        for idx in 0..self.plugins.len() {
            let (flow, outcome) = {
                let plugin = &mut self.plugins[idx];
                let mut ctx = RuntimeContext::new(&self.stack);
                let flow = plugin.on_event(&mut ctx, &event)?;
                (flow, ctx.into_outcome())
            };
            self.apply_outcome(outcome);
            if matches!(flow, EventFlow::Consumed) {
                consumed = true;
                break;
            }
        }

        // A consumed event leaves the screens untouched; plugins that changed
        // what is shown ask for a frame through their context.
        if !consumed {
            self.redraw_requested = true;
            if let Some(effect) = self.stack.dispatch(&event)? {
                self.execute(effect);
            }
        }

        self.log_runtime_event(
            LogLevel::Debug,
            "event_dispatched",
            [
                json_str("event", event.describe()),
                json_kv("consumed", json!(consumed)),
                json_kv("depth", json!(self.stack.len())),
            ],
        );
        Ok(())
    }

    /// Run a non-navigation effect, or hand navigation back to the stack.
    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::Quit => {
                self.should_exit = true;
                self.log_runtime_event(LogLevel::Info, "exit_requested", [json_str("by", "effect")]);
            }
            Effect::Message(message) => self.messages.push_back(message),
            Effect::Batch(effects) => {
                for effect in effects {
                    self.execute(effect);
                }
            }
            navigation @ (Effect::Push(_) | Effect::Pop) => {
                if let Some(rest) = self.stack.apply(navigation) {
                    self.execute(rest);
                }
            }
        }
    }

    fn apply_outcome(&mut self, outcome: ContextOutcome) {
        let ContextOutcome {
            effects,
            redraw_requested,
            exit_requested,
        } = outcome;

        if !effects.is_empty() {
            self.redraw_requested = true;
        }
        for effect in effects {
            self.execute(effect);
        }

        if redraw_requested {
            self.redraw_requested = true;
        }

        if exit_requested {
            self.should_exit = true;
            self.log_runtime_event(LogLevel::Info, "exit_requested", [json_str("by", "plugin")]);
        }
    }

    fn map_event(event: CrosstermEvent) -> Option<ScreenEvent> {
        match event {
            CrosstermEvent::Key(key) => Some(ScreenEvent::Key(key)),
            CrosstermEvent::Paste(data) => Some(ScreenEvent::Paste(data)),
            CrosstermEvent::Resize(width, height) => Some(ScreenEvent::Resize(Size::new(width, height))),
            CrosstermEvent::Mouse(_) | CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => {
                None
            }
        }
    }

    /// Record the terminal size and translate the event to the frame interior.
    fn handle_resize(&mut self, size: Size) -> ScreenEvent {
        self.terminal_size = size;
        self.renderer.invalidate();
        self.redraw_requested = true;
        let content = self.content_size();
        self.log_runtime_event(
            LogLevel::Info,
            "resized",
            [
                json_kv("width", json!(size.width)),
                json_kv("height", json!(size.height)),
                json_kv("content_width", json!(content.width)),
                json_kv("content_height", json!(content.height)),
            ],
        );
        ScreenEvent::Resize(content)
    }

    fn bootstrap(&mut self, stdout: &mut impl Write) -> Result<()> {
        self.should_exit = false;
        self.redraw_requested = true;
        let now = Instant::now();
        self.start_instant = Some(now);
        self.last_metrics_emit = Some(now);
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_started",
            [
                json_kv("plugins", json!(self.plugins.len())),
                json_kv("depth", json!(self.stack.len())),
            ],
        );

        for idx in 0..self.plugins.len() {
            let outcome = {
                let plugin = &mut self.plugins[idx];
                let plugin_name = plugin.name().to_string();
                let mut ctx = RuntimeContext::new(&self.stack);
                plugin.init(&mut ctx)?;
                self.log_runtime_event(
                    LogLevel::Debug,
                    "plugin_initialized",
                    [json_str("plugin", plugin_name)],
                );
                ctx.into_outcome()
            };
            self.apply_outcome(outcome);
        }

        if let Some(effect) = self.stack.flush_pending() {
            self.execute(effect);
        }

        self.render_frame(stdout)
    }

    fn finalize(&mut self) {
        let uptime_ms = self
            .start_instant
            .map(|start| start.elapsed().as_millis())
            .unwrap_or(0);
        self.log_runtime_event(
            LogLevel::Info,
            "runtime_stopped",
            [
                json_kv("uptime_ms", json!(uptime_ms)),
                json_str("breadcrumb", self.stack.breadcrumb(" > ")),
            ],
        );
    }

    fn log_runtime_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, RUNTIME_LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn record_metric(&self, record: impl FnOnce(&mut NavigationMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics.is_none() || self.config.metrics_interval == Duration::ZERO {
            return;
        }

        let now = Instant::now();
        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.config.metrics_interval => {
                return;
            }
            _ => {
                self.last_metrics_emit = Some(now);
            }
        }

        let uptime = self
            .start_instant
            .map(|start| now.duration_since(start))
            .unwrap_or_default();

        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let target = self.config.metrics_target.as_str();
                let _ = logger.log_event(guard.snapshot(uptime).to_log_event(target));
            }
        }
    }
}

fn is_ctrl_c(event: &ScreenEvent) -> bool {
    matches!(
        event,
        ScreenEvent::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers,
            kind: KeyEventKind::Press | KeyEventKind::Repeat,
            ..
        }) if modifiers.contains(KeyModifiers::CONTROL)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;
    use crate::screens::{ColorScreen, ColorSelected};
    use crate::{Choice, MenuScreen, Screen};

    fn key(code: KeyCode) -> ScreenEvent {
        ScreenEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn color_menu() -> NavigationItem {
        let choices = vec![
            Choice::new("Red", "Raindrops on roses", ColorScreen::new("#FF0000", "love")),
            Choice::new("Green", "Green grass", ColorScreen::new("#00FF00", "luck")),
            Choice::new("Blue", "Blue shoes", ColorScreen::new("#0000FF", "youth")),
        ];
        NavigationItem::new("Colors", MenuScreen::new("Colorful Choices", choices, None))
    }

    /// Stores the confirmed color and stops the loop.
    struct SelectionPlugin {
        selected: Arc<Mutex<Option<String>>>,
    }

    impl NavPlugin for SelectionPlugin {
        fn on_event(
            &mut self,
            ctx: &mut RuntimeContext<'_>,
            event: &ScreenEvent,
        ) -> Result<EventFlow> {
            if let ScreenEvent::Message(message) = event {
                if let Some(selected) = message.downcast_ref::<ColorSelected>() {
                    *self.selected.lock().unwrap() = Some(selected.rgb.clone());
                    ctx.request_exit();
                    return Ok(EventFlow::Consumed);
                }
            }
            Ok(EventFlow::Continue)
        }
    }

    #[test]
    fn confirm_then_cancel_round_trips_through_color_screen() {
        let mut runtime = NavRuntime::new(color_menu(), Size::new(80, 24));
        let root_view = runtime.stack().render().unwrap();

        runtime.step(key(KeyCode::Down)).unwrap();
        runtime.step(key(KeyCode::Enter)).unwrap();
        assert_eq!(runtime.stack().titles(), vec!["Colors", "Green"]);
        let view = runtime.stack().render().unwrap();
        assert!(view.contains("#00FF00"));
        assert!(!view.contains("Colorful Choices"));

        runtime.step(key(KeyCode::Esc)).unwrap();
        assert_eq!(runtime.stack().titles(), vec!["Colors"]);
        let view = runtime.stack().render().unwrap();
        assert!(view.contains("Colorful Choices"));
        assert!(view.contains("Green"));
        assert_ne!(view, root_view, "cursor should still sit on Green");
    }

    #[test]
    fn selection_message_reaches_plugin_and_stops_loop() {
        let selected = Arc::new(Mutex::new(None));
        let mut runtime = NavRuntime::new(color_menu(), Size::new(80, 24));
        runtime.register_plugin(SelectionPlugin {
            selected: Arc::clone(&selected),
        });

        let mut output = Vec::new();
        runtime
            .run_scripted(
                &mut output,
                [
                    key(KeyCode::Down),
                    key(KeyCode::Down),
                    key(KeyCode::Enter),
                    key(KeyCode::Enter),
                    key(KeyCode::Esc),
                ],
            )
            .unwrap();

        assert!(runtime.should_exit());
        assert_eq!(selected.lock().unwrap().as_deref(), Some("#0000FF"));
        assert_eq!(runtime.stack().titles(), vec!["Colors", "Blue"]);
        assert!(!output.is_empty());
    }

    #[test]
    fn unmatched_messages_are_ignored() {
        let mut runtime = NavRuntime::new(color_menu(), Size::new(80, 24));
        runtime.step(key(KeyCode::Enter)).unwrap();
        runtime.step(key(KeyCode::Enter)).unwrap();
        assert!(!runtime.should_exit());
        assert_eq!(runtime.stack().len(), 2);
    }

    #[test]
    fn ctrl_c_exits_before_screens_see_it() {
        let mut runtime = NavRuntime::new(color_menu(), Size::new(80, 24));
        runtime
            .step(ScreenEvent::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            )))
            .unwrap();
        assert!(runtime.should_exit());
        assert_eq!(runtime.stack().len(), 1);
    }

    #[test]
    fn ctrl_c_release_does_not_exit() {
        let mut runtime = NavRuntime::new(color_menu(), Size::new(80, 24));
        runtime
            .step(ScreenEvent::Key(KeyEvent::new_with_kind(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyEventKind::Release,
            )))
            .unwrap();
        assert!(!runtime.should_exit());
    }

    #[test]
    fn consumed_events_render_only_on_request() {
        struct OverlayPlugin;

        impl NavPlugin for OverlayPlugin {
            fn on_event(
                &mut self,
                ctx: &mut RuntimeContext<'_>,
                event: &ScreenEvent,
            ) -> Result<EventFlow> {
                match event {
                    ScreenEvent::Key(key) if key.code == KeyCode::Char('q') => {
                        Ok(EventFlow::Consumed)
                    }
                    ScreenEvent::Key(key) if key.code == KeyCode::Char('r') => {
                        ctx.request_render();
                        Ok(EventFlow::Consumed)
                    }
                    _ => Ok(EventFlow::Continue),
                }
            }
        }

        let mut runtime = NavRuntime::new(color_menu(), Size::new(80, 24));
        runtime.register_plugin(OverlayPlugin);
        runtime.renderer_mut().settings_mut().skip_unchanged = false;

        let frame = |runtime: &mut NavRuntime| {
            let mut output = Vec::new();
            runtime.render_frame(&mut output).unwrap();
            output.len()
        };
        assert!(frame(&mut runtime) > 0);

        runtime.step(key(KeyCode::Char('q'))).unwrap();
        assert_eq!(frame(&mut runtime), 0);

        runtime.step(key(KeyCode::Char('r'))).unwrap();
        assert!(frame(&mut runtime) > 0);

        runtime.step(key(KeyCode::Down)).unwrap();
        assert!(frame(&mut runtime) > 0);
    }

    #[test]
    fn resize_fans_out_inside_frame() {
        let config = RuntimeConfig {
            frame: FrameStyle::new(1, 2),
            ..RuntimeConfig::default()
        };
        let mut runtime = NavRuntime::with_config(color_menu(), Size::new(80, 24), config);
        runtime.step(key(KeyCode::Enter)).unwrap();
        runtime.resize(Size::new(100, 30)).unwrap();

        assert_eq!(runtime.terminal_size(), Size::new(100, 30));
        assert_eq!(runtime.content_size(), Size::new(96, 28));
        assert_eq!(runtime.stack().size(), Some(Size::new(96, 28)));

        runtime.step(key(KeyCode::Esc)).unwrap();
        let root = runtime.stack().current().unwrap();
        assert_eq!(root.screen().name(), "menu");
        let longest = root
            .screen()
            .render()
            .lines()
            .map(crate::display_width)
            .max()
            .unwrap_or(0);
        assert!(longest <= 96);
    }

    #[test]
    fn plugins_can_navigate_through_context() {
        struct JumpPlugin;

        impl NavPlugin for JumpPlugin {
            fn on_event(
                &mut self,
                ctx: &mut RuntimeContext<'_>,
                event: &ScreenEvent,
            ) -> Result<EventFlow> {
                match event {
                    ScreenEvent::Key(key) if key.code == KeyCode::Char('p') => {
                        ctx.push(NavigationItem::new(
                            "Palette",
                            ColorScreen::new("#ABCDEF", "jump"),
                        ));
                        Ok(EventFlow::Consumed)
                    }
                    ScreenEvent::Key(key) if key.code == KeyCode::Char('b') => {
                        assert!(ctx.stack().len() > 1);
                        ctx.pop();
                        Ok(EventFlow::Consumed)
                    }
                    _ => Ok(EventFlow::Continue),
                }
            }
        }

        let mut runtime = NavRuntime::new(color_menu(), Size::new(80, 24));
        runtime.register_plugin(JumpPlugin);
        runtime.step(key(KeyCode::Char('p'))).unwrap();
        assert_eq!(runtime.stack().titles(), vec!["Colors", "Palette"]);
        runtime.step(key(KeyCode::Char('b'))).unwrap();
        assert_eq!(runtime.stack().titles(), vec!["Colors"]);
    }

    #[test]
    fn quit_effect_stops_scripted_run() {
        struct QuitScreen;

        impl Screen for QuitScreen {
            fn handle(&mut self, event: &ScreenEvent) -> Option<Effect> {
                matches!(event, ScreenEvent::Key(_)).then_some(Effect::Quit)
            }

            fn render(&self) -> String {
                "bye".to_string()
            }
        }

        let mut runtime = NavRuntime::new(NavigationItem::new("quit", QuitScreen), Size::new(10, 2));
        let mut output = Vec::new();
        runtime
            .run_scripted(&mut output, [key(KeyCode::Char('q')), key(KeyCode::Char('z'))])
            .unwrap();
        assert!(runtime.should_exit());
        assert!(String::from_utf8(output).unwrap().contains("bye"));
    }

    #[test]
    fn runtime_logs_lifecycle_and_metrics() {
        let sink = MemorySink::new();
        let config = RuntimeConfig {
            logger: Some(Logger::new(sink.clone())),
            ..RuntimeConfig::default()
        };
        let mut runtime = NavRuntime::with_config(color_menu(), Size::new(80, 24), config);
        let metrics = runtime.config().metrics_handle().unwrap();

        let mut output = Vec::new();
        runtime
            .run_scripted(
                &mut output,
                [key(KeyCode::Enter), key(KeyCode::Esc), key(KeyCode::Esc)],
            )
            .unwrap();

        let messages = sink.messages();
        assert_eq!(&messages[..2], ["pushed", "resized"]);
        assert!(messages.contains(&"runtime_started".to_string()));
        assert!(messages.contains(&"pushed".to_string()));
        assert!(messages.contains(&"pop_ignored".to_string()));
        assert_eq!(messages.last().map(String::as_str), Some("runtime_stopped"));

        let snapshot = metrics.lock().unwrap().snapshot(Duration::ZERO);
        assert_eq!(snapshot.events, 3);
        assert_eq!(snapshot.pushes, 2);
        assert_eq!(snapshot.pops, 1);
        assert_eq!(snapshot.ignored_pops, 1);
        assert!(snapshot.renders >= 2);
    }
}
