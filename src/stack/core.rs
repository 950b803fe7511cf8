use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::error::{NavError, Result};
use crate::geometry::Size;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::NavigationMetrics;
use crate::screen::{Effect, Screen, ScreenEvent};

/// Init effect waiting to be resolved, tagged with the depth of the item
/// that produced it.
struct PendingEffect {
    owner_depth: usize,
    effect: Effect,
}

pub const STACK_LOG_TARGET: &str = "room_nav::stack";

/// A screen paired with the title shown for it in breadcrumbs.
pub struct NavigationItem {
    title: String,
    screen: Box<dyn Screen>,
}

impl NavigationItem {
    pub fn new(title: impl Into<String>, screen: impl Screen + 'static) -> Self {
        Self::from_boxed(title, Box::new(screen))
    }

    pub fn from_boxed(title: impl Into<String>, screen: Box<dyn Screen>) -> Self {
        Self {
            title: title.into(),
            screen,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn screen(&self) -> &dyn Screen {
        self.screen.as_ref()
    }

    pub fn screen_mut(&mut self) -> &mut dyn Screen {
        self.screen.as_mut()
    }
}

impl fmt::Debug for NavigationItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationItem")
            .field("title", &self.title)
            .field("screen", &self.screen.name())
            .finish()
    }
}

/// Ordered stack of [`NavigationItem`]s with back-stack semantics.
///
/// A stack is itself a [`Screen`], so it can be pushed onto another stack.
/// See [`NavigationStack::nested`].
#[derive(Default)]
pub struct NavigationStack {
    items: Vec<NavigationItem>,
    pending: VecDeque<PendingEffect>,
    size: Option<Size>,
    bubble_root_pop: bool,
    logger: Option<Logger>,
    metrics: Option<Arc<Mutex<NavigationMetrics>>>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: NavigationItem) -> Self {
        let mut stack = Self::new();
        stack.push(root);
        stack
    }

    /// Stack meant to live inside another stack. A pop requested while only
    /// its root remains is handed back to the parent instead of ignored.
    pub fn nested(root: NavigationItem) -> Self {
        let mut stack = Self::new();
        stack.bubble_root_pop = true;
        stack.push(root);
        stack
    }

    pub fn set_logger(&mut self, logger: Option<Logger>) {
        self.logger = logger;
    }

    pub fn set_metrics(&mut self, metrics: Option<Arc<Mutex<NavigationMetrics>>>) {
        self.metrics = metrics;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Last size handed to [`NavigationStack::resize`].
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn items(&self) -> impl Iterator<Item = &NavigationItem> {
        self.items.iter()
    }

    /// Titles from root to top.
    pub fn titles(&self) -> Vec<&str> {
        self.items.iter().map(NavigationItem::title).collect()
    }

    pub fn breadcrumb(&self, separator: &str) -> String {
        self.titles().join(separator)
    }

    /// Append `item` as the new top. Its init effect is queued and resolved
    /// before the next event reaches it.
    pub fn push(&mut self, mut item: NavigationItem) {
        let init = item.screen.init();
        let title = item.title.clone();
        self.items.push(item);
        let depth = self.items.len();
        if let Some(effect) = init {
            self.pending.push_back(PendingEffect {
                owner_depth: depth,
                effect,
            });
        }

        self.with_metrics(|metrics| metrics.record_push(depth));
        self.log(
            LogLevel::Debug,
            "pushed",
            [json_str("title", title), json_kv("depth", json!(depth))],
        );
    }

    /// Remove the top item. The root is never removed; returns whether an
    /// item was dropped. Init effects the dropped item left unresolved are
    /// discarded with it.
    pub fn pop(&mut self) -> bool {
        if self.items.len() <= 1 {
            self.with_metrics(NavigationMetrics::record_ignored_pop);
            self.log(
                LogLevel::Debug,
                "pop_ignored",
                [json_kv("depth", json!(self.items.len()))],
            );
            return false;
        }

        let popped = self.items.pop();
        let depth = self.items.len();
        self.pending.retain(|pending| pending.owner_depth <= depth);
        self.with_metrics(NavigationMetrics::record_pop);
        if let Some(item) = popped {
            self.log(
                LogLevel::Debug,
                "popped",
                [
                    json_str("title", item.title),
                    json_kv("depth", json!(self.items.len())),
                ],
            );
        }
        true
    }

    pub fn current(&self) -> Result<&NavigationItem> {
        self.items
            .last()
            .ok_or(NavError::InvalidState("navigation stack has no root item"))
    }

    pub fn current_mut(&mut self) -> Result<&mut NavigationItem> {
        self.items
            .last_mut()
            .ok_or(NavError::InvalidState("navigation stack has no root item"))
    }

    /// Forward new dimensions to every item, dormant ones included.
    pub fn resize(&mut self, size: Size) {
        self.size = Some(size);
        for item in &mut self.items {
            item.screen.resize(size);
        }
        self.with_metrics(NavigationMetrics::record_resize);
        self.log(
            LogLevel::Debug,
            "resized",
            [
                json_kv("width", json!(size.width)),
                json_kv("height", json!(size.height)),
                json_kv("items", json!(self.items.len())),
            ],
        );
    }

    /// Deliver `event` to the top screen and resolve the navigation effects it
    /// produces. Whatever is left (messages, quit) is handed back.
    pub fn dispatch(&mut self, event: &ScreenEvent) -> Result<Option<Effect>> {
        if self.items.is_empty() {
            return Err(NavError::InvalidState(
                "cannot dispatch to an empty navigation stack",
            ));
        }

        let mut leftovers = Vec::new();
        self.drain_pending(&mut leftovers);
        self.with_metrics(NavigationMetrics::record_event);

        if let ScreenEvent::Resize(size) = event {
            self.resize(*size);
        } else {
            let effect = self.current_mut()?.screen.handle(event);
            if let Some(effect) = effect {
                self.resolve(effect, &mut leftovers);
            }
        }

        self.drain_pending(&mut leftovers);
        Ok(Effect::batch(leftovers))
    }

    /// Resolve an effect produced outside of [`NavigationStack::dispatch`].
    pub fn apply(&mut self, effect: Effect) -> Option<Effect> {
        let mut leftovers = Vec::new();
        self.resolve(effect, &mut leftovers);
        self.drain_pending(&mut leftovers);
        Effect::batch(leftovers)
    }

    /// Resolve queued init effects without delivering an event.
    pub fn flush_pending(&mut self) -> Option<Effect> {
        let mut leftovers = Vec::new();
        self.drain_pending(&mut leftovers);
        Effect::batch(leftovers)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn render(&self) -> Result<String> {
        Ok(self.current()?.screen.render())
    }

    fn resolve(&mut self, effect: Effect, leftovers: &mut Vec<Effect>) {
        match effect {
            Effect::Push(item) => self.push(item),
            Effect::Pop if self.bubble_root_pop && self.items.len() == 1 => {
                self.log(LogLevel::Debug, "pop_bubbled", [json_kv("depth", json!(1))]);
                leftovers.push(Effect::Pop);
            }
            Effect::Pop => {
                self.pop();
            }
            Effect::Batch(effects) => {
                for effect in effects {
                    self.resolve(effect, leftovers);
                }
            }
            other => leftovers.push(other),
        }
    }

    fn drain_pending(&mut self, leftovers: &mut Vec<Effect>) {
        while let Some(PendingEffect { effect, .. }) = self.pending.pop_front() {
            self.resolve(effect, leftovers);
        }
    }

    fn with_metrics(&self, record: impl FnOnce(&mut NavigationMetrics)) {
        if let Some(metrics) = self.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(level, STACK_LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

impl Screen for NavigationStack {
    fn name(&self) -> &str {
        "nested_stack"
    }

    fn init(&mut self) -> Option<Effect> {
        self.flush_pending()
    }

    /// Input goes to the inner top. Effects the inner stack cannot resolve
    /// itself are returned to the parent.
    fn handle(&mut self, event: &ScreenEvent) -> Option<Effect> {
        self.dispatch(event).ok().flatten()
    }

    fn render(&self) -> String {
        NavigationStack::render(self).unwrap_or_default()
    }

    fn resize(&mut self, size: Size) {
        NavigationStack::resize(self, size);
    }
}

impl fmt::Debug for NavigationStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationStack")
            .field("items", &self.items)
            .field("pending", &self.pending.len())
            .field("size", &self.size)
            .field("nested", &self.bubble_root_pop)
            .finish()
    }
}
