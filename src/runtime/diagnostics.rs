use serde_json::json;

use crate::Result;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::screen::ScreenEvent;

use super::{EventFlow, NavPlugin, RuntimeContext};

pub const LIFECYCLE_LOG_TARGET: &str = "room_nav::runtime.lifecycle";

/// Logs incoming events together with the stack they are about to reach.
pub struct LifecycleLoggerPlugin {
    logger: Logger,
    level: LogLevel,
    log_keys: bool,
    log_paste: bool,
    log_ticks: bool,
    log_messages: bool,
}

impl LifecycleLoggerPlugin {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            level: LogLevel::Debug,
            log_keys: true,
            log_paste: true,
            log_ticks: false,
            log_messages: true,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn log_keys(mut self, enabled: bool) -> Self {
        self.log_keys = enabled;
        self
    }

    pub fn log_paste(mut self, enabled: bool) -> Self {
        self.log_paste = enabled;
        self
    }

    pub fn log_ticks(mut self, enabled: bool) -> Self {
        self.log_ticks = enabled;
        self
    }

    pub fn log_messages(mut self, enabled: bool) -> Self {
        self.log_messages = enabled;
        self
    }

    fn emit(&self, message: &str, fields: impl IntoIterator<Item = (String, serde_json::Value)>) {
        let event = event_with_fields(self.level, LIFECYCLE_LOG_TARGET, message, fields);
        let _ = self.logger.log_event(event);
    }
}

impl NavPlugin for LifecycleLoggerPlugin {
    fn name(&self) -> &str {
        "diagnostics.lifecycle_logger"
    }

    fn init(&mut self, ctx: &mut RuntimeContext<'_>) -> Result<()> {
        self.emit(
            "plugin_initialized",
            [
                json_kv("logger_level", json!(format!("{:?}", self.level))),
                json_str("root", ctx.stack().breadcrumb(" > ")),
            ],
        );
        Ok(())
    }

    fn on_event(
        &mut self,
        ctx: &mut RuntimeContext<'_>,
        event: &ScreenEvent,
    ) -> Result<EventFlow> {
        let depth = json_kv("depth", json!(ctx.stack().len()));
        match event {
            ScreenEvent::Key(key) if self.log_keys => {
                self.emit(
                    "event.key",
                    [
                        json_kv("code", json!(format!("{:?}", key.code))),
                        json_kv("modifiers", json!(format!("{:?}", key.modifiers))),
                        json_kv("kind", json!(format!("{:?}", key.kind))),
                        depth,
                    ],
                );
            }
            ScreenEvent::Paste(data) if self.log_paste => {
                self.emit(
                    "event.paste",
                    [json_kv("chars", json!(data.chars().count())), depth],
                );
            }
            ScreenEvent::Tick { elapsed } if self.log_ticks => {
                self.emit(
                    "event.tick",
                    [json_kv("elapsed_ms", json!(elapsed.as_millis())), depth],
                );
            }
            ScreenEvent::Message(message) if self.log_messages => {
                self.emit(
                    "event.message",
                    [json_str("type", message.type_name()), depth],
                );
            }
            ScreenEvent::Resize(size) => {
                self.emit(
                    "event.resize",
                    [
                        json_kv("width", json!(size.width)),
                        json_kv("height", json!(size.height)),
                        depth,
                    ],
                );
            }
            _ => {}
        }

        Ok(EventFlow::Continue)
    }
}
