use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters describing how the navigation stack has been exercised.
#[derive(Debug, Default, Clone)]
pub struct NavigationMetrics {
    events: u64,
    renders: u64,
    pushes: u64,
    pops: u64,
    ignored_pops: u64,
    resizes: u64,
    max_depth: usize,
}

impl NavigationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_event(&mut self) {
        self.events = self.events.saturating_add(1);
    }

    pub fn record_render(&mut self) {
        self.renders = self.renders.saturating_add(1);
    }

    pub fn record_push(&mut self, depth: usize) {
        self.pushes = self.pushes.saturating_add(1);
        self.max_depth = self.max_depth.max(depth);
    }

    pub fn record_pop(&mut self) {
        self.pops = self.pops.saturating_add(1);
    }

    pub fn record_ignored_pop(&mut self) {
        self.ignored_pops = self.ignored_pops.saturating_add(1);
    }

    pub fn record_resize(&mut self) {
        self.resizes = self.resizes.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: u64::try_from(uptime.as_millis()).unwrap_or(u64::MAX),
            events: self.events,
            renders: self.renders,
            pushes: self.pushes,
            pops: self.pops,
            ignored_pops: self.ignored_pops,
            resizes: self.resizes,
            max_depth: u64::try_from(self.max_depth).unwrap_or(u64::MAX),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub events: u64,
    pub renders: u64,
    pub pushes: u64,
    pub pops: u64,
    pub ignored_pops: u64,
    pub resizes: u64,
    pub max_depth: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "navigation_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("events".to_string(), json!(self.events));
        map.insert("renders".to_string(), json!(self.renders));
        map.insert("pushes".to_string(), json!(self.pushes));
        map.insert("pops".to_string(), json!(self.pops));
        map.insert("ignored_pops".to_string(), json!(self.ignored_pops));
        map.insert("resizes".to_string(), json!(self.resizes));
        map.insert("max_depth".to_string(), json!(self.max_depth));
        map
    }
}
