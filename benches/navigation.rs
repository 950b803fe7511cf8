use std::io;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use room_nav::logging::{LogEvent, LogSink};
use room_nav::screens::ColorScreen;
use room_nav::{
    Choice, LifecycleLoggerPlugin, Logger, LoggingResult, MenuScreen, NavRuntime, NavigationItem,
    NavigationStack, RuntimeConfig, ScreenEvent, Size,
};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

fn key(code: KeyCode) -> ScreenEvent {
    ScreenEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn palette(count: usize) -> Vec<Choice> {
    (0..count)
        .map(|idx| {
            let shade = (idx * 37 % 256) as u8;
            let rgb = format!("#{shade:02X}{:02X}{:02X}", 255 - shade, shade / 2);
            Choice::new(
                format!("Shade {idx}"),
                format!("Generated color {rgb}"),
                ColorScreen::new(rgb, "sample text"),
            )
        })
        .collect()
}

fn root(count: usize) -> NavigationItem {
    NavigationItem::new("Shades", MenuScreen::new("Shades", palette(count), None))
}

/// Walk down the menu, open every third entry, then back out again.
fn browse_script() -> Vec<ScreenEvent> {
    let mut events = Vec::new();
    for step in 0..60 {
        events.push(key(KeyCode::Down));
        if step % 3 == 0 {
            events.push(key(KeyCode::Enter));
            events.push(key(KeyCode::Esc));
        }
    }
    events.push(key(KeyCode::PageDown));
    events.push(key(KeyCode::Home));
    events.push(ScreenEvent::Resize(Size::new(90, 25)));
    events
}

fn stack_push_pop(c: &mut Criterion) {
    c.bench_function("stack_push_pop", |b| {
        b.iter(|| {
            let mut stack = NavigationStack::with_root(root(8));
            for depth in 0..32 {
                stack.push(NavigationItem::new(
                    format!("level {depth}"),
                    ColorScreen::new("#336699", "deep"),
                ));
            }
            while stack.pop() {}
            black_box(stack.len())
        });
    });
}

fn stack_dispatch(c: &mut Criterion) {
    c.bench_function("stack_dispatch_menu", |b| {
        b.iter(|| {
            let mut stack = NavigationStack::with_root(root(200));
            for event in browse_script() {
                let _ = stack.dispatch(black_box(&event));
            }
            black_box(stack.render().map(|view| view.len()))
        });
    });
}

fn runtime_scripted(c: &mut Criterion) {
    c.bench_function("runtime_browse_script", |b| {
        b.iter(|| {
            let config = RuntimeConfig {
                logger: Some(Logger::new(NullSink)),
                ..RuntimeConfig::default()
            };
            let mut runtime = NavRuntime::with_config(root(200), Size::new(120, 40), config);
            runtime.register_plugin(LifecycleLoggerPlugin::new(Logger::new(NullSink)));
            let mut sink = io::sink();
            runtime
                .run_scripted(&mut sink, black_box(browse_script()))
                .expect("scripted run");
        });
    });
}

criterion_group!(benches, stack_push_pop, stack_dispatch, runtime_scripted);
criterion_main!(benches);
