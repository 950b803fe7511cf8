use crate::geometry::Size;
use crate::keymap::{KeyAction, KeyMap};
use crate::screen::{Effect, Screen, ScreenEvent};
use crate::style;
use crate::width::truncate_to_width;

const SWATCH: &str = "████";
const HINT: &str = "enter choose · esc back";

/// Emitted when the user confirms a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSelected {
    pub rgb: String,
}

/// Shows a sample line painted in one color.
#[derive(Debug, Clone)]
pub struct ColorScreen {
    rgb: String,
    sample: String,
    size: Size,
    keymap: KeyMap,
}

impl ColorScreen {
    pub fn new(rgb: impl Into<String>, sample: impl Into<String>) -> Self {
        Self {
            rgb: rgb.into(),
            sample: sample.into(),
            size: Size::new(80, 24),
            keymap: KeyMap::default(),
        }
    }

    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn rgb(&self) -> &str {
        &self.rgb
    }

    pub fn sample(&self) -> &str {
        &self.sample
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn paint(&self, text: &str) -> String {
        match style::parse_hex(&self.rgb) {
            Some(color) => style::colored(text, color),
            None => text.to_string(),
        }
    }
}

impl Screen for ColorScreen {
    fn name(&self) -> &str {
        "color"
    }

    fn handle(&mut self, event: &ScreenEvent) -> Option<Effect> {
        match event {
            ScreenEvent::Resize(size) => {
                self.resize(*size);
                None
            }
            ScreenEvent::Key(key) => match self.keymap.action(key) {
                Some(KeyAction::Confirm) => Some(Effect::message(ColorSelected {
                    rgb: self.rgb.clone(),
                })),
                Some(KeyAction::Cancel) => Some(Effect::Pop),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&self) -> String {
        let text_width = usize::from(self.size.width).saturating_sub(2);
        let sample = truncate_to_width(&self.sample, text_width);
        [
            String::new(),
            format!("  {}  {}", self.paint(SWATCH), self.rgb),
            String::new(),
            format!("  {}", self.paint(&sample)),
            String::new(),
            format!("  {}", style::dimmed(HINT)),
        ]
        .join("\n")
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }
}
