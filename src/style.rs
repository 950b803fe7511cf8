//! Pure styling helpers. Nothing here holds state; every function maps text
//! to decorated text so navigation logic stays testable without chrome.

use crossterm::style::{Color, Stylize};

const TITLE_FG: Color = Color::AnsiValue(230);
const TITLE_BG: Color = Color::AnsiValue(62);
const ACCENT: Color = Color::Rgb {
    r: 0xEE,
    g: 0x6F,
    b: 0xF8,
};
const ACCENT_DIM: Color = Color::Rgb {
    r: 0xAD,
    g: 0x58,
    b: 0xB4,
};
const NORMAL: Color = Color::Rgb {
    r: 0xDD,
    g: 0xDD,
    b: 0xDD,
};
const DIMMED: Color = Color::Rgb {
    r: 0x77,
    g: 0x77,
    b: 0x77,
};

pub const SELECTED_MARKER: &str = "│";
pub const PAGE_ACTIVE: &str = "•";
pub const PAGE_INACTIVE: &str = "○";

/// List title: light text on a colored band padded by one cell.
pub fn title_style(text: &str) -> String {
    format!(" {text} ").with(TITLE_FG).on(TITLE_BG).to_string()
}

pub fn selected_title(text: &str) -> String {
    format!(
        "{} {}",
        SELECTED_MARKER.with(ACCENT),
        text.with(ACCENT).bold()
    )
}

pub fn selected_description(text: &str) -> String {
    format!("{} {}", SELECTED_MARKER.with(ACCENT), text.with(ACCENT_DIM))
}

pub fn normal_title(text: &str) -> String {
    format!("  {}", text.with(NORMAL))
}

pub fn normal_description(text: &str) -> String {
    format!("  {}", text.with(DIMMED))
}

pub fn dimmed(text: &str) -> String {
    text.with(DIMMED).to_string()
}

pub fn colored(text: &str, color: Color) -> String {
    text.with(color).to_string()
}

/// Parse `#RRGGBB` (leading `#` optional) into a terminal color.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Margins placed around the stack's rendered text by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStyle {
    pub margin_top: u16,
    pub margin_bottom: u16,
    pub margin_left: u16,
    pub margin_right: u16,
}

impl FrameStyle {
    pub const fn new(vertical: u16, horizontal: u16) -> Self {
        Self {
            margin_top: vertical,
            margin_bottom: vertical,
            margin_left: horizontal,
            margin_right: horizontal,
        }
    }

    /// Horizontal and vertical cells consumed by the frame.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            self.margin_left.saturating_add(self.margin_right),
            self.margin_top.saturating_add(self.margin_bottom),
        )
    }

    pub fn render(&self, body: &str) -> String {
        let indent = " ".repeat(self.margin_left as usize);
        let mut lines: Vec<String> = Vec::new();
        lines.extend(std::iter::repeat(String::new()).take(self.margin_top as usize));
        for line in body.split('\n') {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{indent}{line}"));
            }
        }
        lines.extend(std::iter::repeat(String::new()).take(self.margin_bottom as usize));
        lines.join("\n")
    }
}
