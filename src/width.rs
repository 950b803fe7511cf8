//! Terminal display width helpers.
//!
//! Width math ignores ANSI escapes so styled lines and plain lines pad the
//! same way. Truncation works on plain text only; style after truncating.

use unicode_width::UnicodeWidthChar;

const ELLIPSIS: char = '…';
const RESET: &str = "\x1b[0m";

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

/// Cut plain `text` so it fits in `width` cells, ending with an ellipsis when
/// anything was dropped.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

/// Clip a possibly styled `line` to `width` cells. Escape sequences are kept
/// intact and do not count towards the width. A clipped styled line always
/// ends with a reset so color never bleeds into the next row.
pub fn clip_styled(line: &str, width: usize) -> String {
    if display_width(line) <= width {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len());
    let mut used = 0;
    let mut styled = false;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            styled = true;
            out.push(ch);
            if chars.peek() == Some(&'[') {
                out.extend(chars.next());
                // CSI parameters run until a final byte in '@'..='~'.
                for next in chars.by_ref() {
                    out.push(next);
                    if ('@'..='~').contains(&next) {
                        break;
                    }
                }
            }
            continue;
        }

        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }

    if styled {
        out.push_str(RESET);
    }
    out
}
