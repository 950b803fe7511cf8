use std::io::Write;

use blake3::Hash;

use crate::cursor;
use crate::error::Result;
use crate::geometry::Size;
use crate::width::clip_styled;

/// Renderer runtime parameters.
#[derive(Debug, Clone)]
pub struct RendererSettings {
    pub restore_cursor: Option<(u16, u16)>,
    /// Skip writing a frame identical to the previous one.
    pub skip_unchanged: bool,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            restore_cursor: None,
            skip_unchanged: true,
        }
    }
}

/// Full-frame ANSI renderer. Every written frame repaints all rows of the
/// terminal; unchanged frames are detected by hash and skipped.
pub struct AnsiRenderer {
    settings: RendererSettings,
    last_frame: Option<(Hash, Size)>,
}

impl AnsiRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self {
            settings,
            last_frame: None,
        }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut RendererSettings {
        &mut self.settings
    }

    /// Forget the previous frame so the next one is written unconditionally.
    pub fn invalidate(&mut self) {
        self.last_frame = None;
    }

    /// Write `frame` clipped to `size`. Returns whether anything was written.
    pub fn render(&mut self, writer: &mut impl Write, frame: &str, size: Size) -> Result<bool> {
        if size.is_empty() {
            return Ok(false);
        }

        let hash = blake3::hash(frame.as_bytes());
        if self.settings.skip_unchanged && self.last_frame == Some((hash, size)) {
            return Ok(false);
        }

        let mut lines = frame.split('\n');
        for row in 0..size.height {
            let line = lines.next().unwrap_or("");
            write!(writer, "{}", cursor::move_to(row + 1, 1))?;
            write!(writer, "{}", clip_styled(line, usize::from(size.width)))?;
            write!(writer, "{}", cursor::clear_to_line_end())?;
        }

        if let Some((row, col)) = self.settings.restore_cursor {
            write!(writer, "{}", cursor::move_to(row + 1, col + 1))?;
        }

        writer.flush()?;
        self.last_frame = Some((hash, size));
        Ok(true)
    }
}
