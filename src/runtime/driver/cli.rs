use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use thiserror::Error;

use crate::runtime::NavRuntime;
use crate::{NavError, ScreenEvent, Size};

pub type DriverResult<T> = std::result::Result<T, CliDriverError>;

#[derive(Debug, Error)]
pub enum CliDriverError {
    #[error("navigation error: {0}")]
    Runtime(#[from] NavError),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Where the user ended up when a session closed.
pub struct SessionOutcome {
    /// Titles from root to top at exit.
    pub titles: Vec<String>,
    /// Whether the loop stopped because something asked it to.
    pub exit_requested: bool,
    pub runtime: NavRuntime,
}

impl SessionOutcome {
    fn from_runtime(runtime: NavRuntime) -> Self {
        Self {
            titles: runtime.stack().titles().into_iter().map(String::from).collect(),
            exit_requested: runtime.should_exit(),
            runtime,
        }
    }

    pub fn breadcrumb(&self, separator: &str) -> String {
        self.titles.join(separator)
    }
}

/// Switches the terminal into the alternate screen and hides the cursor.
/// Everything is restored when the guard is dropped, including on early
/// return through `?`.
struct TerminalGuard<'a, W: Write> {
    writer: &'a mut W,
    raw_mode: bool,
}

impl<'a, W: Write> TerminalGuard<'a, W> {
    fn enter(writer: &'a mut W, raw_mode: bool) -> DriverResult<Self> {
        if raw_mode {
            terminal::enable_raw_mode().map_err(|err| CliDriverError::Terminal(err.to_string()))?;
        }
        let mut guard = Self { writer, raw_mode };
        execute!(guard.writer, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(guard)
    }

    fn writer(&mut self) -> &mut W {
        &mut *self.writer
    }
}

impl<W: Write> Drop for TerminalGuard<'_, W> {
    fn drop(&mut self) {
        execute!(self.writer, Show, LeaveAlternateScreen).ok();
        if self.raw_mode {
            terminal::disable_raw_mode().ok();
        }
    }
}

/// Runs a [`NavRuntime`] as an interactive terminal session.
pub struct CliDriver {
    runtime: NavRuntime,
    raw_mode: bool,
}

impl CliDriver {
    pub fn new(runtime: NavRuntime) -> Self {
        Self {
            runtime,
            raw_mode: true,
        }
    }

    /// Leave the terminal in cooked mode. Used when output is not a tty.
    pub fn raw_mode(mut self, enabled: bool) -> Self {
        self.raw_mode = enabled;
        self
    }

    /// Run on stdout at the current terminal size until the runtime exits.
    pub fn run(mut self) -> DriverResult<SessionOutcome> {
        let mut stdout = io::stdout();
        {
            let mut guard = TerminalGuard::enter(&mut stdout, self.raw_mode)?;
            let (width, height) = terminal::size()?;
            self.runtime.resize(Size::new(width, height))?;
            self.runtime.run(guard.writer())?;
        }
        Ok(SessionOutcome::from_runtime(self.runtime))
    }

    /// Replay `events` on `writer` inside the same terminal setup that
    /// [`CliDriver::run`] uses.
    pub fn run_scripted<W, I>(
        mut self,
        writer: &mut W,
        size: Size,
        events: I,
    ) -> DriverResult<SessionOutcome>
    where
        W: Write,
        I: IntoIterator<Item = ScreenEvent>,
    {
        {
            let mut guard = TerminalGuard::enter(writer, self.raw_mode)?;
            self.runtime.resize(size)?;
            self.runtime.run_scripted(guard.writer(), events)?;
        }
        Ok(SessionOutcome::from_runtime(self.runtime))
    }
}
