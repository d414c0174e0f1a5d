//! Terminal display and input handling

use crate::compositor::TextGrid;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        self, BeginSynchronizedUpdate, DisableLineWrap, EnableLineWrap, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::time::Duration;

/// Character-cell display the frame driver renders into
pub trait Surface {
    /// Current size as `(cols, rows)`
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Replace the visible contents with `grid`
    fn present(&mut self, grid: &TextGrid) -> io::Result<()>;

    /// Next pending key press, without blocking
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Crossterm-backed terminal in raw mode on the alternate screen.
///
/// Dropping it restores the terminal, including after a failed setup.
pub struct TerminalDisplay<W: Write = Stdout> {
    buffer: BufWriter<W>,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        Self::with_writer(stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// Take over the terminal, writing control sequences to `out`
    pub fn with_writer(out: W) -> io::Result<Self> {
        // Exists before the first step so any early return runs `Drop`
        let mut display = Self {
            buffer: BufWriter::new(out),
        };
        execute!(display.buffer, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(
            display.buffer,
            Hide,
            DisableLineWrap,
            terminal::Clear(terminal::ClearType::All)
        )?;
        Ok(display)
    }
}

impl<W: Write> Surface for TerminalDisplay<W> {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Every row gets explicit cursor positioning so a short or long line
    /// cannot shift the ones below it
    fn present(&mut self, grid: &TextGrid) -> io::Result<()> {
        queue!(self.buffer, BeginSynchronizedUpdate)?;
        for (i, line) in grid.lines().enumerate() {
            queue!(self.buffer, MoveTo(0, i as u16), Print(line))?;
        }
        queue!(self.buffer, EndSynchronizedUpdate)?;
        self.buffer.flush()
    }

    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Release {
                    return Ok(Some(key_event));
                }
            }
        }
        Ok(None)
    }
}

impl<W: Write> Drop for TerminalDisplay<W> {
    fn drop(&mut self) {
        // Does nothing if raw mode was never enabled
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.buffer, Show, EnableLineWrap, LeaveAlternateScreen);
    }
}

/// Key actions for the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    Pause,
}

/// Parse keyboard input into actions
pub fn parse_key_event(event: KeyEvent) -> Action {
    match event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char(' ') => Action::Pause,
        _ => Action::None,
    }
}
