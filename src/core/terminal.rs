/// Line-by-line console output for the plain front-end.
use crossterm::{
    style::{Color, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::{self, Stdout, Write};

use crate::core::game::DisplayEvent;
use crate::core::screen::Tone;

const PROMPT: &str = "Your guess: ";

pub struct TerminalContext<W: Write = Stdout> {
    out: W,
}

impl TerminalContext<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalContext<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    /// Print a colored line
    pub fn print_colored_line(&mut self, text: &str, color: TerminalColor) -> io::Result<()> {
        self.out.queue(SetForegroundColor(color.into()))?;
        writeln!(self.out, "{}", text)?;
        self.out.queue(ResetColor)?;
        Ok(())
    }

    /// Print text without newline
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// One display event, as the plain console shows it.
    pub fn print_event(&mut self, event: &DisplayEvent) -> io::Result<()> {
        match event {
            DisplayEvent::LogAppend(line) => self.print_colored_line(line, Tone::of(line).into())?,
            DisplayEvent::LogReset(header) => {
                self.print_line("")?;
                self.print_colored_line(header, TerminalColor::Cyan)?;
            }
            DisplayEvent::StatusChange(text) => {
                self.print_colored_line(&format!("[{text}]"), TerminalColor::Cyan)?
            }
            DisplayEvent::TurnChange(text) if !text.is_empty() => {
                self.print_colored_line(&format!("-> {text}"), TerminalColor::Blue)?
            }
            DisplayEvent::AttemptsRemainingChange(n) => self.print_line(&format!("Attempts left: {n}"))?,
            // only sent while the player is to move, so ask again
            DisplayEvent::ValidationMessage(text) => {
                self.print_colored_line(text, TerminalColor::Red)?;
                self.print(PROMPT)?;
            }
            DisplayEvent::FocusRequested => self.print(PROMPT)?,
            DisplayEvent::TurnChange(_)
            | DisplayEvent::InputEnabledChange(_)
            | DisplayEvent::InputCleared => {}
        }
        self.flush()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalColor {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    White,
    Default,
}

impl From<TerminalColor> for Color {
    fn from(color: TerminalColor) -> Self {
        match color {
            TerminalColor::Red => Color::Red,
            TerminalColor::Green => Color::Green,
            TerminalColor::Blue => Color::Blue,
            TerminalColor::Yellow => Color::Yellow,
            TerminalColor::Cyan => Color::Cyan,
            TerminalColor::White => Color::White,
            TerminalColor::Default => Color::Reset,
        }
    }
}

impl From<Tone> for TerminalColor {
    fn from(tone: Tone) -> Self {
        match tone {
            Tone::Plain => TerminalColor::Default,
            Tone::Header => TerminalColor::White,
            Tone::Hint => TerminalColor::Yellow,
            Tone::Win => TerminalColor::Green,
            Tone::Loss => TerminalColor::Red,
        }
    }
}
