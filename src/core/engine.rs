use crate::core::game::{DisplayEvent, Game};
use crate::core::renderer::ScreenRenderer;
use crate::core::screen::Screen;
use crate::core::terminal::TerminalContext;
use crate::games::GameInfo;
use anyhow::{Context as _, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A line typed into the plain console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlainCommand<'a> {
    NewGame,
    Quit,
    Guess(&'a str),
}

impl<'a> PlainCommand<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            "/new" => PlainCommand::NewGame,
            "/quit" | "/exit" => PlainCommand::Quit,
            _ => PlainCommand::Guess(line),
        }
    }
}

/// Owns the game and everything it talks to. Runs on a single task.
pub struct Engine<G: Game> {
    game: G,
    screen: Screen,
    display_rx: mpsc::UnboundedReceiver<DisplayEvent>,
    wakeups: mpsc::UnboundedReceiver<G::Wakeup>,
}

impl<G: Game> Engine<G> {
    pub fn new(
        game: G,
        display_rx: mpsc::UnboundedReceiver<DisplayEvent>,
        wakeups: mpsc::UnboundedReceiver<G::Wakeup>,
    ) -> Self {
        Self {
            game,
            screen: Screen::new(),
            display_rx,
            wakeups,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn start(&mut self) {
        self.game.start_new_game();
        self.drain_display();
    }

    /// Fold every pending display event into the screen.
    pub fn drain_display(&mut self) {
        while let Ok(event) = self.display_rx.try_recv() {
            self.screen.apply(event);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if ctrl => return Flow::Quit,
            KeyCode::Char('n') if ctrl => self.game.start_new_game(),
            KeyCode::F(2) => self.game.start_new_game(),
            KeyCode::Enter => {
                if self.screen.input_enabled {
                    let raw = self.screen.input.clone();
                    self.game.submit(&raw);
                }
            }
            KeyCode::Backspace => self.screen.backspace(),
            KeyCode::Char(c) if !ctrl => {
                self.screen.type_char(c);
            }
            _ => {}
        }
        self.drain_display();
        Flow::Continue
    }

    /// Wait for the next scheduled wakeup and hand it to the game.
    pub async fn process_next_wakeup(&mut self) -> bool {
        match self.wakeups.recv().await {
            Some(wakeup) => {
                self.game.on_wakeup(wakeup);
                self.drain_display();
                true
            }
            None => false,
        }
    }

    /// Full-screen loop. Returns when the player quits.
    pub async fn run(mut self, mut terminal: DefaultTerminal, renderer: &ScreenRenderer) -> Result<()> {
        info!("engine running (tui)");
        self.start();

        loop {
            self.drain_display();
            terminal.draw(|f| renderer.render(f, &self.screen))?;

            // INPUT (Non-blocking)
            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) == Flow::Quit {
                        break;
                    }
                }
            }

            // Wake regularly so keys keep getting polled while no timer is due.
            let frame = tokio::time::sleep(Duration::from_millis(16));

            tokio::select! {
                Some(wakeup) = self.wakeups.recv() => {
                    debug!("computer turn due");
                    self.game.on_wakeup(wakeup);
                }
                _ = frame => {}
            }
        }

        info!("engine stopped");
        Ok(())
    }

    /// Line-oriented loop over stdin/stdout.
    pub async fn run_plain(self, info: &GameInfo) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.run_lines(info, stdin, io::stdout()).await?;
        Ok(())
    }

    /// Plays from `input` line by line, echoing display events to `out`.
    /// Stops on `/quit` or end of input and hands `out` back.
    pub async fn run_lines<R, W>(mut self, info: &GameInfo, input: R, out: W) -> Result<W>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        info!("engine running (plain)");
        let mut term = TerminalContext::new(out);
        let mut lines = input.lines();

        term.print_line(&format!("{} - {}", info.name, info.description))?;
        term.print_line("Type a number and press Enter. /new starts over, /quit leaves.")?;
        self.game.start_new_game();

        loop {
            self.echo_display(&mut term)?;

            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read input")? else {
                        break;
                    };
                    match PlainCommand::parse(&line) {
                        PlainCommand::Quit => break,
                        PlainCommand::NewGame => self.game.start_new_game(),
                        PlainCommand::Guess(raw) => self.game.submit(raw),
                    }
                }
                Some(wakeup) = self.wakeups.recv() => {
                    term.print_line("")?;
                    self.game.on_wakeup(wakeup);
                }
            }
        }

        self.echo_display(&mut term)?;
        term.print_line("")?;
        info!("engine stopped");
        Ok(term.into_inner())
    }

    fn echo_display<W: Write>(&mut self, term: &mut TerminalContext<W>) -> Result<()> {
        while let Ok(event) = self.display_rx.try_recv() {
            term.print_event(&event)?;
            self.screen.apply(event);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_commands() {
        assert_eq!(PlainCommand::parse(" /new "), PlainCommand::NewGame);
        assert_eq!(PlainCommand::parse("/quit"), PlainCommand::Quit);
        assert_eq!(PlainCommand::parse("/exit"), PlainCommand::Quit);
        assert_eq!(PlainCommand::parse(" 42"), PlainCommand::Guess(" 42"));
        assert_eq!(PlainCommand::parse("/help"), PlainCommand::Guess("/help"));
    }
}
