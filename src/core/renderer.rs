/// Full-screen drawing of a [`Screen`] with ratatui.
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::core::screen::{Screen, Tone};
use crate::games::GameInfo;

pub struct ScreenRenderer {
    info: GameInfo,
    min: i32,
    max: i32,
}

impl ScreenRenderer {
    pub fn new(info: GameInfo, min: i32, max: i32) -> Self {
        Self { info, min, max }
    }

    pub fn render(&self, f: &mut Frame, screen: &Screen) {
        let notices = u16::try_from(screen.notices.len()).unwrap_or(u16::MAX);
        let status_height = notices.saturating_add(3);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(status_height),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        f.render_widget(
            Paragraph::new(format!(" {} ", self.info.name.to_uppercase()))
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            chunks[0],
        );

        self.render_bar(f, screen, chunks[1]);
        self.render_status(f, screen, chunks[2]);
        self.render_log(f, screen, chunks[3]);
        self.render_input(f, screen, chunks[4]);

        f.render_widget(
            Paragraph::new("[Enter] Guess  [Ctrl+N/F2] New Game  [Esc] Quit")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            chunks[5],
        );
    }

    fn render_bar(&self, f: &mut Frame, screen: &Screen, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let attempts = match screen.attempts_left {
            Some(n) => format!("Attempts left: {n}"),
            None => String::new(),
        };
        f.render_widget(
            Paragraph::new(attempts).block(Block::default().borders(Borders::ALL)),
            halves[0],
        );

        let turn_style = if screen.input_enabled {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Yellow)
        };
        f.render_widget(
            Paragraph::new(screen.turn.as_str())
                .style(turn_style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            halves[1],
        );
    }

    fn render_status(&self, f: &mut Frame, screen: &Screen, area: Rect) {
        let mut items = vec![ListItem::new(screen.status.as_str())];
        items.extend(
            screen
                .notices
                .iter()
                .map(|n| ListItem::new(n.as_str()).style(Style::default().fg(Color::Red))),
        );
        f.render_widget(
            List::new(items).block(Block::default().title(" STATUS ").borders(Borders::ALL)),
            area,
        );
    }

    fn render_log(&self, f: &mut Frame, screen: &Screen, area: Rect) {
        // keep the newest lines in view
        let visible = area.height.saturating_sub(2) as usize;
        let skip = screen.log.len().saturating_sub(visible);

        let items: Vec<ListItem> = screen
            .log
            .iter()
            .skip(skip)
            .map(|line| ListItem::new(line.as_str()).style(tone_style(Tone::of(line))))
            .collect();

        f.render_widget(
            List::new(items).block(Block::default().title(" GAME LOG ").borders(Borders::ALL)),
            area,
        );
    }

    fn render_input(&self, f: &mut Frame, screen: &Screen, area: Rect) {
        let title = format!(" YOUR GUESS ({}-{}) ", self.min, self.max);
        let (text, style) = if screen.input_enabled {
            (screen.input.as_str(), Style::default())
        } else {
            ("", Style::default().fg(Color::DarkGray))
        };

        f.render_widget(
            Paragraph::new(text)
                .style(style)
                .block(Block::default().title(title).borders(Borders::ALL)),
            area,
        );

        if screen.accepts_input() {
            let x = area.x + 1 + screen.input.chars().count() as u16;
            f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }
}

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Plain => Style::default(),
        Tone::Header => Style::default().add_modifier(Modifier::BOLD),
        Tone::Hint => Style::default().fg(Color::Yellow),
        Tone::Win => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Tone::Loss => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::core::game::DisplayEvent;
    use crate::games::rand_num::INFO;

    fn draw(screen: &Screen) -> String {
        let renderer = ScreenRenderer::new(INFO, 1, 100);
        let mut terminal = Terminal::new(TestBackend::new(70, 30)).unwrap();
        terminal.draw(|f| renderer.render(f, screen)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn draws_bar_log_and_input() {
        let mut screen = Screen::new();
        for event in [
            DisplayEvent::TurnChange("Player's Turn".into()),
            DisplayEvent::AttemptsRemainingChange(12),
            DisplayEvent::LogReset("=== Game Log ===".into()),
            DisplayEvent::StatusChange("Game In Progress".into()),
            DisplayEvent::ValidationMessage("Please enter a valid number.".into()),
            DisplayEvent::InputEnabledChange(true),
        ] {
            screen.apply(event);
        }
        screen.type_char('4');

        let out = draw(&screen);
        assert!(out.contains("NUMBER DUEL"));
        assert!(out.contains("Attempts left: 12"));
        assert!(out.contains("Player's Turn"));
        assert!(out.contains("=== Game Log ==="));
        assert!(out.contains("Please enter a valid number."));
        assert!(out.contains("YOUR GUESS (1-100)"));
    }

    #[test]
    fn validation_flood_still_draws() {
        let mut screen = Screen::new();
        screen.apply(DisplayEvent::StatusChange("Game In Progress".into()));
        for _ in 0..1000 {
            screen.apply(DisplayEvent::ValidationMessage("Please enter a valid number.".into()));
        }
        let out = draw(&screen);
        assert!(out.contains("Game In Progress"));
        assert!(out.contains("GAME LOG"));
        assert!(out.contains("YOUR GUESS (1-100)"));
    }

    #[test]
    fn long_log_keeps_newest_line_visible() {
        let mut screen = Screen::new();
        for i in 0..200 {
            screen.apply(DisplayEvent::LogAppend(format!("line {i:03}")));
        }
        let out = draw(&screen);
        assert!(out.contains("line 199"));
        assert!(!out.contains("line 000"));
    }
}
