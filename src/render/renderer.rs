use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Direction, GameState, Phase, Position};
use crate::metrics::GameMetrics;

const OVERLAY_WIDTH: u16 = 36;
const OVERLAY_HEIGHT: u16 = 11;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let grid = self.render_grid(state);
        frame.render_widget(grid, game_area);

        if state.phase != Phase::Running {
            let overlay_area = centered_rect(OVERLAY_WIDTH, OVERLAY_HEIGHT, game_area);
            frame.render_widget(Clear, overlay_area);
            frame.render_widget(self.render_overlay(state), overlay_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::new();

        for y in 0..state.board_size {
            let mut spans = Vec::new();

            for x in 0..state.board_size {
                let pos = Position::new(x, y);

                let cell = if pos == head {
                    Span::styled(
                        head_glyph(state.direction),
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if state.food == Some(pos) {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::Gray))
                    .title(" SNAKE "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("High: ", label),
            Span::styled(state.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", state.speed_ms), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_overlay(&self, state: &GameState) -> Paragraph<'_> {
        let bold = Modifier::BOLD;
        let hint = Style::default().fg(Color::Gray);

        let (title, accent, mut body) = match state.phase {
            Phase::Idle => (
                "RETRO SNAKE",
                Color::Green,
                vec![Line::styled("Press Enter to Start", hint)],
            ),
            Phase::Paused => (
                "PAUSED",
                Color::Yellow,
                vec![Line::styled("Press Space to Resume", hint)],
            ),
            Phase::GameOver => (
                "GAME OVER",
                Color::Red,
                vec![
                    Line::from(vec![
                        Span::styled("Your Score: ", Style::default().fg(Color::Yellow)),
                        Span::styled(
                            state.score.to_string(),
                            Style::default().fg(Color::White).add_modifier(bold),
                        ),
                    ]),
                    Line::from(vec![
                        Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                        Span::styled(state.high_score.to_string(), Style::default().fg(Color::White)),
                    ]),
                    Line::styled("Press Enter to Restart", hint),
                ],
            ),
            Phase::Running => ("", Color::White, Vec::new()),
        };

        let mut text = vec![
            Line::from(""),
            Line::styled(title, Style::default().fg(accent).add_modifier(bold)),
            Line::from(""),
        ];
        text.append(&mut body);
        text.extend([
            Line::from(""),
            Line::styled("Arrow Keys or WASD to Move", Style::default().fg(Color::DarkGray)),
            Line::styled("Space to Pause/Resume", Style::default().fg(Color::DarkGray)),
        ]);

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" start | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
