use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{CollisionType, GameOverCause, GameState, Position};
use crate::metrics::GameMetrics;

/// Terminal columns per grid cell unless configured otherwise
pub const DEFAULT_CELL_WIDTH: u16 = 2;

/// Modal drawn on top of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Nothing has been started yet
    Welcome,
    /// Stays up until the player acknowledges it
    GameOver {
        final_score: u32,
        cause: GameOverCause,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Empty,
    Head,
    Body,
    Food,
}

pub struct Renderer {
    cell_width: u16,
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_cell_width(DEFAULT_CELL_WIDTH)
    }

    /// Each cell is `cell_width` columns: the glyph, then a one-column gutter
    pub fn with_cell_width(cell_width: u16) -> Self {
        Self {
            cell_width: cell_width.max(2),
        }
    }

    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        overlay: Overlay,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        frame.render_widget(self.render_grid(state), game_area);

        match overlay {
            Overlay::None => {}
            Overlay::Welcome => {
                let popup = centered(game_area, 36, 7);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_welcome(), popup);
            }
            Overlay::GameOver { final_score, cause } => {
                let popup = centered(game_area, 40, 9);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_game_over(final_score, cause), popup);
            }
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// One line per grid row, head drawn on top of any body segment it overlaps
    pub fn grid_lines(&self, state: &GameState) -> Vec<Line<'static>> {
        let mut kinds =
            vec![vec![CellKind::Empty; state.config.grid_width]; state.config.grid_height];

        let mut mark = |pos: Position, kind: CellKind| {
            if state.is_in_bounds(pos) {
                kinds[pos.y as usize][pos.x as usize] = kind;
            }
        };
        mark(state.food, CellKind::Food);
        for segment in state.snake.body_segments() {
            mark(*segment, CellKind::Body);
        }
        mark(state.snake.head(), CellKind::Head);

        kinds
            .into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|kind| self.cell_span(kind))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }

    fn cell_span(&self, kind: CellKind) -> Span<'static> {
        let (glyph, style) = match kind {
            CellKind::Head => (
                "■",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            CellKind::Body => ("■", Style::default().fg(Color::Green)),
            CellKind::Food => (
                "■",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            CellKind::Empty => ("·", Style::default().fg(Color::DarkGray)),
        };

        let mut text = glyph.repeat(usize::from(self.cell_width - 1));
        text.push(' ');
        Span::styled(text, style)
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'static> {
        Paragraph::new(self.grid_lines(state))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Walls: ", label),
            Span::styled(state.config.wall_mode.as_str(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(state.config.speed.as_str(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_welcome(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(&self, final_score: u32, cause: GameOverCause) -> Paragraph<'static> {
        let reason = match cause {
            GameOverCause::Collision(CollisionType::Wall) => "Hit the wall",
            GameOverCause::Collision(CollisionType::SelfCollision) => "Ran into yourself",
            GameOverCause::BoardFilled => "Board filled",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Your score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to continue", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" start | "),
            Span::styled("M", Style::default().fg(Color::Cyan)),
            Span::raw(" walls | "),
            Span::styled("1-3", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rect in the middle of `area`, clamped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
