use std::collections::HashSet;

use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::game::{GameState, Position};
use crate::metrics::SessionMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<R: Rng>(
        &self,
        frame: &mut Frame,
        state: &GameState<R>,
        metrics: &SessionMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        // Two columns per cell plus the border on each side
        let (needed_width, needed_height) = (
            state.grid_width().saturating_mul(2).saturating_add(2),
            state.grid_height().saturating_add(2),
        );
        let game_area = chunks[1];
        let fits = u32::from(game_area.width) >= needed_width
            && u32::from(game_area.height) >= needed_height;
        if fits {
            frame.render_widget(self.render_grid(state), game_area);
        } else {
            let warning = self.render_too_small(needed_width, needed_height);
            frame.render_widget(warning, game_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_too_small(&self, needed_width: u32, needed_height: u32) -> Paragraph<'static> {
        let text = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "The grid needs {needed_width}x{needed_height} cells; \
                 enlarge the window or pass a smaller --board-width"
            )),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }

    fn render_grid<R: Rng>(&self, state: &GameState<R>) -> Paragraph<'static> {
        let head = state.head();
        let food = state.food();
        let body: HashSet<Position> = state.body().iter().copied().collect();

        let lines: Vec<Line> = (0..state.grid_height() as i32)
            .map(|y| {
                let spans: Vec<Span> = (0..state.grid_width() as i32)
                    .map(|x| {
                        let pos = Position::new(x, y);

                        // Head is drawn over a segment grown this tick
                        if pos == head {
                            Span::styled(
                                "■ ",
                                Style::default()
                                    .fg(Color::Green)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else if body.contains(&pos) {
                            Span::styled("■ ", Style::default().fg(Color::LightGreen))
                        } else if pos == food {
                            Span::styled(
                                "● ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled("· ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats<R: Rng>(
        &self,
        state: &GameState<R>,
        metrics: &SessionMetrics,
    ) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("High: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Deaths: ", label),
            Span::styled(metrics.deaths.to_string(), value),
            Span::raw("    "),
            Span::styled("Eaten: ", label),
            Span::styled(metrics.food_eaten.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
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
