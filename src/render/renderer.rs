use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Position, RoundState, VersusState};
use crate::metrics::SessionStats;
use crate::score::ScoreReport;

const P1_COLOR: Color = Color::Cyan;
const P2_COLOR: Color = Color::Magenta;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_solo(
        &self,
        frame: &mut Frame,
        state: &RoundState,
        stats: &SessionStats,
        player_name: &str,
        report: Option<&ScoreReport>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let header = self.solo_header(state, stats, player_name);
        frame.render_widget(header, chunks[0]);

        let game_area = Self::centered(chunks[1]);
        if state.is_active() {
            let grid = self.solo_grid(state);
            frame.render_widget(grid, game_area);
        } else {
            let game_over = self.solo_game_over(state, report);
            frame.render_widget(game_over, game_area);
        }

        let controls = self.controls_line(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);
        frame.render_widget(controls, chunks[2]);
    }

    pub fn render_versus(&self, frame: &mut Frame, state: &VersusState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let header = self.versus_header(state);
        frame.render_widget(header, chunks[0]);

        let game_area = Self::centered(chunks[1]);
        if state.is_active() {
            let grid = self.versus_grid(state);
            frame.render_widget(grid, game_area);
        } else {
            let game_over = self.versus_game_over(state);
            frame.render_widget(game_over, game_area);
        }

        let controls = self.controls_line(vec![
            Span::styled("WASD", Style::default().fg(P1_COLOR)),
            Span::raw(" player 1 | "),
            Span::styled("↑↓←→", Style::default().fg(P2_COLOR)),
            Span::raw(" player 2 | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);
        frame.render_widget(controls, chunks[2]);
    }

    /// Center the playfield horizontally
    fn centered(area: Rect) -> Rect {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(area)[1]
    }

    fn solo_grid(&self, state: &RoundState) -> Paragraph<'_> {
        let bonus = state.timer.as_ref().and_then(|t| t.bonus_food);
        let mut lines = Vec::new();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(P1_COLOR)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.food {
                    Span::styled(
                        "@ ",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if bonus == Some(pos) {
                    Span::styled(
                        "$ ",
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.is_obstacle(pos) {
                    Span::styled("X ", Style::default().fg(Color::Red))
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
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake Arena "),
            )
            .alignment(Alignment::Center)
    }

    fn solo_header(
        &self,
        state: &RoundState,
        stats: &SessionStats,
        player_name: &str,
    ) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Player: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                player_name.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Level: ", Style::default().fg(Color::Yellow)),
            Span::styled(state.level.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
        ];

        if let Some(timer) = &state.timer {
            spans.push(Span::styled("Time Left: ", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(
                format!("{}s", timer.time_left),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled("Time: ", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(
                stats.format_clock(),
                Style::default().fg(Color::White),
            ));
        }

        spans.push(Span::raw("    "));
        spans.push(Span::styled("Best: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            stats.session_best.to_string(),
            Style::default().fg(Color::White),
        ));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn solo_game_over(&self, state: &RoundState, report: Option<&ScoreReport>) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if let Some(report) = report {
            text.push(Line::from(vec![
                Span::styled("Personal Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    report.personal_best.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]));
            text.push(Line::from(vec![
                Span::styled("Top Scorer: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{} ({})", report.top_scorer, report.top_score),
                    Style::default().fg(Color::White),
                ),
            ]));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn versus_grid(&self, state: &VersusState) -> Paragraph<'_> {
        let [p1, p2] = &state.players;
        let mut lines = Vec::new();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                // Player 1 paints first, so overlapping cells show as theirs
                let cell = if pos == p1.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(P1_COLOR)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if pos == p2.snake.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(P2_COLOR)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if pos == state.food {
                    Span::styled(
                        "@ ",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if p1.snake.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(P1_COLOR))
                } else if p2.snake.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(P2_COLOR))
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
                    .border_style(Style::default().fg(Color::White))
                    .title(" Versus "),
            )
            .alignment(Alignment::Center)
    }

    fn versus_header(&self, state: &VersusState) -> Paragraph<'_> {
        let [p1, p2] = &state.players;
        let text = vec![Line::from(vec![
            Span::styled("Player 1 (WASD): ", Style::default().fg(P1_COLOR)),
            Span::styled(
                p1.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Player 2 (Arrows): ", Style::default().fg(P2_COLOR)),
            Span::styled(
                p2.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn versus_game_over(&self, state: &VersusState) -> Paragraph<'_> {
        let [p1, p2] = &state.players;
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Player 1 Score: ", Style::default().fg(P1_COLOR)),
                Span::styled(p1.score.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Player 2 Score: ", Style::default().fg(P2_COLOR)),
                Span::styled(p2.score.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" for a rematch or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn controls_line(&self, spans: Vec<Span<'static>>) -> Paragraph<'static> {
        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
