use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use super::view::{AnalysisPanel, Hud};
use crate::analysis::Grade;
use crate::game::{GameState, GameStatus, Position};

const SIDE_PANEL_WIDTH: u16 = 36;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, hud: &Hud<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board and side panel
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(hud), chunks[0]);

        let board_width = (hud.state.grid_size as u16) * 2 + 2;
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(board_width),
                Constraint::Length(SIDE_PANEL_WIDTH),
            ])
            .split(chunks[1]);

        let board_area = body[0];
        match hud.status {
            GameStatus::Idle => frame.render_widget(self.render_prompt(hud, None), board_area),
            GameStatus::Playing | GameStatus::Paused => {
                frame.render_widget(self.render_grid(hud.state, hud.status), board_area)
            }
            GameStatus::GameOver => {
                let summary = self.game_over_lines(hud);
                frame.render_widget(self.render_prompt(hud, Some(summary)), board_area)
            }
        }

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(9)])
            .split(body[1]);

        frame.render_widget(self.render_leaderboard(hud), side[0]);
        frame.render_widget(self.render_analysis(hud.analysis), side[1]);

        frame.render_widget(self.render_controls(hud.status), chunks[2]);
    }

    fn render_grid(&self, state: &GameState, status: GameStatus) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid_size {
            let mut spans = Vec::new();

            for x in 0..state.grid_size {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    // Snake head - distinct color
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.food {
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

        let (title, border) = if status == GameStatus::Paused {
            (" Snake (paused) ", Color::Yellow)
        } else {
            (" Snake ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, hud: &Hud<'_>) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = Vec::new();
        if !hud.player_name.is_empty() {
            spans.push(Span::styled(
                hud.player_name.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw("    "));
        }

        spans.extend([
            Span::styled("Score: ", label),
            Span::styled(
                hud.state.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(hud.metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(hud.state.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", hud.tick_interval.as_millis()), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(hud.metrics.format_time(), value),
            Span::raw("    "),
            Span::styled(hud.status.to_string(), Style::default().fg(Color::Cyan)),
        ]);

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn game_over_lines(&self, hud: &Hud<'_>) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
        ];

        if let Some(game) = hud.last_game {
            lines.push(Line::from(Span::styled(
                format!("{} {}", game.player_name, game.reason),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    game.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("   Length: {}", game.length),
                    Style::default().fg(Color::White),
                ),
            ]));
            if game.score > 0 && game.score == hud.metrics.high_score {
                lines.push(Line::from(Span::styled(
                    "New best this session!",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )));
            }
        }

        lines
    }

    /// Name prompt, optionally preceded by the last game's summary
    fn render_prompt(&self, hud: &Hud<'_>, header: Option<Vec<Line<'static>>>) -> Paragraph<'static> {
        let mut lines = header.unwrap_or_else(|| {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "S N A K E",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
            ]
        });

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Player: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}_", hud.prompt.value()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));

        if let Some(error) = hud.prompt.error() {
            lines.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Esc",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        let border = if hud.status == GameStatus::GameOver {
            Color::Red
        } else {
            Color::Green
        };

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
    }

    fn render_leaderboard(&self, hud: &Hud<'_>) -> Paragraph<'_> {
        let mut lines = Vec::new();

        if hud.leaderboard.is_empty() {
            lines.push(Line::from(Span::styled(
                "No scores yet",
                Style::default().fg(Color::DarkGray),
            )));
        }

        for (rank, entry) in hud.leaderboard.iter().enumerate() {
            let highlight = hud
                .last_game
                .is_some_and(|game| game.player_name == entry.name && game.score == entry.score);
            let style = if highlight {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            lines.push(Line::from(vec![
                Span::styled(format!("{:>2}. ", rank + 1), Style::default().fg(Color::Yellow)),
                Span::styled(format!("{:<16}", entry.name), style),
                Span::styled(format!("{:>5}", entry.score), style),
                Span::styled(
                    format!("  {}", entry.date.format("%m-%d")),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Leaderboard "),
        )
    }

    fn render_analysis(&self, panel: &AnalysisPanel) -> Paragraph<'_> {
        let muted = Style::default().fg(Color::DarkGray);

        let lines = match panel {
            AnalysisPanel::Disabled => vec![Line::from(Span::styled(
                "Set GEMINI_API_KEY for post-game commentary",
                muted,
            ))],
            AnalysisPanel::Empty => vec![Line::from(Span::styled(
                "Finish a game to get graded",
                muted,
            ))],
            AnalysisPanel::Loading => vec![Line::from(Span::styled(
                "Grading your run...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))],
            AnalysisPanel::Ready(analysis) => vec![
                Line::from(vec![
                    Span::styled("Grade: ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        analysis.grade.to_string(),
                        Style::default()
                            .fg(grade_color(analysis.grade))
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(""),
                Line::from(Span::styled(
                    analysis.commentary.clone(),
                    Style::default().fg(Color::White),
                )),
            ],
        };

        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Commentary "),
        )
    }

    fn render_controls(&self, status: GameStatus) -> Paragraph<'_> {
        let text = match status {
            GameStatus::Playing | GameStatus::Paused => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Space/P", Style::default().fg(Color::Cyan)),
                Span::raw(" to pause | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            GameStatus::Idle | GameStatus::GameOver => Line::from(vec![
                Span::raw("Type your name, "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" to start | "),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(vec![text]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::S => Color::Magenta,
        Grade::A => Color::Green,
        Grade::B => Color::Cyan,
        Grade::C => Color::Yellow,
        Grade::D | Grade::F => Color::Red,
        Grade::Unavailable => Color::DarkGray,
    }
}
