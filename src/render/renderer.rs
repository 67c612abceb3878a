use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::game::{
    speed, GameConfig, GameOverCause, GameState, Lifecycle, Position, Question, MAX_OPTIONS,
};

/// Read-only snapshot of everything drawn in one frame
pub struct View<'a> {
    pub state: &'a GameState,
    pub config: &'a GameConfig,
    pub high_score: u32,
    pub new_high_score: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw a frame and return the screen area covered by the grid cells
    pub fn render(&self, frame: &mut Frame, view: &View) -> Rect {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        let board = board_area(chunks[1], view.config);
        frame.render_widget(self.render_grid(view), board);
        let cells = Block::default().borders(Borders::ALL).inner(board);
        self.render_arrows(frame, cells);

        match view.state.lifecycle {
            Lifecycle::Idle => {
                let popup = popup_area(board, 36, 5);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_banner("Press Enter to start"), popup);
            }
            Lifecycle::CountingDown(n) => {
                let popup = popup_area(board, 16, 3);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_banner(&n.to_string()), popup);
            }
            Lifecycle::AwaitingAnswer => {
                if let Some(question) = view.state.trivia.current.as_ref() {
                    let height = question.options.len().min(MAX_OPTIONS) as u16 + 6;
                    let popup = popup_area(board, 48, height);
                    frame.render_widget(Clear, popup);
                    frame.render_widget(self.render_question(question), popup);
                }
            }
            Lifecycle::GameOver(cause) => {
                let popup = popup_area(board, 44, 9);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_game_over(view, cause), popup);
            }
            Lifecycle::Running => {}
        }

        frame.render_widget(self.render_controls(&view.state.lifecycle), chunks[2]);

        cells
    }

    fn render_grid(&self, view: &View) -> Paragraph<'_> {
        let state = view.state;
        let mut lines = Vec::new();

        for y in 0..view.config.grid_height() as i32 {
            let mut spans = Vec::new();

            for x in 0..view.config.grid_width() as i32 {
                let pos = Position::new(x, y);

                let cell = if pos == state.snake.head && state.lifecycle != Lifecycle::Idle {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.collides_with_trail(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Blue))
                } else if state.target == Some(pos) {
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

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    /// Arrow marks at the middle of each board edge, where a click steers
    fn render_arrows(&self, frame: &mut Frame, cells: Rect) {
        if cells.width == 0 || cells.height == 0 {
            return;
        }

        let mid_x = cells.x + cells.width / 2;
        let mid_y = cells.y + cells.height / 2;
        let style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::DIM);

        let arrows = [
            ("▲", mid_x, cells.y),
            ("▼", mid_x, cells.bottom() - 1),
            ("◀", cells.x, mid_y),
            ("▶", cells.right() - 1, mid_y),
        ];
        for (symbol, x, y) in arrows {
            frame.render_widget(
                Paragraph::new(Span::styled(symbol, style)),
                Rect::new(x, y, 1, 1),
            );
        }
    }

    fn render_stats(&self, view: &View) -> Paragraph<'_> {
        let score = view.state.score;
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("High Score: ", label),
            Span::styled(view.high_score.max(score).to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(
                format!("{}/s", speed::moves_per_second(score, view.config)),
                value,
            ),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_banner(&self, text: &str) -> Paragraph<'_> {
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                text.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    }

    fn render_question<'a>(&self, question: &'a Question) -> Paragraph<'a> {
        let mut text = vec![
            Line::from(Span::styled(
                question.text.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (index, option) in question.options.iter().take(MAX_OPTIONS).enumerate() {
            text.push(Line::from(vec![
                Span::styled(
                    format!("{}. ", index + 1),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(option.as_str()),
            ]));
        }

        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Wrong answers end the game",
            Style::default().fg(Color::Gray),
        )));

        Paragraph::new(text)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Question "),
            )
    }

    fn render_game_over(&self, view: &View, cause: GameOverCause) -> Paragraph<'_> {
        let reason = match cause {
            GameOverCause::Wall => "You hit the wall",
            GameOverCause::SelfCollision => "You ran into yourself",
            GameOverCause::WrongAnswer => "Wrong answer",
        };

        let result = if view.new_high_score {
            Line::from(Span::styled(
                "New High Score!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(vec![
                Span::styled("You scored: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };

        let text = vec![
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            result,
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
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

    fn render_controls(&self, lifecycle: &Lifecycle) -> Paragraph<'_> {
        let spans = match lifecycle {
            Lifecycle::AwaitingAnswer => vec![
                Span::styled("1-9", Style::default().fg(Color::Cyan)),
                Span::raw(" to answer | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
            _ => vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" / "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" / click to move | "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" to start | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
        };

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Bordered board sized to the grid (two columns per cell), centered in `area`
fn board_area(area: Rect, config: &GameConfig) -> Rect {
    let width = (config.grid_width() as u16).saturating_mul(2).saturating_add(2);
    let height = (config.grid_height() as u16).saturating_add(2);
    popup_area(area, width, height)
}

/// A `width` x `height` rectangle centered in `area`, clipped to it
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameEngine, QuestionBank, SelectionPolicy};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &GameState, new_high_score: bool) -> (String, Rect) {
        let config = GameConfig::default();
        let view = View {
            state,
            config: &config,
            high_score: 7,
            new_high_score,
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut cells = Rect::default();
        terminal
            .draw(|frame| cells = Renderer::new().render(frame, &view))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        (text, cells)
    }

    #[test]
    fn test_board_matches_grid() {
        let engine = GameEngine::seeded(
            GameConfig::default(),
            QuestionBank::builtin(SelectionPolicy::Random),
            1,
        )
        .unwrap();
        let (text, cells) = draw(&engine.idle_state(), false);

        assert_eq!(cells.width, 50);
        assert_eq!(cells.height, 19);
        assert!(text.contains("Press Enter to start"));
        assert!(text.contains("High Score: 7"));
    }

    #[test]
    fn test_question_is_listed() {
        let mut engine = GameEngine::seeded(
            GameConfig::default(),
            QuestionBank::builtin(SelectionPolicy::Random),
            1,
        )
        .unwrap();
        let mut state = engine.start().unwrap();
        state.lifecycle = Lifecycle::AwaitingAnswer;
        state.trivia.current = Some(Question::new("What is 2 + 2?", &["4", "5"], "4"));

        let (text, _) = draw(&state, false);
        assert!(text.contains("What is 2 + 2?"));
        assert!(text.contains("1. 4"));
        assert!(text.contains("2. 5"));
    }

    #[test]
    fn test_game_over_banner() {
        let mut engine = GameEngine::seeded(
            GameConfig::default(),
            QuestionBank::builtin(SelectionPolicy::Random),
            1,
        )
        .unwrap();
        let mut state = engine.start().unwrap();
        state.lifecycle = Lifecycle::GameOver(GameOverCause::WrongAnswer);

        let (text, _) = draw(&state, true);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Wrong answer"));
        assert!(text.contains("New High Score!"));
    }

    #[test]
    fn test_arrows_mark_board_edges() {
        let config = GameConfig::default();
        let state = GameState::idle(config.start_head);
        let view = View {
            state: &state,
            config: &config,
            high_score: 0,
            new_high_score: false,
        };
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut cells = Rect::default();
        terminal
            .draw(|frame| cells = Renderer::new().render(frame, &view))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let symbol_at = |x: u16, y: u16| {
            buffer.content()[(y * buffer.area.width + x) as usize]
                .symbol()
                .to_string()
        };
        let mid_x = cells.x + cells.width / 2;
        let mid_y = cells.y + cells.height / 2;

        assert_eq!(symbol_at(mid_x, cells.y), "▲");
        assert_eq!(symbol_at(mid_x, cells.bottom() - 1), "▼");
        assert_eq!(symbol_at(cells.x, mid_y), "◀");
        assert_eq!(symbol_at(cells.right() - 1, mid_y), "▶");
    }

    #[test]
    fn test_oversized_question_is_clipped() {
        let options: Vec<String> = (1..=70_000).map(|i| format!("o{}", i)).collect();
        let options: Vec<&str> = options.iter().map(String::as_str).collect();

        let mut state = GameState::idle(Position::new(12, 9));
        state.lifecycle = Lifecycle::AwaitingAnswer;
        state.trivia.current = Some(Question::new("Pick one", &options, "o1"));

        let (text, _) = draw(&state, false);
        assert!(text.contains("9. o9"));
        assert!(!text.contains("10. o10"));
    }
}
