use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Paragraph,
        canvas::{Canvas, Circle, Context, Line as Segment, Rectangle},
    },
};

use crate::game::{CollisionType, FoodItem, FoodKind, GameState, Point};
use crate::metrics::GameMetrics;

const TRAIL_COLOR: Color = Color::Red;
const HEAD_COLOR: Color = Color::Magenta;
const HEAD_RADIUS: f64 = 20.0;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Cells covered by the play field, inside its border
    ///
    /// Pointer positions are mapped against this rectangle.
    pub fn field_area(&self, area: Rect) -> Rect {
        self.board_area(area).inner(Margin::new(1, 1))
    }

    fn board_area(&self, area: Rect) -> Rect {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(area);
        chunks[1]
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        // Render header with basic stats
        let stats = self.render_stats(chunks[0], state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = chunks[1];
        if state.is_over() {
            let game_over = self.render_game_over(game_area, state, metrics);
            frame.render_widget(game_over, game_area);
        } else {
            frame.render_widget(field_canvas(state), game_area);
        }

        // Render footer with controls
        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_stats(&self, _area: Rect, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:.0}/{:.0}", state.trail.total_length(), state.allowed_length),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        _area: Rect,
        state: &GameState,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let cause = match state.last_collision {
            Some(CollisionType::Boundary) => "You left the frame",
            Some(CollisionType::SelfCollision) => "You bit yourself",
            None => "",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
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

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Pointer", Style::default().fg(Color::Cyan)),
            Span::raw(" steers | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("M", Style::default().fg(Color::Cyan)),
            Span::raw(" to mirror | "),
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

/// Trail, head, food and score drawn in frame coordinates
fn field_canvas(state: &GameState) -> Canvas<'_, impl Fn(&mut Context) + '_> {
    let (width, height) = (state.frame_width as f64, state.frame_height as f64);
    // Canvas y grows upwards, frame y grows downwards
    let flip = move |p: Point| (p.x, height - p.y);

    Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| {
            for item in state.food.items().iter().filter(|item| item.visible) {
                draw_food(ctx, item, height);
            }
            ctx.layer();

            let points: Vec<Point> = state.trail.points().collect();
            for pair in points.windows(2) {
                let (x1, y1) = flip(pair[0]);
                let (x2, y2) = flip(pair[1]);
                ctx.draw(&Segment::new(x1, y1, x2, y2, TRAIL_COLOR));
            }

            if let Some(head) = state.trail.head() {
                let (x, y) = flip(head);
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: HEAD_RADIUS,
                    color: HEAD_COLOR,
                });
            }

            ctx.print(
                width * 0.02,
                height * 0.95,
                Span::styled(
                    format!("Score: {}", state.score),
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
            );
        })
}

fn food_color(kind: FoodKind) -> Color {
    match kind {
        FoodKind::Normal => Color::Green,
        FoodKind::Bonus => Color::Yellow,
        FoodKind::Poison => Color::LightMagenta,
    }
}

/// Outline the sprite's extent with its top-left corner where the image would be composited
fn draw_food(ctx: &mut Context, item: &FoodItem, frame_height: f64) {
    let top_left = item.hit_box().top_left();
    let (width, height) = (item.spec.width as f64, item.spec.height as f64);
    let color = food_color(item.kind);

    ctx.draw(&Rectangle {
        x: top_left.x,
        y: frame_height - top_left.y - height,
        width,
        height,
        color,
    });
    ctx.draw(&Circle {
        x: item.position.x,
        y: frame_height - item.position.y,
        radius: width.min(height) / 4.0,
        color,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameSession};
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;

    fn screen_text(session: &GameSession) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, session.state(), &metrics))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_playing() {
        let now = Instant::now();
        let mut session = GameSession::new(GameConfig::classic(), now).unwrap();
        session
            .state_mut()
            .food
            .place(FoodKind::Normal, Point::new(1200.0, 650.0));
        session.update(Point::new(100.0, 100.0), now);
        session.update(Point::new(140.0, 120.0), now);

        let text = screen_text(&session);
        assert!(text.contains("Snake"));
        assert!(text.contains("Score: 0"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_render_game_over() {
        let now = Instant::now();
        let mut session = GameSession::new(GameConfig::extended(), now).unwrap();
        session.update(Point::new(-10.0, 100.0), now);

        let text = screen_text(&session);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("You left the frame"));
    }

    #[test]
    fn test_field_area_inside_board() {
        let renderer = Renderer::new();
        let area = Rect::new(0, 0, 100, 30);
        let field = renderer.field_area(area);
        assert_eq!(field, Rect::new(1, 4, 98, 22));
    }
}
