use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::config::GameConfig;
use crate::hud::Hud;
use crate::session::Session;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub session: &'a Session,
    pub hud: &'a Hud,
    pub now_ms: u64,
    pub area: Rect,
    pub fps: u32,
}

/// Maps world units (y up from the floor) onto the cells of a terminal area
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub inner: Rect,
    pub world_width: i32,
    pub world_height: i32,
}

impl Viewport {
    pub fn new(inner: Rect, config: &GameConfig) -> Self {
        Self {
            inner,
            world_width: config.playfield_width,
            world_height: config.playfield_height,
        }
    }

    /// Cell for a world point, `None` if the point is outside the playfield
    pub fn to_cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if self.inner.width == 0 || self.inner.height == 0 {
            return None;
        }
        if x < 0 || y < 0 || x >= self.world_width || y >= self.world_height {
            return None;
        }

        let col = i64::from(x) * i64::from(self.inner.width) / i64::from(self.world_width);
        let row_from_floor =
            i64::from(y) * i64::from(self.inner.height) / i64::from(self.world_height);
        let row = i64::from(self.inner.height) - 1 - row_from_floor;

        Some((self.inner.x + col as u16, self.inner.y + row as u16))
    }

    /// Writes `text` centred on the cell, clipped to the playfield
    fn put(
        &self,
        buffer: &mut Buffer,
        cell: (u16, u16),
        row_offset: u16,
        text: &str,
        style: Style,
    ) {
        let (col, row) = cell;
        let row = row + row_offset;
        if row >= self.inner.bottom() {
            return;
        }
        let half = text.chars().count() as u16 / 2;
        let start = col.saturating_sub(half).max(self.inner.x);
        let room = self.inner.right().saturating_sub(start) as usize;
        if room == 0 {
            return;
        }
        buffer.set_stringn(start, row, text, room, style);
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer;

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        if !view.session.is_running() {
            self.render_stopped(frame, view);
        }
    }

    /// Renders the playfield, HUD and controls hint
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let session = view.session;

        let field_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(field_area);
        frame.render_widget(block, field_area);

        let viewport = Viewport::new(inner, session.config());
        let buffer = frame.buffer_mut();

        // Balloons, drawn from their top centre down
        for balloon in session.balloons() {
            let bounds = balloon.bounds();
            // A balloon whose top is still at the floor is hidden
            let top = (bounds.top() - 1).min(viewport.world_height - 1);
            let Some(cell) = viewport.to_cell(bounds.x + bounds.width / 2, top) else {
                continue;
            };
            let style = Style::default()
                .fg(balloon.color.get_color())
                .add_modifier(Modifier::BOLD);
            for (offset, line) in balloon.get_sprite_lines().iter().enumerate() {
                viewport.put(buffer, cell, offset as u16, line, style);
            }
        }

        for powerup in session.powerups() {
            let bounds = powerup.bounds();
            let center_y = bounds.y + bounds.height / 2;
            if let Some(cell) = viewport.to_cell(bounds.x + bounds.width / 2, center_y) {
                viewport.put(
                    buffer,
                    cell,
                    0,
                    &powerup.get_char().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        for bullet in session.bullets() {
            let bounds = bullet.bounds();
            if let Some(cell) = viewport.to_cell(bounds.x + bounds.width / 2, bounds.y) {
                viewport.put(buffer, cell, 0, "|", Style::default().fg(Color::Yellow));
            }
        }

        for particle in session.particles() {
            if let Some(cell) = viewport.to_cell(particle.x, particle.y) {
                viewport.put(
                    buffer,
                    cell,
                    0,
                    &particle.get_char().to_string(),
                    Style::default()
                        .fg(particle.color.get_color())
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        // Player, tinted while multi-shot is active
        let player = session.player();
        let player_bounds = player.bounds();
        if let Some(cell) = viewport.to_cell(player.center_x(), player_bounds.top()) {
            let color = if session.is_multi_shot_active() {
                Color::Cyan
            } else {
                Color::Green
            };
            let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
            for (offset, line) in player.get_sprite_lines().iter().enumerate() {
                viewport.put(buffer, cell, offset as u16, line, style);
            }
        }

        // Stats overlay at the top
        let hud = view.hud;
        let score_style = if hud.is_score_pulsing(view.now_ms) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        };
        let mut spans = vec![
            Span::styled(hud.score_text(), score_style),
            Span::raw("  "),
            Span::styled(
                hud.level_text(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if hud.multi_shot {
            spans.push(Span::styled(
                "  MULTI-SHOT",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("{}", view.fps),
            Style::default().fg(Color::White),
        ));

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: area.height.min(1),
        };
        frame.render_widget(Paragraph::new(Line::from(spans)), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[←/→ A/D: Move] [Space: Fire] [Enter: Start] [X: Stop] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        if area.height > 1 {
            let controls_area = Rect {
                x: area.x + 1,
                y: area.y + area.height - 1,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            frame.render_widget(Paragraph::new(controls).centered(), controls_area);
        }
    }

    /// Overlay shown while the session is stopped
    fn render_stopped(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        if area.width < 30 || area.height < 6 {
            return;
        }

        let text = vec![
            Line::from(""),
            Line::from("BALLOON POP").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press Enter to start").centered().white(),
        ];

        let overlay = Rect {
            x: area.x + area.width / 2 - 15,
            y: area.y + area.height / 2 - 3,
            width: 30,
            height: 6,
        };

        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            overlay,
        );
    }
}
