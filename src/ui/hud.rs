use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;

/// Rows reserved under the board for the HUD.
pub const HUD_HEIGHT: u16 = 1;

/// Renders the score line under the board.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, score: u32, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("Score: ", Style::new().fg(theme.ink_dim)),
        Span::styled(
            score.to_string(),
            Style::new().fg(theme.ink).add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Left)
            .style(Style::new().bg(theme.background)),
        area,
    );
}
