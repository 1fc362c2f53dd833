use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;
use crate::game::{DeathReason, GameStatus};

const POPUP_WIDTH: u16 = 32;
const POPUP_HEIGHT: u16 = 8;

/// Draws the end-of-game overlay on top of the last play frame.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    theme: &Theme,
) {
    let popup = centered_popup(area, POPUP_WIDTH, POPUP_HEIGHT);
    frame.render_widget(Clear, popup);

    let title = match status {
        GameStatus::Victory => "You Win!",
        _ => "Game Over",
    };
    let cause = match death_reason {
        Some(DeathReason::Wall) => "Hit the wall",
        Some(DeathReason::SelfCollision) => "Ran into yourself",
        None => "",
    };

    let lines = vec![
        Line::styled(
            title,
            Style::new().fg(theme.ink).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(format!("Final Score: {score}"), Style::new().fg(theme.ink)),
        Line::styled(cause, Style::new().fg(theme.ink_dim)),
        Line::from(""),
        Line::styled("R = restart | ESC/Q = quit", Style::new().fg(theme.ink_dim)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::new().bg(theme.background))
            .block(Block::bordered().border_style(Style::new().fg(theme.border))),
        popup,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);

    center
}
