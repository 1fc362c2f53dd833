use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{CELL_TERMINAL_WIDTH, GLYPH_CELL, Theme};
use crate::game::Snapshot;
use crate::grid::{Cell, Grid};
use crate::ui::hud::{HUD_HEIGHT, render_hud};
use crate::ui::menu::render_game_over_menu;

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, grid: Grid, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::new().style(Style::new().bg(theme.background)), area);

    let (board_area, hud_area) = layout(area, grid);
    let block =
        Block::bordered().border_style(Style::new().fg(theme.border).bg(theme.background));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, grid, snapshot.food, theme);
    render_snake(frame, inner, grid, snapshot, theme);
    render_hud(frame, hud_area, snapshot.score, theme);

    if snapshot.state.is_finished() {
        render_game_over_menu(
            frame,
            board_area,
            snapshot.score,
            snapshot.state,
            snapshot.death_reason,
            theme,
        );
    }
}

/// Splits `area` into the bordered board, centered, and the HUD row under it.
fn layout(area: Rect, grid: Grid) -> (Rect, Rect) {
    let cols_width = grid.cols().saturating_mul(u32::from(CELL_TERMINAL_WIDTH));
    let board_width = clamp_u16(cols_width).saturating_add(2);
    let board_height = clamp_u16(grid.rows()).saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(board_width)])
        .flex(Flex::Center)
        .areas(area);
    let [board_area, hud_area] = Layout::vertical([
        Constraint::Length(board_height),
        Constraint::Length(HUD_HEIGHT),
    ])
    .flex(Flex::Center)
    .areas(column);

    (board_area, hud_area)
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, grid: Grid, food: Cell, theme: &Theme) {
    let Some((x, y)) = cell_to_terminal(inner, grid, food) else {
        return;
    };

    let style = Style::new().fg(theme.food).bg(theme.background);
    frame.buffer_mut().set_string(x, y, GLYPH_CELL, style);
}

fn render_snake(
    frame: &mut Frame<'_>,
    inner: Rect,
    grid: Grid,
    snapshot: &Snapshot,
    theme: &Theme,
) {
    let buffer = frame.buffer_mut();

    // Drawn tail first so the head wins if a finished frame overlaps cells.
    for (index, cell) in snapshot.snake_cells.iter().enumerate().rev() {
        let Some((x, y)) = cell_to_terminal(inner, grid, *cell) else {
            continue;
        };

        let style = if index == snapshot.head_index {
            Style::new()
                .fg(theme.snake_head)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(theme.snake_body).bg(theme.background)
        };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

/// Maps a grid cell to the terminal position of its left column.
///
/// Returns `None` for cells off the board or clipped by a small terminal.
fn cell_to_terminal(inner: Rect, grid: Grid, cell: Cell) -> Option<(u16, u16)> {
    if !grid.in_bounds(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.col).ok()?.checked_mul(CELL_TERMINAL_WIDTH)?;
    let y_offset = u16::try_from(cell.row).ok()?;

    let x = inner.x.checked_add(x_offset)?;
    let y = inner.y.checked_add(y_offset)?;
    if x.saturating_add(CELL_TERMINAL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

fn clamp_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
