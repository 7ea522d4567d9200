//! Screen furniture shared by every state: the outer frame, status bar,
//! info panel border and centred modal panels.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the info panel on the right, border included.
pub const INFO_PANEL_WIDTH: u16 = 22;
/// Rows reserved under the play field for the status bar.
const STATUS_ROWS: u16 = 2;
/// Narrowest play field worth splitting off.
const MIN_FIELD_WIDTH: u16 = 20;

/// Regions of the framed screen.
pub struct ScreenLayout {
    /// Play field, inside the outer frame.
    pub field: Rect,
    /// Status message and key hints under the field.
    pub status_bar: Rect,
    /// Right-hand panel; draws its own border.
    pub info_panel: Rect,
}

/// Clear `area`, draw the titled outer frame and split its inside into the
/// play field, the status bar under it and the info panel beside both.
pub fn framed_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    field_min_height: u16,
) -> ScreenLayout {
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inside = outer.inner(area);
    frame.render_widget(outer, area);

    let [left, info_panel] = columns(inside);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(field_min_height),
            Constraint::Length(STATUS_ROWS),
        ])
        .split(left);

    ScreenLayout {
        field: rows[0],
        status_bar: rows[1],
        info_panel,
    }
}

fn columns(area: Rect) -> [Rect; 2] {
    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(MIN_FIELD_WIDTH),
            Constraint::Length(INFO_PANEL_WIDTH),
        ])
        .split(area);
    [split[0], split[1]]
}

/// Two-row status bar: a coloured message over a row of `[key] action` hints.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    color: Color,
    hints: &[(&str, &str)],
) {
    let mut rows = vec![Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(color),
    ))];
    if !hints.is_empty() {
        rows.push(controls_line(hints));
    }
    frame.render_widget(Paragraph::new(rows).alignment(Alignment::Center), area);
}

/// One line of `[key] action` hints.
pub fn controls_line(hints: &[(&str, &str)]) -> Line<'static> {
    let key_style = Style::default().fg(Color::White);
    let action_style = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (key, action) in hints {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key.to_string(), key_style));
        spans.push(Span::styled(format!(" {}", action), action_style));
    }
    Line::from(spans)
}

/// Border for the info panel. Returns the area inside it.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let border = Block::default()
        .title(" Flight ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inside = border.inner(area);
    frame.render_widget(border, area);
    inside
}

/// Rect of `width`×`height` centred in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Render a bordered modal in the middle of `area`.
///
/// The first line is the bold title; `body` follows, centred.
pub fn render_modal(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    accent: Color,
    body: Vec<Line<'static>>,
) {
    let width = body
        .iter()
        .map(|line| line.width() as u16)
        .chain(std::iter::once(title.chars().count() as u16))
        .max()
        .unwrap_or(0)
        + 6;
    let height = body.len() as u16 + 4;
    let modal = centered_rect(area, width, height);

    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(body);

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Text progress bar, `width` cells wide.
pub fn progress_bar(fraction: f64, width: usize, color: Color) -> Line<'static> {
    let filled = ((fraction.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    Line::from(vec![
        Span::raw(" "),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled("░".repeat(empty), Style::default().fg(Color::DarkGray)),
    ])
}
