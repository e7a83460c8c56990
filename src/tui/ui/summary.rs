use super::theme::Theme;
use super::util::{format_number, truncate_to_width};
use crate::dashboard::{RenderedView, SelectionKey};
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Two totals plus the time the shown payload arrived. When the shown
/// payload belongs to an earlier selection, the last cell names it.
pub fn draw_summary(
    frame: &mut Frame,
    view: Option<&RenderedView>,
    current: Option<&SelectionKey>,
    theme: &Theme,
    area: Rect,
) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(area);

    let Some(view) = view else {
        draw_stat(frame, " Bot messages ", "-".to_string(), theme.bot_series, theme, cells[0]);
        draw_stat(frame, " API calls ", "-".to_string(), theme.api_series, theme, cells[1]);
        draw_stat(frame, " Updated ", "-".to_string(), theme.text, theme, cells[2]);
        return;
    };

    let loaded_at = view
        .loaded_at
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string();
    let (title, updated) = if current == Some(&view.key) {
        (" Updated ".to_string(), loaded_at)
    } else {
        let room = (cells[2].width as usize).saturating_sub(4);
        (
            format!(" {} ", truncate_to_width(&view.service_label, room)),
            format!("{} · {}", view.key.period, loaded_at),
        )
    };

    draw_stat(
        frame,
        " Bot messages ",
        format_number(view.totals.total_bot_messages),
        theme.bot_series,
        theme,
        cells[0],
    );
    draw_stat(
        frame,
        " API calls ",
        format_number(view.totals.total_api_calls),
        theme.api_series,
        theme,
        cells[1],
    );
    draw_stat(frame, &title, updated, theme.text, theme, cells[2]);
}

fn draw_stat(
    frame: &mut Frame,
    title: &str,
    value: String,
    color: ratatui::style::Color,
    theme: &Theme,
    area: Rect,
) {
    let widget = Paragraph::new(Line::from(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(title),
    );
    frame.render_widget(widget, area);
}
