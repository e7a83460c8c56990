mod activity;
mod breakdown_chart;
mod summary;
pub mod theme;
mod trend_chart;
pub mod util;

use crate::dashboard::{Dashboard, DashboardPhase};
use crate::usage_api::Period;
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use theme::Theme;

pub const KEY_HINTS: &str =
    " ↑/↓ service  p period  1/2/3 7d/30d/90d  r refresh  Esc dismiss  q quit";

pub fn draw(frame: &mut Frame, dashboard: &Dashboard, now: DateTime<Utc>) {
    let theme = Theme::for_phase(dashboard.phase());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, dashboard, &theme, chunks[0]);
    let current_key = dashboard.selection().key();
    summary::draw_summary(
        frame,
        dashboard.view(),
        current_key.as_ref(),
        &theme,
        chunks[1],
    );

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body[1]);

    let waiting = dashboard.view().is_none() && dashboard.phase().is_loading();
    trend_chart::draw_trend(
        frame,
        dashboard.trend_surface().chart(),
        waiting,
        &theme,
        body[0],
    );
    breakdown_chart::draw_breakdown(
        frame,
        dashboard.breakdown_surface().chart(),
        waiting,
        &theme,
        bottom[0],
    );
    activity::draw_activity(
        frame,
        dashboard.view().map(|view| &view.activity),
        waiting,
        now,
        &theme,
        bottom[1],
    );

    let footer = Paragraph::new(Line::from(Span::styled(
        KEY_HINTS,
        Style::default().fg(theme.muted),
    )));
    frame.render_widget(footer, chunks[3]);

    if let Some(notice) = dashboard.notice() {
        draw_notice(frame, notice, dashboard.phase(), &theme);
    }
}

fn draw_header(frame: &mut Frame, dashboard: &Dashboard, theme: &Theme, area: Rect) {
    let service = match dashboard.current_service() {
        Some(service) => service.display_label(),
        None if dashboard.services().is_empty() => "-".to_string(),
        None => "(none selected)".to_string(),
    };
    let position = dashboard
        .current_service()
        .and_then(|current| {
            dashboard
                .services()
                .iter()
                .position(|s| s.id == current.id)
        })
        .map(|i| format!(" {}/{}", i + 1, dashboard.services().len()))
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(" Service: ", Style::default().fg(theme.muted)),
        Span::styled(
            service,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(position, Style::default().fg(theme.muted)),
        Span::raw("   "),
        Span::styled("Period: ", Style::default().fg(theme.muted)),
    ];
    let current = dashboard.selection().current_period();
    for period in Period::ALL {
        let style = if period == current {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.muted)
        };
        spans.push(Span::styled(format!(" {} ", period.as_str()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!(" {} ", dashboard.phase().label()),
        Style::default().fg(theme.text).bg(theme.phase_bg),
    ));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_focused))
            .title(" Usage Dashboard "),
    );
    frame.render_widget(header, area);
}

/// Non-blocking banner above the footer; the dashboard stays visible behind it.
fn draw_notice(frame: &mut Frame, notice: &str, phase: DashboardPhase, theme: &Theme) {
    let area = frame.area();
    let width = (area.width as f32 * 0.7).max(30.0).min(area.width as f32) as u16;
    let height = 5u16.min(area.height);
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height + 1);
    let banner_area = Rect::new(x, y, width, height);

    let (title, color, hint) = if phase == DashboardPhase::Error {
        (" Error ", theme.error, "Esc to dismiss, r to retry")
    } else {
        (" Notice ", theme.warning, "Esc to dismiss")
    };

    frame.render_widget(Clear, banner_area);
    let banner = Paragraph::new(vec![
        Line::from(Span::styled(notice, Style::default().fg(theme.text))),
        Line::from(Span::styled(hint, Style::default().fg(theme.muted))),
    ])
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    );
    frame.render_widget(banner, banner_area);
}

/// Centered message inside a bordered panel, used for empty and loading states.
pub(super) fn draw_placeholder(
    frame: &mut Frame,
    block: Block<'_>,
    text: &str,
    theme: &Theme,
    area: Rect,
) {
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);
    let message = Paragraph::new(Span::styled(
        text.to_string(),
        Style::default()
            .fg(theme.muted)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(message, rows[1]);
}

pub(super) fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(title)
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
