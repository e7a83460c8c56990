use super::theme::Theme;
use super::util::truncate_to_width;
use super::{draw_placeholder, panel};
use crate::charts::activity::EMPTY_FEED;
use crate::charts::{relative_time, ActivityFeed};
use crate::usage_api::Direction;
use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

const TITLE: &str = " Recent activity ";
const MARKER_WIDTH: usize = 10;
const AGE_WIDTH: usize = 11;

/// Relative ages are computed against `now` on every draw.
pub fn draw_activity(
    frame: &mut Frame,
    feed: Option<&ActivityFeed>,
    waiting: bool,
    now: DateTime<Utc>,
    theme: &Theme,
    area: Rect,
) {
    let block = panel(TITLE, theme);
    let Some(feed) = feed.filter(|feed| !feed.is_empty()) else {
        let text = if waiting { "Loading…" } else { EMPTY_FEED };
        draw_placeholder(frame, block, text, theme, area);
        return;
    };

    let content_width = usize::from(area.width.saturating_sub(2))
        .saturating_sub(MARKER_WIDTH + AGE_WIDTH + 2);

    let items: Vec<ListItem> = feed
        .entries
        .iter()
        .map(|entry| {
            let marker_color = match entry.direction {
                Direction::Incoming => theme.incoming,
                Direction::Outgoing => theme.outgoing,
            };
            let content_style = if entry.content.is_some() {
                Style::default().fg(theme.text)
            } else {
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<width$}", entry.direction_marker(), width = MARKER_WIDTH),
                    Style::default().fg(marker_color),
                ),
                Span::raw(" "),
                Span::styled(
                    format!(
                        "{:>width$}",
                        relative_time(entry.created_at, now),
                        width = AGE_WIDTH
                    ),
                    Style::default().fg(theme.muted),
                ),
                Span::raw(" "),
                Span::styled(
                    truncate_to_width(entry.content_or_placeholder(), content_width),
                    content_style,
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
