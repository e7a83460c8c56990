use super::theme::Theme;
use super::util::{format_number, format_optional, truncate_to_width};
use super::{draw_placeholder, panel};
use crate::charts::BreakdownChart;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Row, Table},
    Frame,
};

const TITLE: &str = " API breakdown ";
const LABEL_WIDTH: usize = 18;

pub fn draw_breakdown(
    frame: &mut Frame,
    chart: Option<&BreakdownChart>,
    waiting: bool,
    theme: &Theme,
    area: Rect,
) {
    let block = panel(TITLE, theme);
    let Some(chart) = chart else {
        let text = if waiting { "Loading…" } else { "No data" };
        draw_placeholder(frame, block, text, theme, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bar_rows = (chart.slices.len() as u16).min(inner.height / 2).max(1);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(bar_rows), Constraint::Min(0)])
        .split(inner);

    let bars: Vec<Bar> = chart
        .slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            Bar::default()
                .value(slice.total_requests)
                .label(Line::from(truncate_to_width(
                    &BreakdownChart::slice_label(slice),
                    LABEL_WIDTH,
                )))
                .text_value(format_number(slice.total_requests))
                .style(Style::default().fg(Theme::category_color(i)))
        })
        .collect();

    let bar_chart = BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(chart.max_requests().max(1))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(bar_chart, parts[0]);

    let header = Row::new(vec!["Type", "Requests", "Avg ms", "Cost"]).style(
        Style::default()
            .fg(theme.muted)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = chart
        .slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            Row::new(vec![
                slice.api_type.clone(),
                format_number(slice.total_requests),
                format_optional(slice.avg_response_time, 1),
                format_optional(slice.total_cost, 4),
            ])
            .style(Style::default().fg(Theme::category_color(i)))
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(9),
        ],
    )
    .header(header);
    frame.render_widget(table, parts[1]);
}
