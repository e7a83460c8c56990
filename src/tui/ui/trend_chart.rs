use super::theme::Theme;
use super::util::format_compact;
use super::{draw_placeholder, panel};
use crate::charts::TrendChart;
use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType},
    Frame,
};

const TITLE: &str = " Daily usage ";

pub fn draw_trend(
    frame: &mut Frame,
    chart: Option<&TrendChart>,
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

    let datasets = vec![
        Dataset::default()
            .name("Bot messages")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.bot_series))
            .data(&chart.bot_series),
        Dataset::default()
            .name("API calls")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.api_series))
            .data(&chart.api_series),
    ];

    let label_slots = usize::from(area.width / 12).max(2);
    let x_labels: Vec<Span> = chart
        .axis_labels(label_slots)
        .into_iter()
        .map(Span::raw)
        .collect();
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format_compact(chart.y_max / 2.0)),
        Span::raw(format_compact(chart.y_max)),
    ];

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([0.0, chart.x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([0.0, chart.y_max])
                .labels(y_labels),
        );
    frame.render_widget(widget, area);
}
