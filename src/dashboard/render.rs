use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::{Dashboard, Status};

const PREVIEW_WIDTH: usize = 60;

pub(super) fn draw(frame: &mut Frame, dashboard: &Dashboard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(dashboard.title().bold())),
        rows[0],
    );

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    draw_buffer(frame, dashboard, panels[0]);
    draw_sections(frame, dashboard, panels[1]);

    if let Some(status) = dashboard.status() {
        frame.render_widget(Paragraph::new(status_line(status)), rows[2]);
    }
    frame.render_widget(Paragraph::new(footer()), rows[3]);
}

fn draw_buffer(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let entries = dashboard.entries();
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let label_style = if dashboard.is_mapped(&entry.label) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Yellow)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", entry.label), label_style),
                Span::raw(" "),
                Span::styled(entry.preview(PREVIEW_WIDTH), Style::default().dim()),
            ]))
        })
        .collect();

    let title = Line::from(vec![
        Span::raw(" Buffer "),
        Span::styled(format!("({}) ", entries.len()), Style::default().dim()),
    ]);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !entries.is_empty() {
        state.select(Some(dashboard.selected()));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_sections(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let items: Vec<ListItem> = dashboard
        .sections()
        .into_iter()
        .map(|(label, target)| {
            ListItem::new(Line::from(vec![
                Span::raw(label),
                Span::raw(" "),
                Span::styled(target, Style::default().dim()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(" Sections ")),
    );
    frame.render_widget(list, area);
}

fn status_line(status: &Status) -> Line<'_> {
    match status {
        Status::Info(message) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Green),
        )),
        Status::Warning(message) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        )),
        Status::Error(message) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        )),
    }
}

fn footer() -> Line<'static> {
    let key = |k: &'static str| Span::styled(k, Style::default().bold());
    Line::from(vec![
        key("p"),
        Span::raw(" push  "),
        key("d"),
        Span::raw(" delete  "),
        key("r"),
        Span::raw(" refresh  "),
        key("↑/↓"),
        Span::raw(" select  "),
        key("q"),
        Span::raw(" quit"),
    ])
    .dim()
}
