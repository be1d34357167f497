use crate::app::{App, Screen};
use crate::sync::{rows, ResourceKind};
use crate::view::{ListContent, TextContent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame,
};

mod delete_dialog;
mod header;
mod login_view;
mod resource_view;
mod schedules_view;
mod text_view;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    if app.screen == Screen::Login {
        login_view::render_login_view(frame, app);
        return;
    }

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title + throbber
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Active tab
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Controls
        ])
        .split(frame.area());

    header::render_title(frame, root[0], app);
    header::render_tabs(frame, root[1], app);

    let body = root[2];
    match app.active_tab {
        ResourceKind::Projects | ResourceKind::Databases => {
            resource_view::render_resource_view(frame, app, body)
        }
        ResourceKind::Schedules => schedules_view::render_schedules_view(frame, app, body),
        ResourceKind::Logs => text_view::render_logs_view(frame, app, body),
        ResourceKind::Uptime => text_view::render_uptime_view(frame, app, body),
    }

    render_status(frame, root[3], app);
    render_controls(frame, root[4], app);

    if app.delete_context.is_some() {
        delete_dialog::render_delete_confirm_dialog(frame, app);
    }
}

/// Items for a list region, with placeholder lines for the non-row states.
fn list_items(kind: ResourceKind, content: &ListContent) -> Vec<ListItem<'static>> {
    let muted = Style::default().fg(Color::DarkGray);
    match content {
        ListContent::Loading => vec![ListItem::new(Span::styled(rows::loading_message(kind), muted))],
        ListContent::Empty => vec![ListItem::new(Span::styled(
            rows::empty_list_message(kind),
            muted,
        ))],
        ListContent::Failed => vec![ListItem::new(Span::styled(
            rows::failed_message(kind),
            Style::default().fg(Color::Red),
        ))],
        ListContent::Rows(rows) => rows
            .iter()
            .map(|row| ListItem::new(Line::from(row.text.clone())))
            .collect(),
    }
}

fn text_display(kind: ResourceKind, content: &TextContent) -> (String, Style) {
    match content {
        TextContent::Blank => (String::new(), Style::default()),
        TextContent::Loading => (rows::loading_message(kind), Style::default().fg(Color::DarkGray)),
        TextContent::Ready(text) => (text.clone(), Style::default().fg(Color::White)),
        TextContent::Failed => (rows::failed_message(kind), Style::default().fg(Color::Red)),
    }
}

/// Per-kind error slot, empty when the last cycle succeeded.
fn render_error_slot(frame: &mut Frame, area: Rect, app: &App, kind: ResourceKind) {
    if let Some(message) = app.dashboard.error(kind) {
        let paragraph = Paragraph::new(Span::styled(
            format!("Error: {}", message),
            Style::default().fg(Color::Red),
        ))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some(message) => Line::from(vec![
            Span::styled(" ● ", Style::default().fg(Color::Yellow)),
            Span::styled(message.as_str(), Style::default().fg(Color::White)),
        ]),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Yellow);
    let mut spans = vec![
        Span::styled(" Tab", key),
        Span::raw(": Switch tab  "),
        Span::styled("r", key),
        Span::raw(": Refresh  "),
    ];
    match app.active_tab {
        ResourceKind::Projects | ResourceKind::Databases => spans.extend([
            Span::styled("↑↓", key),
            Span::raw(": Field  "),
            Span::styled("←→", key),
            Span::raw(": Change  "),
            Span::styled("Enter", key),
            Span::raw(": Add schedule  "),
        ]),
        ResourceKind::Schedules => spans.extend([
            Span::styled("↑↓", key),
            Span::raw(": Select  "),
            Span::styled("d", key),
            Span::raw(": Delete  "),
        ]),
        ResourceKind::Logs => spans.extend([Span::styled("↑↓", key), Span::raw(": Scroll  ")]),
        ResourceKind::Uptime => {}
    }
    spans.extend([
        Span::styled("Ctrl+L", key),
        Span::raw(": Logout  "),
        Span::styled("q", key),
        Span::raw(": Quit"),
    ]);
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
