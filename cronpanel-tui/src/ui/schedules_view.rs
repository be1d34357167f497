use super::*;
use crate::view::TextSlot;

pub fn render_schedules_view(frame: &mut Frame, app: &App, body: Rect) {
    let kind = ResourceKind::Schedules;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Server time
            Constraint::Min(3),    // Schedule list
            Constraint::Length(1), // Error slot
        ])
        .split(body);

    let (time_text, time_style) = text_display(kind, app.dashboard.text(TextSlot::ServerTime));
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Server time: ", Style::default().fg(Color::Yellow)),
            Span::styled(time_text, time_style),
        ])),
        chunks[0],
    );

    let items = list_items(kind, &app.dashboard.schedules);
    let has_rows = matches!(app.dashboard.schedules, ListContent::Rows(_));
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Schedules ")
                .padding(Padding::horizontal(1)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    if has_rows {
        state.select(Some(app.schedule_cursor));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);

    render_error_slot(frame, chunks[2], app, kind);
}
