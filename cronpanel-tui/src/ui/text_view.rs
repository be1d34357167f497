use super::*;
use crate::view::TextSlot;

pub fn render_logs_view(frame: &mut Frame, app: &App, body: Rect) {
    let kind = ResourceKind::Logs;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(body);

    // Raw text, shown as received
    let (text, style) = text_display(kind, app.dashboard.text(TextSlot::Logs));
    let paragraph = Paragraph::new(text)
        .style(style)
        .scroll((app.logs_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Logs ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(paragraph, chunks[0]);

    render_error_slot(frame, chunks[1], app, kind);
}

pub fn render_uptime_view(frame: &mut Frame, app: &App, body: Rect) {
    let kind = ResourceKind::Uptime;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Length(1), Constraint::Min(0)])
        .split(body);

    let (text, style) = text_display(kind, app.dashboard.text(TextSlot::Uptime));
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(text, style.add_modifier(Modifier::BOLD))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" Server uptime "));
    frame.render_widget(paragraph, chunks[0]);

    render_error_slot(frame, chunks[1], app, kind);
}
