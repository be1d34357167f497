use super::*;
use crate::app::{FormField, ScheduleAction, ScheduleForm};
use crate::view::SelectorContent;
use cronpanel_client::ServiceType;

pub fn render_resource_view(frame: &mut Frame, app: &App, body: Rect) {
    let Some(service) = app.active_service() else {
        return;
    };
    let kind = app.active_tab;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Resource list
            Constraint::Length(1), // Error slot
            Constraint::Length(7), // Schedule form
        ])
        .split(body);

    let title = match service {
        ServiceType::Project => " Projects ",
        ServiceType::Database => " Databases ",
    };
    let Some(content) = app.dashboard.list(kind) else {
        return;
    };
    let list = List::new(list_items(kind, content)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, chunks[0]);

    render_error_slot(frame, chunks[1], app, kind);
    render_form(frame, chunks[2], app, service);
}

fn render_form(frame: &mut Frame, area: Rect, app: &App, service: ServiceType) {
    let form = app.form(service);
    let label = |field: FormField, text: &'static str| {
        let style = if form.focused == field {
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        Span::styled(text, style)
    };

    let mut lines = vec![
        Line::from(
            [label(FormField::Service, "Service: ")]
                .into_iter()
                .chain(selector_spans(app, service))
                .collect::<Vec<_>>(),
        ),
        Line::from(vec![
            label(FormField::Action, "Action:  "),
            action_span(form, ScheduleAction::On),
            Span::raw(" "),
            action_span(form, ScheduleAction::Off),
        ]),
        Line::from(
            [label(FormField::Cron, "Cron:    ")]
                .into_iter()
                .chain(cron_spans(form))
                .collect::<Vec<_>>(),
        ),
    ];

    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" New {} schedule ", service))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}

fn selector_spans(app: &App, service: ServiceType) -> Vec<Span<'static>> {
    let selector = app.dashboard.selector(service);
    let muted = Style::default().fg(Color::DarkGray);
    match &selector.content {
        SelectorContent::Loading => vec![Span::styled("Loading...", muted)],
        SelectorContent::Failed => vec![Span::styled(
            "Error loading options",
            Style::default().fg(Color::Red),
        )],
        SelectorContent::Empty => vec![Span::styled(rows::empty_selector_message(service), muted)],
        SelectorContent::Options(options) => {
            let label = options
                .get(selector.selected)
                .map(|o| o.label.clone())
                .unwrap_or_default();
            vec![
                Span::styled("‹ ", muted),
                Span::styled(label, Style::default().fg(Color::White)),
                Span::styled(" ›", muted),
                Span::styled(
                    format!("  ({}/{})", selector.selected + 1, options.len()),
                    muted,
                ),
            ]
        }
    }
}

fn action_span(form: &ScheduleForm, action: ScheduleAction) -> Span<'static> {
    if form.action == action {
        Span::styled(
            format!("[{}]", action.as_str()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!(" {} ", action.as_str()),
            Style::default().fg(Color::DarkGray),
        )
    }
}

fn cron_spans(form: &ScheduleForm) -> Vec<Span<'static>> {
    let value = Style::default().fg(Color::White);
    if form.focused != FormField::Cron {
        if form.cron.value.is_empty() {
            return vec![Span::styled(
                "e.g. 0 22 * * *",
                Style::default().fg(Color::DarkGray),
            )];
        }
        return vec![Span::styled(form.cron.value.clone(), value)];
    }
    let (before, after) = form.cron.split_at_cursor();
    vec![
        Span::styled(before.to_string(), value),
        Span::styled("█", Style::default().fg(Color::Magenta)),
        Span::styled(after.to_string(), value),
    ]
}
