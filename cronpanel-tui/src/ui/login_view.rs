use super::utils::centered_rect;
use super::*;

pub fn render_login_view(frame: &mut Frame, app: &App) {
    let area = centered_rect(64, 12, frame.area());
    frame.render_widget(Clear, area);

    let masked = "•".repeat(app.login.token.value.chars().count());
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enter your control-plane API token.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Token: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                masked,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    if app.login.submitting {
        lines.push(Line::from(Span::styled(
            "Checking token...",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    } else if let Some(err) = &app.login.error {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": Log in  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(": Quit"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(
                    format!(" Login · {} ", app.target_label),
                    Style::default().fg(Color::Yellow),
                ))
                .padding(Padding::horizontal(2)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}
