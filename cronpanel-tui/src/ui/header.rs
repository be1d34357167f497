use super::*;
use ratatui::widgets::Tabs;

pub fn render_title(frame: &mut Frame, area: Rect, app: &mut App) {
    const LABEL: &str = " cronpanel";

    // Throbber spins while any region is loading, full symbol when idle
    let throbber_area = Rect {
        x: area.x + 1,
        y: area.y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading() {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);

    let line = Line::from(vec![
        Span::styled(LABEL, Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("  {}", app.target_label),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), label_area);
}

pub fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = ResourceKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let mut spans = vec![Span::raw(format!("{} {}", i + 1, kind.label()))];
            if app.dashboard.error(*kind).is_some() {
                spans.push(Span::styled(" !", Style::default().fg(Color::Red)));
            }
            Line::from(spans)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab_index())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}
