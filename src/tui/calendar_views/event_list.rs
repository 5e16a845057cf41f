use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use monthcal::app::AppState;

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let events = app.events_for_date(app.selected_date);

    let title = format!("Events on {}", app.selected_date.format("%B %d, %Y"));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    if events.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("No events", Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        // Listed in the order they were added.
        for event in events {
            lines.push(Line::from(vec![
                Span::styled(event.time.as_str(), Style::default().fg(Color::Green)),
                Span::raw(" "),
                Span::styled(event.title.as_str(), Style::default().fg(Color::White)),
            ]));

            if !event.description.is_empty() {
                lines.push(Line::from(vec![
                    Span::raw("      "),
                    Span::styled(event.description.as_str(), Style::default().fg(Color::DarkGray)),
                ]));
            }

            lines.push(Line::from(""));
        }
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
