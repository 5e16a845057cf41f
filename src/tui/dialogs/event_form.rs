use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use monthcal::app::{AppState, FormField};

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.capture else {
        return;
    };

    let area = f.size();
    let form_width = area.width.min(60);
    let form_height = area.height.min(if form.error.is_some() { 14 } else { 12 });
    let x = (area.width.saturating_sub(form_width)) / 2;
    let y = (area.height.saturating_sub(form_height)) / 2;

    let form_area = ratatui::layout::Rect {
        x,
        y,
        width: form_width,
        height: form_height,
    };

    f.render_widget(Clear, form_area);

    let active_color = app.theme.selected_bg;
    let inactive_color = Color::DarkGray;
    let label_style = |field: FormField| {
        Style::default().fg(if form.active_field == field { active_color } else { inactive_color })
    };

    let mut form_text = vec![
        Line::from(vec![Span::styled(
            format!("Add Event for {}", form.date.format("%A, %B %d, %Y")),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Title: ", label_style(FormField::Title)),
            Span::raw(form.title.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Time: ", label_style(FormField::Time)),
            Span::raw(form.time_input_buffer.as_str()),
            Span::styled(
                if form.active_field == FormField::Time && !form.time_buffer_touched {
                    " [type to replace]"
                } else {
                    ""
                },
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled("Description: ", label_style(FormField::Description)),
            Span::raw(form.description.as_str()),
        ]),
        Line::from(""),
    ];

    if let Some(error) = &form.error {
        form_text.push(Line::from(vec![Span::styled(
            error.as_str(),
            Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD),
        )]));
        form_text.push(Line::from(""));
    }

    form_text.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(" = Next field | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" = Save | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" = Cancel"),
    ]));

    let form_paragraph = Paragraph::new(form_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" New Event ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
