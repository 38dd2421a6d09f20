use crate::dashboard::app::{DashboardApp, QUICK_ACTIONS, Status};
use crate::providers::Role;
use crate::utils::text::wrap_text;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(app: &mut DashboardApp, frame: &mut Frame) {
    let [header_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    // Header
    let header = Paragraph::new(Line::from(vec![
        Span::styled("Banking Bot", Style::default().fg(Color::Cyan).bold()),
        Span::raw("  "),
        Span::styled(
            format!("model: {}", app.session.model()),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, header_area);

    // Conversation panel
    let inner_width = chat_area.width.saturating_sub(2).max(10) as usize;
    let inner_height = chat_area.height.saturating_sub(2) as usize;

    let lines = conversation_lines(app, inner_width);
    let total = lines.len();
    let max_scroll = total.saturating_sub(inner_height) as u16;
    if app.stick_to_bottom || app.scroll > max_scroll {
        app.scroll = max_scroll;
    }
    if app.scroll == max_scroll {
        app.stick_to_bottom = true;
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Conversation "))
        .scroll((app.scroll, 0));
    frame.render_widget(chat, chat_area);

    // Input line
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan).bold()),
        Span::raw(app.input.as_str()),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Your message "));
    frame.render_widget(input, input_area);

    // Status bar
    let footer = match (&app.status, &app.last_error) {
        (Status::Thinking, _) => Line::from(Span::styled(
            format!(" {} Thinking...", app.spinner()),
            Style::default().fg(Color::Yellow),
        )),
        (_, Some(error)) => Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(Color::Red),
        )),
        _ => Line::from(Span::styled(
            " Enter send · Ctrl+L clear · PgUp/PgDn scroll · Esc quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn conversation_lines(app: &DashboardApp, width: usize) -> Vec<Line<'static>> {
    let history = app.session.history();

    if history.is_empty() {
        let mut lines = vec![
            Line::from(Span::styled(
                "I'm here to help with your banking needs.",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::raw("Try one of these to get started:")),
        ];
        for (i, (label, prompt)) in QUICK_ACTIONS.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  F{} {}", i + 1, label),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("  - {}", prompt),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
        return lines;
    }

    let mut lines = Vec::new();
    for message in history {
        let (label, color) = match message.role {
            Role::User => ("You", Color::Cyan),
            Role::Assistant => ("Bot", Color::Green),
            Role::System => ("System", Color::Yellow),
        };

        for (i, wrapped) in wrap_text(&message.content, width.saturating_sub(5))
            .into_iter()
            .enumerate()
        {
            let prefix = if i == 0 {
                Span::styled(format!("{:>4} ", label), Style::default().fg(color).bold())
            } else {
                Span::raw("     ")
            };
            lines.push(Line::from(vec![prefix, Span::raw(wrapped)]));
        }
        lines.push(Line::default());
    }
    lines
}
