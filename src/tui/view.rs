// File: src/tui/view.rs
use crate::model::EventType;
use crate::model::display::{EMPTY_VIEW_MESSAGE, format_due_date, format_window_header};
use crate::tui::state::{AppState, InputMode};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

fn type_color(kind: EventType) -> Color {
    match kind {
        EventType::Exam => Color::Red,
        EventType::Quiz => Color::Yellow,
        EventType::Assignment => Color::Cyan,
        EventType::Project => Color::Magenta,
        EventType::Reading => Color::Green,
        EventType::Other => Color::Gray,
    }
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    state.refresh_filtered_view();

    let full_help_text = vec![
        Line::from(vec![
            Span::styled(
                " VIEWS ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" t:Tomorrow  w:This Week  m:This Month  a:All Upcoming"),
        ]),
        Line::from(vec![
            Span::styled(
                " FILTER ",
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" /:Search  Esc:Clear Search  f/F:Cycle Type"),
        ]),
        Line::from(vec![
            Span::styled(
                " NAVIGATION ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" j/k:Up/Down  r:Reload  ?:Toggle Help  q:Quit"),
        ]),
    ];

    let footer_height = if state.show_full_help {
        Constraint::Length(full_help_text.len() as u16 + 2)
    } else {
        Constraint::Length(3)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), footer_height])
        .split(f.area());

    // --- 1. Header ---
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format_window_header(state.view, &state.range),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   [{}]", state.type_filter)),
        Span::styled(
            format!("   {}", state.identity.email),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Syllabus Radar "));
    f.render_widget(header, v_chunks[0]);

    // --- 2. Event list ---
    let list_title = if state.loading {
        " Deadlines (loading...) ".to_string()
    } else {
        format!(" Deadlines ({}) ", state.shown.len())
    };

    if state.shown.is_empty() {
        let empty = Paragraph::new(if state.loading { "" } else { EMPTY_VIEW_MESSAGE })
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(list_title));
        f.render_widget(empty, v_chunks[1]);
    } else {
        let items: Vec<ListItem> = state
            .shown
            .iter()
            .map(|r| {
                let kind = r.event.effective_type();
                let when = match &r.due_date {
                    Some(dt) => format_due_date(dt),
                    None => r.event.due_text.clone(),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<24}", when),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!("{:<11}", kind.to_string()),
                        Style::default().fg(type_color(kind)),
                    ),
                    Span::raw(r.event.title.clone()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(list_title))
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        f.render_stateful_widget(list, v_chunks[1], &mut state.list_state);
    }

    // --- 3. Footer ---
    match state.mode {
        InputMode::Searching => {
            let input = Paragraph::new(format!("/{}", state.input_buffer))
                .style(Style::default().fg(Color::Yellow))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Search (Enter:Apply  Esc:Cancel) "),
                );
            f.render_widget(input, v_chunks[2]);
        }
        InputMode::Normal if state.show_full_help => {
            let help = Paragraph::new(full_help_text)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(" Help "));
            f.render_widget(help, v_chunks[2]);
        }
        InputMode::Normal => {
            let mut status = state.message.clone();
            if !state.active_search_query.is_empty() {
                status.push_str(&format!("  | Search: {}", state.active_search_query));
            }
            let footer = Paragraph::new(status).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" ?:Help  q:Quit "),
            );
            f.render_widget(footer, v_chunks[2]);
        }
    }
}
