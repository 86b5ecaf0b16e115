use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::inbox::loader::LoadStatus;
use crate::inbox::render::{EMPTY_PLACEHOLDER, EmailCard};
use crate::terminal::state::{AppState, Screen};

pub fn render(f: &mut Frame, state: &AppState) {
    match state.screen {
        Screen::Login => render_login(f),
        Screen::Inbox => render_inbox(f, state),
    }
}

fn render_login(f: &mut Frame) {
    let [area] = Layout::vertical([Constraint::Fill(1)]).margin(1).areas(f.area());

    let block = Block::default()
        .title(" MailMind ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let p = Paragraph::new("Not signed in.\n\nPress Enter to sign in with your browser.")
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);

    render_hints(f, &[("Enter", " sign in  "), ("q", " quit")]);
}

fn render_inbox(f: &mut Frame, state: &AppState) {
    let [area] = Layout::vertical([Constraint::Fill(1)]).margin(1).areas(f.area());

    let block = Block::default()
        .title(" Inbox ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let status = state.loader.as_ref().map(|l| l.status());

    match status {
        // loader missing would mean an unadmitted mount; treat as loading
        None | Some(LoadStatus::Loading) => {
            f.render_widget(Paragraph::new("Loading emails…").block(block), area);
        }
        Some(LoadStatus::Failed(msg)) => {
            f.render_widget(
                Paragraph::new(msg.as_str())
                    .style(Style::default().fg(Color::Red))
                    .block(block),
                area,
            );
        }
        Some(LoadStatus::Loaded(_)) => {
            if state.cards.is_empty() {
                f.render_widget(Paragraph::new(EMPTY_PLACEHOLDER).block(block), area);
            } else {
                let items: Vec<ListItem> = state.cards.iter().map(card_item).collect();
                let list = List::new(items)
                    .block(block)
                    .highlight_symbol("➜ ")
                    .highlight_style(Style::default().fg(Color::Green));
                f.render_stateful_widget(list, area, &mut state.list_state.clone());
            }
        }
    }

    render_hints(f, &[("j/k", " move  "), ("l", " logout  "), ("q", " quit")]);
}

fn card_item(card: &EmailCard) -> ListItem<'_> {
    let sender = Span::styled(
        card.sender.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    );
    let preview = Span::styled(card.preview.clone(), Style::default().fg(Color::Gray));

    let mut meta = vec![
        Span::raw(card.type_label.clone()),
        Span::raw(" • "),
        Span::raw(format!("Confidence: {}", card.confidence_label)),
    ];
    if card.needs_review {
        meta.push(Span::styled(
            " • Needs Review",
            Style::default().fg(Color::Red),
        ));
    }

    ListItem::new(Text::from(vec![
        Line::from(sender),
        Line::from(preview),
        Line::from(meta),
    ]))
}

fn render_hints(f: &mut Frame, hints: &[(&str, &str)]) {
    let [_, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw((*action).to_string()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), footer);
}
