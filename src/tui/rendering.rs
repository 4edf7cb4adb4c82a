use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use super::view::{ResultPane, TuiView};
use crate::models::{DisplayModel, QueryKind, SearchRecord};
use crate::utils::{format_timestamp, single_line, strip_ansi_codes};

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const RATING: Color = Color::Rgb(234, 179, 8);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// Borrowed state needed to draw one frame
pub struct RenderState<'a> {
    pub kind: QueryKind,
    pub input: &'a str,
    pub view: &'a TuiView,
    pub selected_idx: usize,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, layout.tabs_area, state.kind);
    render_input(frame, layout.input_area, state.kind, state.input);
    render_result(frame, layout.result_area, &state.view.result);
    render_history(frame, layout.history_area, &state.view.history, state.selected_idx);
    render_status_bar(frame, layout.status_area, state);
}

fn render_tabs(frame: &mut Frame, area: Rect, active: QueryKind) {
    let tab = |kind: QueryKind| {
        let style = if kind == active {
            Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        Span::styled(format!(" {} ", kind.label()), style)
    };

    let line = Line::from(vec![
        tab(QueryKind::Scene),
        Span::raw(" "),
        tab(QueryKind::Keyword),
        Span::styled("   Tab: switch", Style::default().fg(MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_input(frame: &mut Frame, area: Rect, kind: QueryKind, input: &str) {
    let (title, placeholder) = match kind {
        QueryKind::Scene => {
            (" Describe the scene ", "e.g. George pretends to be a marine biologist")
        }
        QueryKind::Keyword => (" Keywords ", "e.g. contest, bet, master of my domain"),
    };

    let content = if input.is_empty() {
        Line::from(Span::styled(placeholder, Style::default().fg(MUTED)))
    } else {
        Line::from(vec![Span::raw(input), Span::styled("▏", Style::default().fg(ACCENT))])
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT))
            .title(title),
    );
    frame.render_widget(paragraph, area);
}

fn result_lines(model: &DisplayModel) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        strip_ansi_codes(&model.summary),
        Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
    ))];

    if let Some(rating) = &model.rating {
        lines.push(Line::from(vec![
            Span::styled("★ IMDb ", Style::default().fg(RATING)),
            Span::raw(strip_ansi_codes(rating)),
        ]));
    }

    if let Some(air_date) = &model.air_date {
        lines.push(Line::from(Span::styled(
            strip_ansi_codes(air_date),
            Style::default().fg(MUTED),
        )));
    } else if let Some(stats) = &model.keyword_stats {
        lines.push(Line::from(Span::styled(
            strip_ansi_codes(&stats.match_line),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if let Some(detail) = &stats.detail_line {
            lines.push(Line::from(Span::styled(
                strip_ansi_codes(detail),
                Style::default().fg(MUTED),
            )));
        }
    }

    if model.image_url.is_some() || model.external_url.is_some() {
        lines.push(Line::from(""));
    }
    if let Some(image) = &model.image_url {
        lines.push(Line::from(vec![
            Span::styled("Image: ", Style::default().fg(MUTED)),
            Span::raw(strip_ansi_codes(image)),
        ]));
    }
    if let Some(url) = &model.external_url {
        lines.push(Line::from(vec![
            Span::styled("IMDb: ", Style::default().fg(MUTED)),
            Span::styled(strip_ansi_codes(url), Style::default().fg(ACCENT)),
            Span::styled("  (Ctrl+Y to copy)", Style::default().fg(MUTED)),
        ]));
    }

    lines
}

fn render_result(frame: &mut Frame, area: Rect, pane: &ResultPane) {
    let content = match pane {
        ResultPane::Empty => Text::from(Line::from(Span::styled(
            "Type a query and press Enter to find the episode",
            Style::default().fg(MUTED),
        ))),
        ResultPane::Loading { kind, query } => Text::from(vec![
            Line::from(Span::styled("Searching…", Style::default().fg(ACCENT))),
            Line::from(Span::styled(
                format!("{}: {}", kind.label(), single_line(query, 80)),
                Style::default().fg(MUTED),
            )),
        ]),
        ResultPane::Found(model) => Text::from(result_lines(model)),
        ResultPane::Error(message) => Text::from(Line::from(Span::styled(
            strip_ansi_codes(message),
            Style::default().fg(ERROR),
        ))),
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(" Result "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_history(frame: &mut Frame, area: Rect, history: &[SearchRecord], selected_idx: usize) {
    let items: Vec<ListItem> = history
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let mark = if record.succeeded { "✓" } else { "✗" };
            let kind = match record.kind {
                QueryKind::Scene => "S",
                QueryKind::Keyword => "K",
            };
            let content = format!(
                "{} {} {:>9} {}",
                mark,
                kind,
                format_timestamp(&record.created_at),
                single_line(&record.query, 60)
            );

            let style = if idx == selected_idx {
                Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD)
            } else if record.succeeded {
                Style::default().fg(MUTED)
            } else {
                Style::default().fg(ERROR)
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let title = format!(" Recent searches ({}) ", history.len());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(title),
    );

    frame.render_widget(list, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (status_text, style) = if let Some(message) = state.status_message {
        let fg = match message.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => ERROR,
        };
        (format!(" {} ", message.text), Style::default().fg(fg).bg(BAR_BG))
    } else {
        let mut parts = vec![format!("[{}]", state.kind.label().to_uppercase())];
        if state.view.is_loading() {
            parts.push("searching".to_string());
        }
        if !state.view.history.is_empty() {
            parts.push(format!("entry {}/{}", state.selected_idx + 1, state.view.history.len()));
            parts.push("Ctrl+R: rerun".to_string());
            parts.push("Ctrl+D: remove".to_string());
            parts.push("Ctrl+L: clear".to_string());
        }
        parts.push("Enter: search".to_string());
        parts.push("Ctrl+C: quit".to_string());

        (format!(" {} ", parts.join(" | ")), Style::default().fg(BRIGHT).bg(BAR_BG))
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
