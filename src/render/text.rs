use std::io::{self, Write};

use tracing::warn;

use super::Renderer;
use crate::models::{DisplayModel, QueryKind, SearchRecord};
use crate::utils::{format_timestamp, single_line, strip_ansi_codes};

const HISTORY_QUERY_WIDTH: usize = 40;

/// Plain-text renderer for one-shot CLI commands
pub struct TextRenderer<W: Write> {
    out: W,
    err: W,
    show_history: bool,
    show_loading: bool,
}

impl TextRenderer<Box<dyn Write>> {
    /// Results to stdout, errors and progress to stderr
    pub fn stdio() -> Self {
        TextRenderer::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, err: W) -> Self {
        Self { out, err, show_history: true, show_loading: false }
    }

    /// Whether history changes are printed (off for plain searches)
    pub fn with_history(mut self, show: bool) -> Self {
        self.show_history = show;
        self
    }

    /// Whether a "Searching..." line is printed before the request
    pub fn with_loading(mut self, show: bool) -> Self {
        self.show_loading = show;
        self
    }

    pub fn into_inner(self) -> (W, W) {
        (self.out, self.err)
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Failed to write output");
        }
    }

    fn emit_err(&mut self, text: &str) {
        if let Err(e) = self.err.write_all(text.as_bytes()).and_then(|_| self.err.flush()) {
            warn!(error = %e, "Failed to write error output");
        }
    }
}

/// Text form of a display model, sanitized for the terminal
pub fn format_display_model(model: &DisplayModel) -> String {
    let mut lines = vec![strip_ansi_codes(&model.summary)];

    if let Some(rating) = &model.rating {
        lines.push(format!("  Rating: {}", strip_ansi_codes(rating)));
    }
    if let Some(air_date) = &model.air_date {
        lines.push(format!("  {}", strip_ansi_codes(air_date)));
    } else if let Some(stats) = &model.keyword_stats {
        lines.push(format!("  {}", strip_ansi_codes(&stats.match_line)));
        if let Some(detail) = &stats.detail_line {
            lines.push(format!("    {}", strip_ansi_codes(detail)));
        }
    }
    if let Some(image) = &model.image_url {
        lines.push(format!("  Image: {}", strip_ansi_codes(image)));
    }
    if let Some(url) = &model.external_url {
        lines.push(format!("  Link: {}", strip_ansi_codes(url)));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Numbered, most-recent-first history listing
pub fn format_history(history: &[SearchRecord]) -> String {
    if history.is_empty() {
        return "No recent searches\n".to_string();
    }

    let mut text = format!("Recent searches ({}):\n", history.len());
    for (idx, record) in history.iter().enumerate() {
        let mark = if record.succeeded { "✓" } else { "✗" };
        text.push_str(&format!(
            "{:>3}. {} [{:<7}] {:<width$}  {:>10}  {}\n",
            idx + 1,
            mark,
            record.kind.to_string(),
            single_line(&record.query, HISTORY_QUERY_WIDTH),
            format_timestamp(&record.created_at),
            record.id,
            width = HISTORY_QUERY_WIDTH,
        ));
    }
    text
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render_loading(&mut self, kind: QueryKind, query: &str) {
        if self.show_loading {
            let line = format!("Searching {} for \"{}\"...\n", kind, single_line(query, 60));
            self.emit_err(&line);
        }
    }

    fn render_result(&mut self, model: &DisplayModel) {
        let text = format_display_model(model);
        self.emit(&text);
    }

    fn render_error(&mut self, message: &str) {
        let line = format!("Error: {}\n", single_line(message, 200));
        self.emit_err(&line);
    }

    fn render_history(&mut self, history: &[SearchRecord]) {
        if self.show_history {
            let text = format_history(history);
            self.emit(&text);
        }
    }
}
