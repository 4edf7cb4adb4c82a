//! TUI application state and event handling.
//!
//! The `App` owns a [`SearchController`] whose renderer is the [`TuiView`]
//! drawn each frame. It manages:
//!
//! - **Search form**: tab-switched query kind and a single-line input
//! - **Loading state**: a submitted search is drawn as "Searching…" for one
//!   frame before the blocking request runs, so one search is in flight at a time
//! - **History pane**: selection, re-run, removal, clearing
//! - **Status messages**: transient feedback for clipboard operations
//! - **Dirty state tracking**: redraw only when state changes

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::warn;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use super::view::TuiView;
use crate::clipboard::copy_link;
use crate::controller::{SearchController, SubmitError};
use crate::history::HistoryStore;
use crate::models::QueryKind;
use crate::render::Renderer;
use crate::storage::KeyValueStore;
use crate::transport::Transport;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest accepted query
const MAX_INPUT_CHARS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Search waiting for its loading frame to be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingSearch {
    Submit { kind: QueryKind, query: String },
    Rerun { id: String },
}

pub struct App<T: Transport, S: KeyValueStore> {
    controller: SearchController<T, S, TuiView>,
    kind: QueryKind,
    input: String,
    selected_idx: usize,
    pending: Option<PendingSearch>,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl<T: Transport, S: KeyValueStore> App<T, S> {
    pub fn new(transport: T, history: HistoryStore<S>, max_results: usize) -> Self {
        let mut controller = SearchController::new(transport, history, TuiView::default())
            .with_max_results(max_results);
        controller.show_history();

        Self {
            controller,
            kind: QueryKind::Scene,
            input: String::new(),
            selected_idx: 0,
            pending: None,
            should_quit: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    fn view(&self) -> &TuiView {
        self.controller.renderer()
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn check_and_clear_expired_status(&mut self) {
        let expired = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if expired {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();

            if self.view().dirty {
                self.controller.renderer_mut().dirty = false;
                self.clamp_selection();
                self.needs_redraw = true;
            }

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            if self.needs_redraw
                || now.duration_since(self.last_draw_time) >= Duration::from_millis(100)
            {
                terminal.draw(|f| {
                    let state = RenderState {
                        kind: self.kind,
                        input: &self.input,
                        view: self.controller.renderer(),
                        selected_idx: self.selected_idx,
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            // The loading frame is on screen; now block on the request
            if let Some(pending) = self.pending.take() {
                self.execute(pending);
                continue;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn handle_action(&mut self, action: Action) {
        if self.pending.is_some() {
            // One search in flight; only quitting is honored until it lands
            if action == Action::Quit {
                self.should_quit = true;
            }
            return;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearInput => {
                if self.input.is_empty() {
                    self.should_quit = true;
                } else {
                    self.input.clear();
                    self.needs_redraw = true;
                }
            }
            Action::Submit => self.submit(),
            Action::ToggleKind => {
                self.kind = self.kind.toggled();
                self.needs_redraw = true;
            }
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::RerunSelected => {
                if let Some(record) = self.view().history.get(self.selected_idx) {
                    let (id, kind, query) = (record.id.clone(), record.kind, record.query.clone());
                    self.kind = kind;
                    self.input = query.clone();
                    self.controller.renderer_mut().render_loading(kind, &query);
                    self.pending = Some(PendingSearch::Rerun { id });
                }
            }
            Action::RemoveSelected => {
                if let Some(id) = self.view().history.get(self.selected_idx).map(|r| r.id.clone()) {
                    self.controller.on_history_remove(&id);
                }
            }
            Action::ClearHistory => {
                if !self.view().history.is_empty() {
                    self.controller.on_history_clear();
                    self.selected_idx = 0;
                }
            }
            Action::CopyLink => self.copy_link(),
            Action::InputChar(c) => {
                if self.input.chars().count() < MAX_INPUT_CHARS {
                    self.input.push(c);
                    self.needs_redraw = true;
                }
            }
            Action::DeleteChar => {
                if self.input.pop().is_some() {
                    self.needs_redraw = true;
                }
            }
            Action::None => {}
        }
    }

    fn submit(&mut self) {
        let query = self.input.trim().to_string();
        if query.is_empty() {
            self.set_status(
                format!("✗ {}", SubmitError::EmptyQuery),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            );
            return;
        }
        self.controller.renderer_mut().render_loading(self.kind, &query);
        self.pending = Some(PendingSearch::Submit { kind: self.kind, query });
    }

    fn execute(&mut self, pending: PendingSearch) {
        let result = match pending {
            PendingSearch::Submit { kind, query } => self.controller.on_submit(kind, &query),
            PendingSearch::Rerun { id } => self.controller.on_history_select(&id),
        };

        match result {
            Ok(_) => self.selected_idx = 0,
            Err(e) => {
                warn!(error = %e, "Search was not submitted");
                self.controller.renderer_mut().render_error(&e.to_string());
            }
        }
    }

    fn copy_link(&mut self) {
        let Some(model) = self.view().model().cloned() else {
            self.set_status("✗ No result to copy", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };
        match copy_link(&model) {
            Ok(link) => self.set_status(
                format!("✓ Copied {}", link),
                MessageType::Success,
                STATUS_SUCCESS_DURATION_MS,
            ),
            Err(e) => self.set_status(
                format!("✗ Clipboard error: {}", e),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.view().history.len();
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    fn clamp_selection(&mut self) {
        let total = self.view().history.len();
        self.selected_idx = self.selected_idx.min(total.saturating_sub(1));
    }
}
