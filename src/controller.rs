//! Search controller: wires transport, response parser, history, and renderer.
//!
//! # Concurrency
//!
//! Every entry point takes `&mut self`, so one submission is in flight per
//! controller and the history's remove-then-insert runs as one unit. A host
//! that shares a controller across threads wraps it in a `Mutex`. Responses are
//! applied in the order they complete; there is no cancellation.

use thiserror::Error;
use tracing::{info, warn};

use crate::history::HistoryStore;
use crate::models::{DisplayModel, QueryKind, SearchRecord, SearchRequest};
use crate::parsers::parse_response;
use crate::render::Renderer;
use crate::storage::KeyValueStore;
use crate::transport::Transport;

/// Keyword-search result count sent when none is configured
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Submissions the controller refuses before contacting the service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please enter a search query")]
    EmptyQuery,

    #[error("No recent search with id {0}")]
    UnknownHistoryEntry(String),
}

/// What a completed submission produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The service answered; the model may still be a "no match" summary
    Found(DisplayModel),
    /// Transport failure, with the message shown to the user
    Failed(String),
}

impl SearchOutcome {
    /// Whether the attempt is logged as a success
    pub fn succeeded(&self) -> bool {
        matches!(self, SearchOutcome::Found(model) if model.is_usable())
    }
}

pub struct SearchController<T: Transport, S: KeyValueStore, R: Renderer> {
    transport: T,
    history: HistoryStore<S>,
    renderer: R,
    max_results: usize,
}

impl<T: Transport, S: KeyValueStore, R: Renderer> SearchController<T, S, R> {
    pub fn new(transport: T, history: HistoryStore<S>, renderer: R) -> Self {
        Self { transport, history, renderer, max_results: DEFAULT_MAX_RESULTS }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// Submit a query of the given kind
    ///
    /// The attempt is recorded in history whether or not the transport
    /// succeeds; transport failures come back as [`SearchOutcome::Failed`].
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::EmptyQuery`] for a blank query; nothing is sent
    /// or recorded in that case.
    pub fn on_submit(
        &mut self,
        kind: QueryKind,
        query: &str,
    ) -> Result<SearchOutcome, SubmitError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SubmitError::EmptyQuery);
        }

        self.renderer.render_loading(kind, query);

        let request = SearchRequest::new(kind, query, self.max_results);
        let outcome = match self.transport.search(&request) {
            Ok(raw) => SearchOutcome::Found(parse_response(&raw)),
            Err(e) => {
                warn!(%kind, error = %e, "Search failed");
                SearchOutcome::Failed(e.to_string())
            }
        };

        match &outcome {
            SearchOutcome::Found(model) => self.renderer.render_result(model),
            SearchOutcome::Failed(message) => self.renderer.render_error(message),
        }

        let succeeded = outcome.succeeded();
        info!(%kind, succeeded, "Search completed");
        if let Err(e) = self.history.record(query, kind, succeeded) {
            warn!(error = %e, "Failed to save search history");
        }
        self.renderer.render_history(self.history.list());

        Ok(outcome)
    }

    /// Re-run a past search, promoting it to most recent
    pub fn on_history_select(&mut self, id: &str) -> Result<SearchOutcome, SubmitError> {
        let (kind, query) = match self.history.get(id) {
            Some(record) => (record.kind, record.query.clone()),
            None => return Err(SubmitError::UnknownHistoryEntry(id.to_string())),
        };
        self.on_submit(kind, &query)
    }

    pub fn on_history_remove(&mut self, id: &str) {
        if let Err(e) = self.history.remove(id) {
            warn!(error = %e, "Failed to save search history");
        }
        self.renderer.render_history(self.history.list());
    }

    pub fn on_history_clear(&mut self) {
        if let Err(e) = self.history.clear() {
            warn!(error = %e, "Failed to save search history");
        }
        self.renderer.render_history(self.history.list());
    }

    /// Render the current history without changing it
    pub fn show_history(&mut self) {
        self.renderer.render_history(self.history.list());
    }

    pub fn history(&self) -> &[SearchRecord] {
        self.history.list()
    }

    pub fn history_store(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the controller, keeping what was rendered
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::transport::TransportError;

    /// Storage that reads as empty and refuses every write
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn read(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            anyhow::bail!("read-only storage")
        }

        fn delete(&mut self, _key: &str) -> anyhow::Result<()> {
            anyhow::bail!("read-only storage")
        }
    }

    /// Transport that replays canned replies and remembers requests
    struct ScriptedTransport {
        replies: RefCell<VecDeque<Result<String, TransportError>>>,
        requests: RefCell<Vec<SearchRequest>>,
    }

    impl ScriptedTransport {
        fn new(replies: Vec<Result<String, TransportError>>) -> Self {
            Self { replies: RefCell::new(replies.into()), requests: RefCell::new(Vec::new()) }
        }
    }

    impl Transport for ScriptedTransport {
        fn search(&self, request: &SearchRequest) -> Result<String, TransportError> {
            self.requests.borrow_mut().push(request.clone());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".into())))
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        events: Vec<String>,
        last_history_len: Option<usize>,
    }

    impl Renderer for RecordingRenderer {
        fn render_loading(&mut self, kind: QueryKind, query: &str) {
            self.events.push(format!("loading {} {}", kind, query));
        }

        fn render_result(&mut self, model: &DisplayModel) {
            self.events.push(format!("result {}", model.summary));
        }

        fn render_error(&mut self, message: &str) {
            self.events.push(format!("error {}", message));
        }

        fn render_history(&mut self, history: &[SearchRecord]) {
            self.events.push("history".to_string());
            self.last_history_len = Some(history.len());
        }
    }

    fn controller(
        replies: Vec<Result<String, TransportError>>,
    ) -> SearchController<ScriptedTransport, MemoryStore, RecordingRenderer> {
        SearchController::new(
            ScriptedTransport::new(replies),
            HistoryStore::open(MemoryStore::new()),
            RecordingRenderer::default(),
        )
    }

    #[test]
    fn test_submit_success_parses_and_records() {
        let mut c = controller(vec![Ok("The Soup Nazi\nIMDb Rating: 9.2".into())]);

        let outcome = c.on_submit(QueryKind::Scene, "  no soup for you ").unwrap();

        match outcome {
            SearchOutcome::Found(model) => assert_eq!(model.rating.as_deref(), Some("9.2")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(c.history()[0].query, "no soup for you");
        assert!(c.history()[0].succeeded);
        assert_eq!(
            c.renderer().events,
            vec!["loading scene no soup for you", "result The Soup Nazi", "history"]
        );
    }

    #[test]
    fn test_submit_failure_is_recorded_and_surfaced() {
        let mut c = controller(vec![Err(TransportError::Rejected {
            status: 500,
            message: "failed to search episodes".into(),
        })]);

        let outcome = c.on_submit(QueryKind::Keyword, "bet").unwrap();

        assert_eq!(outcome, SearchOutcome::Failed("failed to search episodes".into()));
        assert!(!c.history()[0].succeeded);
        assert!(c.renderer().events.contains(&"error failed to search episodes".to_string()));
    }

    #[test]
    fn test_no_match_response_is_recorded_as_unsuccessful() {
        let mut c = controller(vec![Ok("No matching episodes found.".into())]);
        let outcome = c.on_submit(QueryKind::Scene, "a purple dinosaur").unwrap();

        assert!(matches!(outcome, SearchOutcome::Found(_)));
        assert!(!outcome.succeeded());
        assert!(!c.history()[0].succeeded);
    }

    #[test]
    fn test_blank_query_is_rejected_without_side_effects() {
        let mut c = controller(vec![]);
        assert_eq!(c.on_submit(QueryKind::Scene, "   "), Err(SubmitError::EmptyQuery));
        assert!(c.history().is_empty());
        assert!(c.renderer().events.is_empty());
        assert!(c.transport.requests.borrow().is_empty());
    }

    #[test]
    fn test_keyword_request_carries_max_results() {
        let mut c = controller(vec![Ok("The Contest".into())]).with_max_results(3);
        c.on_submit(QueryKind::Keyword, "bet, contest").unwrap();

        assert_eq!(
            c.transport.requests.borrow()[0],
            SearchRequest::Keyword { keywords: "bet, contest".into(), max_results: 3 }
        );
    }

    #[test]
    fn test_history_select_reruns_and_promotes() {
        let mut c = controller(vec![
            Err(TransportError::Network("down".into())),
            Ok("The Pen".into()),
            Ok("The Pen".into()),
        ]);
        c.on_submit(QueryKind::Scene, "pen").unwrap();
        c.on_submit(QueryKind::Keyword, "florida").unwrap();
        let id = c.history()[1].id.clone();

        let outcome = c.on_history_select(&id).unwrap();

        assert!(outcome.succeeded());
        assert_eq!(c.history().len(), 2);
        assert_eq!(c.history()[0].query, "pen");
        assert_eq!(c.history()[0].kind, QueryKind::Scene);
        assert!(c.history()[0].succeeded);
    }

    #[test]
    fn test_history_select_unknown_id() {
        let mut c = controller(vec![]);
        assert_eq!(
            c.on_history_select("missing"),
            Err(SubmitError::UnknownHistoryEntry("missing".into()))
        );
    }

    #[test]
    fn test_remove_and_clear_rerender_history() {
        let mut c = controller(vec![Ok("A".into()), Ok("B".into())]);
        c.on_submit(QueryKind::Scene, "a").unwrap();
        c.on_submit(QueryKind::Scene, "b").unwrap();
        let id = c.history()[0].id.clone();

        c.on_history_remove(&id);
        assert_eq!(c.renderer().last_history_len, Some(1));

        c.on_history_clear();
        assert_eq!(c.renderer().last_history_len, Some(0));
        assert!(c.history().is_empty());
    }

    #[test]
    fn test_later_response_is_applied_even_if_older_query() {
        // No cancellation: each completed response lands in history in completion order
        let mut c = controller(vec![Ok("First".into()), Ok("Second".into())]);
        c.on_submit(QueryKind::Scene, "newer").unwrap();
        c.on_submit(QueryKind::Scene, "older").unwrap();

        assert_eq!(c.history()[0].query, "older");
        assert_eq!(c.renderer().events.last().map(String::as_str), Some("history"));
        assert!(c.renderer().events.contains(&"result Second".to_string()));
    }

    #[test]
    fn test_submit_succeeds_when_history_cannot_be_saved() {
        let mut c = SearchController::new(
            ScriptedTransport::new(vec![Ok("The Soup Nazi".into())]),
            HistoryStore::open(ReadOnlyStore),
            RecordingRenderer::default(),
        );

        let outcome = c.on_submit(QueryKind::Scene, "soup").unwrap();

        assert!(outcome.succeeded());
        assert_eq!(c.history().len(), 1);
        assert_eq!(c.history()[0].query, "soup");
        assert_eq!(c.renderer().last_history_len, Some(1));
    }
}
