/// End-to-end integration tests for the episode finder client
///
/// These tests verify complete workflows: submit → parse → record → render
mod common;

use episode_finder::history::HistoryStore;
use episode_finder::models::{QueryKind, SearchRequest};
use episode_finder::render::TextRenderer;
use episode_finder::storage::FileStore;
use episode_finder::transport::TransportError;
use episode_finder::{SearchController, SearchOutcome};

use common::{DataDirBuilder, ScriptedTransport, contest_response, soup_nazi_response};

type TestController = SearchController<ScriptedTransport, FileStore, TextRenderer<Vec<u8>>>;

fn controller(transport: ScriptedTransport, dir: &std::path::Path) -> TestController {
    let history = HistoryStore::open(FileStore::open(dir).unwrap());
    let renderer = TextRenderer::new(Vec::new(), Vec::new()).with_history(false);
    SearchController::new(transport, history, renderer)
}

fn output(controller: TestController) -> (String, String) {
    let (out, err) = controller.into_renderer().into_inner();
    (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

#[test]
fn test_e2e_scene_search_prints_and_persists() {
    let data_dir = DataDirBuilder::new();
    let mut c = controller(ScriptedTransport::new(vec![Ok(soup_nazi_response())]), data_dir.path());

    let outcome = c.on_submit(QueryKind::Scene, "man refuses to serve soup").unwrap();
    assert!(outcome.succeeded());

    // History file written in the data directory
    let stored = std::fs::read_to_string(data_dir.history_path()).unwrap();
    assert!(stored.contains("man refuses to serve soup"));

    let (out, err) = output(c);
    assert!(out.contains("Season 7, Episode 6: The Soup Nazi"));
    assert!(out.contains("Rating: 9.2/10 (6,000 votes)"));
    assert!(out.contains("Original Air Date: 1995-11-02"));
    assert!(out.contains("Link: https://www.imdb.com/title/tt0697782/"));
    assert!(err.is_empty());
}

#[test]
fn test_e2e_keyword_search_shows_stats_instead_of_air_date() {
    let data_dir = DataDirBuilder::new();
    let transport = ScriptedTransport::new(vec![Ok(contest_response())]);
    let mut c = controller(transport, data_dir.path()).with_max_results(5);

    let outcome = c.on_submit(QueryKind::Keyword, "bet, contest").unwrap();

    match &outcome {
        SearchOutcome::Found(model) => {
            assert!(model.air_date.is_none());
            let stats = model.keyword_stats.as_ref().unwrap();
            assert_eq!(stats.match_line, "Matched 3/4 keywords");
            assert_eq!(
                stats.detail_line.as_deref(),
                Some("Keywords found: bet, contest, master of my domain")
            );
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_e2e_transport_failure_is_reported_and_recorded() {
    let data_dir = DataDirBuilder::new();
    let transport = ScriptedTransport::new(vec![Err(TransportError::Rejected {
        status: 500,
        message: "failed to search episodes".into(),
    })]);
    let mut c = controller(transport, data_dir.path());

    let outcome = c.on_submit(QueryKind::Scene, "pez dispenser").unwrap();
    assert_eq!(outcome, SearchOutcome::Failed("failed to search episodes".into()));
    assert!(!c.history()[0].succeeded);

    let (out, err) = output(c);
    assert!(out.is_empty());
    assert_eq!(err, "Error: failed to search episodes\n");
}

#[test]
fn test_e2e_eleven_keyword_searches_keep_ten() {
    let data_dir = DataDirBuilder::new();
    let mut c = controller(ScriptedTransport::always("The Contest", 11), data_dir.path());

    for i in 1..=11 {
        c.on_submit(QueryKind::Keyword, &format!("keyword {}", i)).unwrap();
    }

    let queries: Vec<&str> = c.history().iter().map(|r| r.query.as_str()).collect();
    assert_eq!(queries.len(), 10);
    assert_eq!(queries[0], "keyword 11");
    assert_eq!(queries[9], "keyword 2");
    assert!(!queries.contains(&"keyword 1"));
}

#[test]
fn test_e2e_history_survives_restart() {
    let data_dir = DataDirBuilder::new();
    {
        let mut c = controller(
            ScriptedTransport::new(vec![Ok(soup_nazi_response()), Ok(contest_response())]),
            data_dir.path(),
        );
        c.on_submit(QueryKind::Scene, "soup").unwrap();
        c.on_submit(QueryKind::Keyword, "bet").unwrap();
    }

    let reopened = HistoryStore::open(FileStore::open(data_dir.path()).unwrap());
    let queries: Vec<(&str, QueryKind)> =
        reopened.list().iter().map(|r| (r.query.as_str(), r.kind)).collect();
    assert_eq!(queries, vec![("bet", QueryKind::Keyword), ("soup", QueryKind::Scene)]);
}

#[test]
fn test_e2e_rerun_from_history_sends_same_request() {
    let data_dir = DataDirBuilder::new();
    let mut c = controller(
        ScriptedTransport::new(vec![
            Err(TransportError::Network("connection refused".into())),
            Ok(contest_response()),
        ]),
        data_dir.path(),
    )
    .with_max_results(3);

    c.on_submit(QueryKind::Keyword, "Bet, Contest").unwrap();
    let id = c.history()[0].id.clone();
    let outcome = c.on_history_select(&id).unwrap();

    assert!(outcome.succeeded());
    assert_eq!(c.history().len(), 1);
    assert!(c.history()[0].succeeded);
    assert_ne!(c.history()[0].id, id);
}

#[test]
fn test_e2e_case_insensitive_dedup_keeps_latest_casing() {
    let data_dir = DataDirBuilder::new();
    let mut c = controller(ScriptedTransport::always("The Pen", 2), data_dir.path());

    c.on_submit(QueryKind::Scene, "Jerry in Florida").unwrap();
    c.on_submit(QueryKind::Scene, "jerry in florida").unwrap();

    assert_eq!(c.history().len(), 1);
    assert_eq!(c.history()[0].query, "jerry in florida");
}

#[test]
fn test_e2e_scene_and_keyword_with_same_text_are_distinct() {
    let data_dir = DataDirBuilder::new();
    let mut c = controller(ScriptedTransport::always("The Pen", 2), data_dir.path());

    c.on_submit(QueryKind::Scene, "pen").unwrap();
    c.on_submit(QueryKind::Keyword, "pen").unwrap();

    assert_eq!(c.history().len(), 2);
}

#[test]
fn test_e2e_request_shapes() {
    let data_dir = DataDirBuilder::new();
    let transport = ScriptedTransport::always("x", 2);
    let mut c = controller(transport, data_dir.path()).with_max_results(7);

    c.on_submit(QueryKind::Scene, "  marine biologist  ").unwrap();
    c.on_submit(QueryKind::Keyword, "whale, golf ball").unwrap();

    let requests = c.transport().requests();
    assert_eq!(requests[0], SearchRequest::Scene { description: "marine biologist".into() });
    assert_eq!(
        requests[1],
        SearchRequest::Keyword { keywords: "whale, golf ball".into(), max_results: 7 }
    );
}
