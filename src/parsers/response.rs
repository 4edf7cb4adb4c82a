use crate::models::{DisplayModel, KeywordStats};

const RATING_MARKER: &str = "IMDb Rating:";
const AIR_DATE_MARKER: &str = "Original Air Date:";
const MATCH_MARKER: &str = "Matched";
const KEYWORDS_FOUND_MARKER: &str = "Keywords found:";
const IMAGE_MARKER: &str = "IMDb Image:";
const URL_MARKER: &str = "IMDb URL:";

/// Parse a raw newline-delimited service response into a [`DisplayModel`]
///
/// The first line is always the summary. Every later line is tested
/// independently against each marker; only the first line per marker is
/// honored. Never fails: missing or malformed markers leave fields absent.
///
/// A trailing `\r` is dropped from each line, so CRLF responses keep the same
/// retained lines (summary, air date, keyword stats) as LF responses.
///
/// # Examples
///
/// ```
/// use episode_finder::parse_response;
///
/// let model = parse_response("The Soup Nazi\nIMDb Rating: 9.2\nOriginal Air Date: 1995-11-02");
/// assert_eq!(model.summary, "The Soup Nazi");
/// assert_eq!(model.rating.as_deref(), Some("9.2"));
/// assert_eq!(model.air_date.as_deref(), Some("Original Air Date: 1995-11-02"));
/// assert!(model.keyword_stats.is_none());
/// ```
pub fn parse_response(raw: &str) -> DisplayModel {
    let mut lines = raw.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    let summary = lines.next().unwrap_or_default().to_string();

    let mut rating = None;
    let mut air_date = None;
    let mut match_line = None;
    let mut detail_line = None;
    let mut image_url = None;
    let mut external_url = None;

    for line in lines {
        if rating.is_none() {
            rating = value_after(line, RATING_MARKER);
        }
        if air_date.is_none() && line.contains(AIR_DATE_MARKER) {
            air_date = Some(line.to_string());
        }
        if match_line.is_none() && line.contains(MATCH_MARKER) {
            match_line = Some(line.to_string());
        }
        if detail_line.is_none() && line.contains(KEYWORDS_FOUND_MARKER) {
            detail_line = Some(line.to_string());
        }
        if image_url.is_none() {
            image_url = value_after(line, IMAGE_MARKER);
        }
        if external_url.is_none() {
            external_url = value_after(line, URL_MARKER);
        }
    }

    // Air date wins the shared slot; response kind is not signaled in the text
    let keyword_stats = match (&air_date, match_line) {
        (None, Some(match_line)) => Some(KeywordStats { match_line, detail_line }),
        _ => None,
    };

    DisplayModel { summary, rating, air_date, keyword_stats, image_url, external_url }
}

/// Trimmed text following `marker`, if the line contains it
fn value_after(line: &str, marker: &str) -> Option<String> {
    line.find(marker).map(|pos| line[pos + marker.len()..].trim().to_string())
}
