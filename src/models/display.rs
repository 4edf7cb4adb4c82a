use serde::{Deserialize, Serialize};

/// Summary the service returns when nothing matched
pub const NO_MATCH_SUMMARY: &str = "No matching episodes found.";

/// Keyword-match statistics shown in place of the air date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordStats {
    pub match_line: String,
    pub detail_line: Option<String>,
}

/// Parsed view of one response.
///
/// `air_date` and `keyword_stats` share one presentation slot; a model never
/// carries both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub summary: String,
    pub rating: Option<String>,
    pub air_date: Option<String>,
    pub keyword_stats: Option<KeywordStats>,
    pub image_url: Option<String>,
    pub external_url: Option<String>,
}

impl DisplayModel {
    /// Whether this response is something a user can act on
    pub fn is_usable(&self) -> bool {
        let summary = self.summary.trim();
        !summary.is_empty() && summary != NO_MATCH_SUMMARY
    }
}
