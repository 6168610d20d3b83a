// Cricket Score Scraper Library
//
// Fetches a Cricbuzz match page and extracts structured score information
// (title, innings scores, status, current batsmen/bowlers, recent overs)
// from its HTML.

pub mod api;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod presenter;

// Re-export main types for convenience
pub use config::ScraperConfig;
pub use error::ScraperError;
pub use extractor::{MatchLayout, MatchSummary, ScorecardExtractor, NOT_APPLICABLE};
pub use fetcher::{validate_match_url, MatchFetcher, MATCH_PATH_MARKER, USER_AGENTS};
pub use presenter::{display_or_na, format_console, DISPLAY_PLACEHOLDER};

/// Fetch a match page and run the extraction cascade over it, one network
/// call per invocation.
pub async fn extract_score_from_url(
    config: &ScraperConfig,
    url: &str,
) -> Result<MatchSummary, ScraperError> {
    let fetcher = MatchFetcher::new(config)?;
    let html = fetcher.fetch(url).await?;

    let extractor = ScorecardExtractor::new()?;
    extractor.extract(&html)
}
