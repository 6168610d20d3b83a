use rand::Rng;
use std::time::Duration;
use url::Url;

use crate::config::ScraperConfig;
use crate::error::ScraperError;

/// Path fragment every Cricbuzz match-page URL carries.
pub const MATCH_PATH_MARKER: &str = "cricbuzz.com/live-cricket-scores/";

/// Browser User-Agent pool for avoiding trivial bot filtering.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:122.0) Gecko/20100101 Firefox/122.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
];

pub fn get_random_user_agent() -> &'static str {
    let mut rng = rand::rng();
    let index = rng.random_range(0..USER_AGENTS.len());
    USER_AGENTS[index]
}

/// Check that the input looks like a Cricbuzz match page before any
/// network call: scheme prefix, the match-page path marker, and a
/// well-formed URL overall.
pub fn validate_match_url(url: &str) -> Result<(), ScraperError> {
    if !url.starts_with("http") || !url.contains(MATCH_PATH_MARKER) {
        return Err(ScraperError::InvalidUrl);
    }
    Url::parse(url).map_err(|_| ScraperError::InvalidUrl)?;
    Ok(())
}

/// Issues the single GET against a match page. One outbound request per
/// lookup, no retries.
pub struct MatchFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
    user_agent: Option<String>,
}

impl MatchFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Fetch the raw HTML of a match page. Timeouts are reported
    /// distinctly from other transport failures; any non-success status
    /// is an error.
    pub async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        validate_match_url(url)?;

        let user_agent = match &self.user_agent {
            Some(ua) => ua.as_str(),
            None => get_random_user_agent(),
        };

        log::info!("Fetching match page: {}", url);

        let response = self
            .client
            .get(url)
            .header("User-Agent", user_agent)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Connection", "keep-alive")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::HttpStatus(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown error").to_string(),
            ));
        }

        log::debug!("Status code: {}", status);

        response.text().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, error: reqwest::Error) -> ScraperError {
        if error.is_timeout() {
            ScraperError::Timeout(self.timeout_secs)
        } else {
            ScraperError::Http(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_user_agent() {
        let agent = get_random_user_agent();
        assert!(!agent.is_empty());
        assert!(USER_AGENTS.contains(&agent));
    }

    #[test]
    fn test_validate_accepts_match_url() {
        let url = "https://www.cricbuzz.com/live-cricket-scores/12345/ind-vs-aus-3rd-odi";
        assert!(validate_match_url(url).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_scheme() {
        let url = "www.cricbuzz.com/live-cricket-scores/12345/ind-vs-aus";
        assert!(matches!(
            validate_match_url(url),
            Err(ScraperError::InvalidUrl)
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_path() {
        let url = "https://www.cricbuzz.com/cricket-news/some-article";
        assert!(matches!(
            validate_match_url(url),
            Err(ScraperError::InvalidUrl)
        ));
    }

    #[test]
    fn test_validate_rejects_empty_input() {
        assert!(matches!(validate_match_url(""), Err(ScraperError::InvalidUrl)));
    }

    #[test]
    fn test_validate_rejects_malformed_url() {
        // Carries the right markers but is not a parseable URL.
        let url = "http://:cricbuzz.com/live-cricket-scores/";
        assert!(matches!(
            validate_match_url(url),
            Err(ScraperError::InvalidUrl)
        ));
    }
}
