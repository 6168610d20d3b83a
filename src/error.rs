use thiserror::Error;

/// Error taxonomy for a single score lookup. Every variant renders as the
/// human-readable message reported to the caller; nothing is retried.
#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Invalid Cricbuzz match URL provided.")]
    InvalidUrl,

    #[error("The request to Cricbuzz timed out after {0} seconds. Please try again later.")]
    Timeout(u64),

    #[error("Error fetching URL: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}: {1}")]
    HttpStatus(u16, String),

    #[error("An error occurred while parsing the page: {0}")]
    Parse(String),

    #[error(
        "Could not extract score information. Page structure might have changed or match is not live/valid."
    )]
    StructureChanged,
}
