use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to reach a WebDriver server (configured: {0})")]
    Connect(String),

    #[error("browser command failed: {0}")]
    Browser(#[from] fantoccini::error::CmdError),

    #[error("could not advance to the next listing page: {0}")]
    Navigation(String),

    #[error("expected element is missing: {0}")]
    ElementMissing(String),

    #[error("invalid CSS selector in configuration: {0}")]
    Selector(String),

    #[error("no video feeds found on the page")]
    EmptySurvey,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid start url: {0}")]
    Url(#[from] url::ParseError),
}
