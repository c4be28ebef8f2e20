use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackmojiError {
    #[error("{0} required")]
    MissingCredential(&'static str),

    #[error("'{0}' is not a usable team name")]
    InvalidTeamName(String),

    #[error("cookie contains characters that cannot be sent in a header")]
    InvalidCookie,

    #[error("HTTP error {status}: {url}")]
    HttpStatus { status: StatusCode, url: String },

    #[error("no crumb found on {0}")]
    CrumbNotFound(String),

    #[error("'{0}' is not a valid emoji name")]
    InvalidEmojiName(String),

    #[error("failed to render '{word}': {reason}")]
    RenderFailed { word: String, reason: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SlackmojiError>;
