use reqwest::StatusCode;
use thiserror::Error;

pub type FetchResult<T> = Result<T, FetchError>;

/// Failure of a single request against the GitHub API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no GitHub token configured (set GITHUB_TOKEN)")]
    MissingCredential,

    #[error("network error calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GitHub API returned HTTP {} for {url}", .status.as_u16())]
    Status {
        status: StatusCode,
        url: String,
        /// `x-ratelimit-remaining` from the response, when present.
        rate_limit_remaining: Option<u64>,
        /// `retry-after` seconds from the response, when present.
        retry_after: Option<u64>,
    },

    #[error("unexpected payload from {url}: {detail}")]
    Payload { url: String, detail: String },

    #[error("GraphQL reported errors: {0}")]
    GraphQl(String),

    #[error("request cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn payload(url: &str, detail: impl ToString) -> Self {
        Self::Payload {
            url: url.to_string(),
            detail: detail.to_string(),
        }
    }

    /// 429 always means a rate limit. GitHub also uses 403 for primary limits
    /// (no requests remaining) and secondary limits (`retry-after` set); any
    /// other 403 is a permission failure.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::Status { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS => true,
            Self::Status {
                status,
                rate_limit_remaining,
                retry_after,
                ..
            } if *status == StatusCode::FORBIDDEN => {
                *rate_limit_remaining == Some(0) || retry_after.is_some()
            }
            _ => false,
        }
    }

    /// Text for the page's error slot, phrased by failure kind.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential => {
                "GitHub stats are unavailable: no access token was provided at build time.".into()
            }
            Self::Transport { .. } => {
                "Could not reach GitHub. Check the network connection.".into()
            }
            _ if self.is_rate_limited() => "GitHub rate limit reached. Try again later.".into(),
            Self::Status { status, .. } if *status == StatusCode::FORBIDDEN => {
                "The GitHub token lacks permission to read this data.".into()
            }
            Self::Status { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                "GitHub rejected the access token.".into()
            }
            Self::Status { status, .. } if *status == StatusCode::NOT_FOUND => {
                "GitHub user not found.".into()
            }
            Self::Status { status, .. } => format!("GitHub returned HTTP {}.", status.as_u16()),
            Self::Payload { .. } | Self::GraphQl(_) => {
                "GitHub returned data in an unexpected shape.".into()
            }
            Self::Cancelled => "Loading was cancelled.".into(),
        }
    }
}
