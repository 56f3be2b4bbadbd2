//! Repository feed panel state.
//!
//! The panel shows the most recently updated repositories of one user.
//! Network and server failures collapse into a single retryable failed
//! state; an empty listing is a separate, non-error state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One repository as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    Network(String),
    Server(u16),
    Decode(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Network(msg) => write!(f, "network error: {msg}"),
            FeedError::Server(status) => write!(f, "GitHub API error: {status}"),
            FeedError::Decode(msg) => write!(f, "invalid response body: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

const NO_DESCRIPTION: &str = "No description available";
const FALLBACK_COLOR: &str = "#ccc";

pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#2b7489",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "SQL" => "#e38c00",
        "C++" => "#f34b7d",
        "C" => "#555555",
        _ => FALLBACK_COLOR,
    }
}

/// Display-ready repository card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCard {
    pub name: String,
    pub description: String,
    pub url: String,
    pub language: Option<String>,
    pub color: &'static str,
}

impl From<&Repo> for RepoCard {
    fn from(repo: &Repo) -> Self {
        let description = repo
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION)
            .to_string();
        let color = repo
            .language
            .as_deref()
            .map(language_color)
            .unwrap_or(FALLBACK_COLOR);
        Self {
            name: repo.name.clone(),
            description,
            url: repo.html_url.clone(),
            language: repo.language.clone(),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedState {
    #[default]
    Loading,
    Ready(Vec<RepoCard>),
    Empty,
    Failed(String),
}

impl FeedState {
    pub fn from_result(result: Result<Vec<Repo>, FeedError>) -> Self {
        match result {
            Ok(repos) if repos.is_empty() => FeedState::Empty,
            Ok(repos) => FeedState::Ready(repos.iter().map(RepoCard::from).collect()),
            Err(e) => {
                tracing::error!("repository feed failed: {e}");
                FeedState::Failed(e.to_string())
            }
        }
    }

    pub fn can_retry(&self) -> bool {
        matches!(self, FeedState::Failed(_))
    }
}

/// The feed section of the page. Retries only happen when the visitor asks.
#[derive(Debug, Clone, Default)]
pub struct FeedPanel {
    state: FeedState,
    attempts: u32,
}

impl FeedPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn begin_load(&mut self) {
        self.attempts += 1;
        self.state = FeedState::Loading;
    }

    pub fn finish(&mut self, result: Result<Vec<Repo>, FeedError>) -> &FeedState {
        self.state = FeedState::from_result(result);
        &self.state
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
