//! HTTP client for the public repository listing.

use std::time::Duration;

use anyhow::{Context, Result};
use folio_core::{FeedError, FeedPanel, FeedState, Repo};
use reqwest::header::ACCEPT;

use crate::config::FeedConfig;

const GITHUB_JSON: &str = "application/vnd.github.v3+json";

pub struct GitHubFeed {
    client: reqwest::Client,
    api_base: String,
    user: String,
    per_page: u8,
}

impl GitHubFeed {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            user: config.user.clone(),
            per_page: config.per_page,
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn endpoint(&self) -> String {
        format!("{}/users/{}/repos", self.api_base, self.user)
    }

    /// One read-only request for the most recently updated repositories.
    pub async fn fetch(&self) -> std::result::Result<Vec<Repo>, FeedError> {
        let per_page = self.per_page.to_string();
        let url = self.endpoint();
        tracing::debug!("fetching {url}");

        let response = self
            .client
            .get(&url)
            .query(&[("sort", "updated"), ("per_page", per_page.as_str())])
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Server(status.as_u16()));
        }

        let repos: Vec<Repo> = response
            .json()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))?;
        tracing::debug!("feed returned {} repositories", repos.len());
        Ok(repos)
    }

    /// Fetch into `panel`, passing through the loading state.
    pub async fn load<'a>(&self, panel: &'a mut FeedPanel) -> &'a FeedState {
        panel.begin_load();
        let result = self.fetch().await;
        panel.finish(result)
    }
}
