//! Repository star count, cached so page loads don't hammer the GitHub API.

use leftright_core::cache::TtlCache;
use leftright_core::clock::Clock;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[derive(Deserialize)]
struct RepoInfo {
    #[serde(default)]
    stargazers_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarCount {
    Live(u64),
    /// Upstream failed recently; callers show zero.
    Unavailable,
}

impl StarCount {
    pub fn value(&self) -> u64 {
        match self {
            Self::Live(n) => *n,
            Self::Unavailable => 0,
        }
    }
}

pub struct StarsService {
    client: Client,
    api_base: String,
    repo: String,
    token: Option<String>,
    cache: TtlCache<String, Option<u64>>,
    failure_ttl: Duration,
    // Held while fetching so a cold cache costs one upstream call.
    refresh: Mutex<()>,
}

impl StarsService {
    pub fn new(
        api_base: &str,
        repo: &str,
        token: Option<String>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
        failure_ttl: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            repo: repo.to_string(),
            token,
            cache: TtlCache::new(clock, ttl),
            failure_ttl,
            refresh: Mutex::new(()),
        }
    }

    fn cached(&self) -> Option<StarCount> {
        let cached = self.cache.get(&self.repo)?;
        debug!("Star count for {} served from cache", self.repo);
        Some(cached.map_or(StarCount::Unavailable, StarCount::Live))
    }

    pub async fn stars(&self) -> StarCount {
        if let Some(count) = self.cached() {
            return count;
        }

        let _guard = self.refresh.lock().await;
        // Another request may have refreshed the entry while we waited.
        if let Some(count) = self.cached() {
            return count;
        }

        match self.fetch().await {
            Ok(n) => {
                self.cache.insert(self.repo.clone(), Some(n));
                StarCount::Live(n)
            }
            Err(e) => {
                warn!("⚠️  GitHub lookup for {} failed: {}", self.repo, e);
                self.cache
                    .insert_with_ttl(self.repo.clone(), None, self.failure_ttl);
                StarCount::Unavailable
            }
        }
    }

    async fn fetch(&self) -> Result<u64, reqwest::Error> {
        let mut req = self
            .client
            .get(format!("{}/repos/{}", self.api_base, self.repo))
            .header(ACCEPT, "application/vnd.github.v3+json")
            .header(USER_AGENT, "leftright-hive");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let info: RepoInfo = req.send().await?.error_for_status()?.json().await?;
        Ok(info.stargazers_count)
    }
}
