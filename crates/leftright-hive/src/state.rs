use crate::aggregator::RatioAggregator;
use crate::config::HiveConfig;
use crate::stars::StarsService;
use crate::store::Store;
use leftright_core::clock::{Clock, SystemClock};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub aggregator: RatioAggregator,
    pub stars: StarsService,
}

impl AppState {
    pub fn new(db: SqlitePool, config: &HiveConfig) -> Self {
        Self::with_clock(db, config, Arc::new(SystemClock))
    }

    pub fn with_clock(db: SqlitePool, config: &HiveConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            aggregator: RatioAggregator::new(Store::new(db)),
            stars: StarsService::new(
                &config.github_api,
                &config.stars_repo,
                config.github_token.clone(),
                clock,
                Duration::from_secs(config.stars_ttl_secs),
                Duration::from_secs(config.stars_failure_ttl_secs),
            ),
        }
    }
}
