use crate::error::{AppError, AppResult};
use crate::store::Store;
use leftright_protocol::{parse_ratio, validate_layout_key, validate_ratio, RatioResponse};
use serde_json::Value;
use tracing::{info, warn};

/// Per-layout running mean of submitted hand ratios.
#[derive(Clone)]
pub struct RatioAggregator {
    store: Store,
}

impl RatioAggregator {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Current aggregate, or the display default when nothing was accepted yet.
    pub async fn get(&self, layout: &str) -> AppResult<RatioResponse> {
        let layout = validate_layout_key(layout)?;

        Ok(match self.store.get(layout).await? {
            Some(stat) => RatioResponse {
                count: stat.count,
                average: stat.average,
                layout: layout.to_string(),
            },
            None => RatioResponse::empty(layout),
        })
    }

    pub async fn submit(&self, layout: &str, ratio: f64) -> AppResult<RatioResponse> {
        let layout = validate_layout_key(layout)?;
        let ratio = validate_ratio(ratio).map_err(|e| {
            warn!("⛔ Rejected ratio for {}: {}", layout, e);
            AppError::InvalidRatio {
                message: e.to_string(),
                received: serde_json::Number::from_f64(ratio)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
            }
        })?;

        let stat = self.store.add_sample(layout, ratio).await?;
        info!(
            "📥 {} ratio {:.3} accepted | n={} avg={:.3}",
            layout, ratio, stat.count, stat.average
        );

        Ok(RatioResponse {
            count: stat.count,
            average: stat.average,
            layout: layout.to_string(),
        })
    }

    /// Entry point for untyped request bodies of the form `{"ratio": <number>}`.
    pub async fn submit_json(&self, layout: &str, body: &Value) -> AppResult<RatioResponse> {
        validate_layout_key(layout)?;

        let received = body.get("ratio").cloned().unwrap_or(Value::Null);
        let ratio = parse_ratio(&received).map_err(|e| {
            warn!("⛔ Rejected ratio for {}: {}", layout, e);
            AppError::InvalidRatio {
                message: e.to_string(),
                received,
            }
        })?;

        self.submit(layout, ratio).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use serde_json::json;

    async fn aggregator() -> RatioAggregator {
        RatioAggregator::new(Store::new(db::init_db("sqlite::memory:").await.unwrap()))
    }

    #[tokio::test]
    async fn test_default_for_unknown_layout() {
        let agg = aggregator().await;
        let r = agg.get("colemak").await.unwrap();
        assert_eq!(r, RatioResponse::empty("colemak"));
    }

    #[tokio::test]
    async fn test_rejections_leave_state_untouched() {
        let agg = aggregator().await;
        agg.submit("qwerty", 1.5).await.unwrap();

        for bad in [0.29, 3.01, 0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = agg.submit("qwerty", bad).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidRatio { .. }), "{bad} accepted");
        }
        for bad in [json!({"ratio": "1.2"}), json!({}), json!({"ratio": null})] {
            assert!(agg.submit_json("qwerty", &bad).await.is_err());
        }

        let stat = agg.store().get("qwerty").await.unwrap().unwrap();
        assert_eq!(stat.count, 1);
        assert_eq!(stat.sum, 1.5);
        assert_eq!(stat.average, 1.5);
    }

    #[tokio::test]
    async fn test_invalid_layout_is_validation_error() {
        let agg = aggregator().await;
        assert!(matches!(
            agg.submit("QWERTY!", 1.0).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(agg.get("").await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_bounds_are_inclusive() {
        let agg = aggregator().await;
        agg.submit("qwerty", 0.3).await.unwrap();
        let r = agg.submit("qwerty", 3.0).await.unwrap();
        assert_eq!(r.count, 2);
        assert!((r.average - 1.65).abs() < 1e-9);
    }
}
