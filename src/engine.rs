//! Engine — wires the pipeline together behind one entry point.
//!
//! `Engine::profiles(now)` is the sole way consumers obtain profiles: cache
//! check, then (on a miss) one feed fetch, aggregate, normalize, compose,
//! store. The clock is always the caller's `now`; nothing below the server
//! edge reads wall time. Fetch failures propagate and leave the cache as it
//! was.

use std::sync::Arc;

use async_trait::async_trait;

use crate::aggregate::aggregate;
use crate::cache::{ProfileCache, DEFAULT_TTL_SECONDS};
use crate::error::EngineError;
use crate::lexicon::Lexicon;
use crate::normalize::{normalize, NormalizationMode};
use crate::profile::AvatarProfile;
use crate::row::RawRow;
use crate::summary::{compose_summary, SplitMix64, SummaryMode};

/// Anything that can produce feed rows. The HTTP gviz client is the real
/// implementation; tests inject counting or failing fakes.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, EngineError>;
}

/// Tunable engine parameters. Defaults match the damped deterministic
/// deployment.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub ttl_seconds: f64,
    pub lexicon: Lexicon,
    pub normalization_mode: NormalizationMode,
    pub summary_mode: SummaryMode,
    /// Seed for the summary random source; only read in randomized mode.
    pub summary_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            lexicon: Lexicon::default(),
            normalization_mode: NormalizationMode::Damped,
            summary_mode: SummaryMode::Deterministic,
            summary_seed: 0,
        }
    }
}

/// The profiling engine: configuration, feed seam, and result cache.
pub struct Engine {
    config: EngineConfig,
    feed: Arc<dyn FeedSource>,
    cache: ProfileCache,
}

impl Engine {
    pub fn new(config: EngineConfig, feed: Arc<dyn FeedSource>) -> Self {
        let cache = ProfileCache::new(config.ttl_seconds);
        Self {
            config,
            feed,
            cache,
        }
    }

    /// The profile list as of `now`. Served from cache while fresh; a miss
    /// triggers exactly one fetch and a full recompute.
    pub async fn profiles(&self, now: f64) -> Result<Arc<Vec<AvatarProfile>>, EngineError> {
        if let Some(cached) = self.cache.get(now) {
            tracing::debug!(profiles = cached.len(), "serving cached profiles");
            return Ok(cached);
        }

        let rows = self.feed.fetch_rows().await?;
        let profiles = Arc::new(self.build_profiles(&rows, now));
        tracing::info!(
            rows = rows.len(),
            profiles = profiles.len(),
            "rebuilt profiles"
        );
        self.cache.store(Arc::clone(&profiles), now);
        Ok(profiles)
    }

    /// Run the scoring pipeline over a row set. Pure with respect to `now`;
    /// exposed separately so callers can profile ad-hoc row sets.
    pub fn build_profiles(&self, rows: &[RawRow], now: f64) -> Vec<AvatarProfile> {
        let mode = self.config.normalization_mode;
        let mut rng = SplitMix64::new(self.config.summary_seed);

        aggregate(rows, now, &self.config.lexicon)
            .values()
            .map(|acc| {
                let scores = normalize(acc, mode);
                let summary = compose_summary(&scores, self.config.summary_mode, &mut rng);
                AvatarProfile::build(acc, &scores, summary, mode)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const NOW: f64 = 1_700_000_000.0;

    struct StaticFeed {
        rows: Vec<RawRow>,
        calls: AtomicUsize,
    }

    impl StaticFeed {
        fn new(rows: Vec<RawRow>) -> Self {
            Self {
                rows,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FeedSource for StaticFeed {
        async fn fetch_rows(&self) -> Result<Vec<RawRow>, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.clone())
        }
    }

    struct FailingFeed;

    #[async_trait]
    impl FeedSource for FailingFeed {
        async fn fetch_rows(&self) -> Result<Vec<RawRow>, EngineError> {
            Err(EngineError::malformed("boom"))
        }
    }

    fn three_row_fixture() -> Vec<RawRow> {
        vec![
            RawRow::new("A", "Aria", NOW, 1, "hi there"),
            RawRow::new("A", "Aria", NOW - 2.0 * 3600.0, 1, "why is this happening?"),
            RawRow::new("A", "Aria", NOW - 30.0 * 3600.0, 1, "lol thanks"),
        ]
    }

    #[tokio::test]
    async fn test_cache_ttl_gates_refetches() {
        let feed = Arc::new(StaticFeed::new(three_row_fixture()));
        let engine = Engine::new(EngineConfig::default(), feed.clone());

        let first = engine.profiles(NOW).await.unwrap();
        assert_eq!(feed.calls.load(Ordering::SeqCst), 1);

        // Within TTL: identical object, no fetch.
        let second = engine.profiles(NOW + 299.0).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(feed.calls.load(Ordering::SeqCst), 1);

        // Past TTL: fetch again.
        let third = engine.profiles(NOW + 301.0).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(feed.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_feed_failure_propagates_and_leaves_cache_empty() {
        let engine = Engine::new(EngineConfig::default(), Arc::new(FailingFeed));
        let err = engine.profiles(NOW).await.unwrap_err();
        assert!(matches!(err, EngineError::FeedMalformed { .. }));

        // Still failing on the next call: no phantom cache entry appeared.
        assert!(engine.profiles(NOW + 1.0).await.is_err());
    }

    #[tokio::test]
    async fn test_end_to_end_profile_shape() {
        let engine = Engine::new(
            EngineConfig::default(),
            Arc::new(StaticFeed::new(three_row_fixture())),
        );
        let profiles = engine.profiles(NOW).await.unwrap();
        assert_eq!(profiles.len(), 1);

        let p = &profiles[0];
        assert_eq!(p.avatar_uuid, "A");
        assert_eq!(p.name, "Aria");
        assert!(p.recent > 0);
        assert!((1..=100).contains(&p.confidence));
        for category in [
            crate::category::TraitCategory::Engaging,
            crate::category::TraitCategory::Curious,
            crate::category::TraitCategory::Humorous,
            crate::category::TraitCategory::Supportive,
        ] {
            let score = p.traits.get(&category).map(|s| s.as_unit()).unwrap_or(0.0);
            assert!(score > 0.0, "expected nonzero {:?}", category);
        }
    }

    #[test]
    fn test_simple_mode_renders_percent_scores() {
        let config = EngineConfig {
            normalization_mode: NormalizationMode::Simple,
            ..Default::default()
        };
        let engine = Engine::new(config, Arc::new(FailingFeed));
        let rows = vec![RawRow::new("A", "Aria", NOW, 1, "lol lol")];
        let profiles = engine.build_profiles(&rows, NOW);
        let humor = profiles[0].traits[&crate::category::TraitCategory::Humorous];
        assert_eq!(humor, crate::profile::Score::Percent(200));
    }

    #[test]
    fn test_build_profiles_orders_by_uuid() {
        let engine = Engine::new(EngineConfig::default(), Arc::new(FailingFeed));
        let rows = vec![
            RawRow::new("z9", "Zed", NOW, 1, ""),
            RawRow::new("a1", "Aria", NOW, 1, ""),
        ];
        let profiles = engine.build_profiles(&rows, NOW);
        assert_eq!(profiles[0].avatar_uuid, "a1");
        assert_eq!(profiles[1].avatar_uuid, "z9");
    }
}
