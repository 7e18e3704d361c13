//! # vibescan
//!
//! Social trait and tone profiling for avatars in a shared virtual space.
//!
//! Short chat samples arrive as rows on a polled feed; the engine folds them
//! into per-avatar accumulators with time-decay weighting, normalizes those
//! into confidence-scored trait/style values, and renders a one-line summary
//! per avatar plus a room-level vibe read. Results are memoized in a single
//! TTL-bounded cache slot and served to HUD clients over HTTP.

pub mod aggregate;
pub mod cache;
pub mod category;
pub mod decay;
pub mod engine;
pub mod error;
pub mod feed;
pub mod hits;
pub mod lexicon;
pub mod normalize;
pub mod present;
pub mod profile;
pub mod row;
pub mod server;
pub mod summary;

pub use aggregate::{aggregate, AvatarAccumulator};
pub use cache::ProfileCache;
pub use category::{StyleCategory, TraitCategory};
pub use engine::{Engine, EngineConfig, FeedSource};
pub use error::EngineError;
pub use feed::GvizFeed;
pub use hits::{extract_hits, CategoryHits};
pub use lexicon::Lexicon;
pub use normalize::{normalize, NormalizationMode};
pub use profile::AvatarProfile;
pub use row::RawRow;
pub use summary::{compose_summary, SummaryMode};

/// Crate version, reported by the health endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
