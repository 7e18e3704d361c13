//! Result cache — single-slot, time-bounded memoization of a full pass.
//!
//! One slot covers the whole dataset. The clock is always passed in; nothing
//! here reads wall time. There is deliberately no serialization point across
//! concurrent refreshes: two callers racing past the TTL may both recompute,
//! and the last store wins. Errors never populate the slot, and a stale slot
//! is never served as a fallback.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::profile::AvatarProfile;

/// Default slot lifetime in seconds.
pub const DEFAULT_TTL_SECONDS: f64 = 300.0;

struct Slot {
    profiles: Arc<Vec<AvatarProfile>>,
    computed_at: f64,
}

/// Single-slot TTL cache for the aggregation output.
pub struct ProfileCache {
    ttl_seconds: f64,
    slot: RwLock<Option<Slot>>,
}

impl ProfileCache {
    pub fn new(ttl_seconds: f64) -> Self {
        Self {
            ttl_seconds,
            slot: RwLock::new(None),
        }
    }

    /// The cached profile list, if one exists and is still fresh at `now`.
    /// A slot at or past its TTL is treated as empty.
    pub fn get(&self, now: f64) -> Option<Arc<Vec<AvatarProfile>>> {
        let guard = self.slot.read();
        let slot = guard.as_ref()?;
        if now - slot.computed_at < self.ttl_seconds {
            Some(Arc::clone(&slot.profiles))
        } else {
            None
        }
    }

    /// Store a freshly computed pass. Overwrites unconditionally.
    pub fn store(&self, profiles: Arc<Vec<AvatarProfile>>, now: f64) {
        *self.slot.write() = Some(Slot {
            profiles,
            computed_at: now,
        });
    }
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECONDS)
    }
}
