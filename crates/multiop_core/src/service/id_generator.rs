//! Project identity generation.
//!
//! # Responsibility
//! - Produce opaque ids for newly created projects.
//!
//! # Invariants
//! - Ids generated by `TimestampIdGenerator::next_id` are distinct for the
//!   whole process lifetime, including calls within the same millisecond.
//! - No generator state is persisted between sessions.

use crate::model::project::ProjectId;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const RANDOM_COMPONENT_RANGE: u128 = 10_000;

static NEXT_SUFFIX: AtomicU64 = AtomicU64::new(0);

/// Source of fresh project identities.
pub trait IdGenerator {
    fn next_id(&self) -> ProjectId;
}

/// Default generator: `<unix-millis>_<random 0..9999>_<suffix>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampIdGenerator;

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates an id with a caller-supplied disambiguation suffix.
    ///
    /// Distinctness then rests on the caller never reusing a suffix within
    /// one tick; the random component only makes collisions unlikely.
    pub fn next_with_suffix(&self, suffix: u64) -> ProjectId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        let random = Uuid::new_v4().as_u128() % RANDOM_COMPONENT_RANGE;
        ProjectId::new(format!("{millis}_{random}_{suffix}"))
    }
}

impl IdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> ProjectId {
        self.next_with_suffix(NEXT_SUFFIX.fetch_add(1, Ordering::Relaxed))
    }
}

/// Deterministic generator yielding `<prefix>-1`, `<prefix>-2`, ...
///
/// Intended for tests and fixtures that assert on concrete ids.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> ProjectId {
        let value = self.next.get();
        self.next.set(value + 1);
        ProjectId::new(format!("{}-{value}", self.prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, SequentialIdGenerator, TimestampIdGenerator};
    use std::collections::HashSet;

    #[test]
    fn burst_of_ids_within_one_tick_has_no_collisions() {
        let generator = TimestampIdGenerator::new();
        let ids: HashSet<_> = (0..1_000).map(|_| generator.next_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn id_has_three_underscore_separated_parts() {
        let id = TimestampIdGenerator::new().next_with_suffix(7);
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].parse::<u128>().is_ok());
        assert!(parts[1].parse::<u32>().unwrap() < 10_000);
        assert_eq!(parts[2], "7");
    }

    #[test]
    fn sequential_generator_counts_from_one() {
        let generator = SequentialIdGenerator::new("p");
        assert_eq!(generator.next_id().as_str(), "p-1");
        assert_eq!(generator.next_id().as_str(), "p-2");
    }
}
