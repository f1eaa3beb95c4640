//! Identity generation for new records.
//!
//! Production code uses [`RandomIds`] (UUID v4). Tests inject
//! [`SequentialIds`] to get predictable identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of globally unique identifiers for new entities.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Uuid;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Monotonic identifiers `00000000-0000-0000-0000-000000000001`, `...002`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Uuid::from_u128(u128::from(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(), Uuid::from_u128(1));
        assert_eq!(ids.next_id(), Uuid::from_u128(2));
        assert_eq!(
            ids.next_id().to_string(),
            "00000000-0000-0000-0000-000000000003"
        );
    }

    #[test]
    fn random_ids_are_unique() {
        let ids = RandomIds;
        let mut seen = HashSet::new();
        for _ in 0..100 {
            assert!(seen.insert(ids.next_id()));
        }
    }
}
