use std::collections::HashMap;

use crate::core::types::{PairKey, PlayerId};

/// Counts encounters per unordered pair of players
#[derive(Debug, Clone, Default)]
pub struct RepeatTracker {
    matches: HashMap<PairKey, u32>,
}

impl RepeatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a meeting and return the updated count
    pub fn add(&mut self, a: &PlayerId, b: &PlayerId) -> u32 {
        let count = self.matches.entry(PairKey::new(a, b)).or_insert(0);
        *count += 1;
        *count
    }

    #[must_use]
    pub fn get(&self, a: &PlayerId, b: &PlayerId) -> u32 {
        self.matches.get(&PairKey::new(a, b)).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_are_symmetric() {
        let mut r = RepeatTracker::new();
        let a = PlayerId::new("a");
        let b = PlayerId::new("b");
        assert_eq!(r.get(&a, &b), 0);
        assert_eq!(r.add(&a, &b), 1);
        assert_eq!(r.add(&b, &a), 2);
        assert_eq!(r.get(&b, &a), 2);
        assert_eq!(r.get(&a, &PlayerId::new("c")), 0);
    }
}
