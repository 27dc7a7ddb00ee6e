use std::collections::HashMap;

use crate::core::types::{Pairing, PlayerId};

/// Byes received per player
///
/// Updated as soon as a round is paired, so byes handed out for rounds that
/// have not been played yet still count when later rounds are paired.
#[derive(Debug, Clone, Default)]
pub struct ByeTracker {
    byes: HashMap<PlayerId, u32>,
}

impl ByeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: &PlayerId) {
        *self.byes.entry(id.clone()).or_insert(0) += 1;
    }

    #[must_use]
    pub fn get(&self, id: &PlayerId) -> u32 {
        self.byes.get(id).copied().unwrap_or(0)
    }

    /// Credit the real player if `pairing` is against the bye
    pub fn update(&mut self, pairing: &Pairing) {
        if pairing.first.player.is_bye() {
            self.add(&pairing.second.player);
        }
        if pairing.second.player.is_bye() {
            self.add(&pairing.first.player);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_credits_real_player() {
        let mut byes = ByeTracker::new();
        byes.update(&Pairing::new("bye".into(), "amy".into()));
        byes.update(&Pairing::new("ben".into(), "Bye".into()));
        byes.update(&Pairing::new("amy".into(), "ben".into()));
        assert_eq!(byes.get(&"amy".into()), 1);
        assert_eq!(byes.get(&"ben".into()), 1);
        assert_eq!(byes.get(&"bye".into()), 0);
    }
}
