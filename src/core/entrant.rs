use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::types::PlayerId;

/// A registered participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    pub id: PlayerId,
    pub display_name: String,
    pub rating: i32,
    /// Table this player always sits at, if any
    pub table: Option<u32>,
    /// 1-based initial rank
    pub seed: u32,
}

impl Entrant {
    /// Create an entrant; the display name is `name (#seed)`
    pub fn new(name: impl Into<String>, rating: i32, seed: u32) -> Self {
        let name = name.into();
        Self {
            display_name: format!("{name} (#{seed})"),
            id: PlayerId::new(name),
            rating,
            table: None,
            seed,
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: u32) -> Self {
        self.table = Some(table);
        self
    }
}

/// The field of entrants, kept in seed order
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entrants: Vec<Entrant>,
    index: HashMap<PlayerId, usize>,
}

impl Roster {
    /// Build a roster; entrants are sorted by seed
    pub fn new(mut entrants: Vec<Entrant>) -> Self {
        entrants.sort_by_key(|e| e.seed);
        let index = entrants
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Self { entrants, index }
    }

    /// Entrants in seed order
    #[must_use]
    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &PlayerId) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &PlayerId) -> Option<&Entrant> {
        self.index.get(id).map(|&i| &self.entrants[i])
    }

    /// Seed of `id`, or `u32::MAX` for players not on the roster
    #[must_use]
    pub fn seed_of(&self, id: &PlayerId) -> u32 {
        self.get(id).map_or(u32::MAX, |e| e.seed)
    }

    /// Display name for `id`, falling back to the raw id
    #[must_use]
    pub fn display_name(&self, id: &PlayerId) -> String {
        self.get(id)
            .map_or_else(|| id.to_string(), |e| e.display_name.clone())
    }

    /// Tables pinned by entrants
    pub fn reserved_tables(&self) -> impl Iterator<Item = u32> + '_ {
        self.entrants.iter().filter_map(|e| e.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_sorts_by_seed() {
        let roster = Roster::new(vec![
            Entrant::new("carl", 1500, 3),
            Entrant::new("amy", 1800, 1),
            Entrant::new("ben", 1700, 2),
        ]);
        let ids: Vec<&str> = roster.entrants().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["amy", "ben", "carl"]);
        assert_eq!(roster.seed_of(&"carl".into()), 3);
        assert_eq!(roster.display_name(&"amy".into()), "amy (#1)");
        assert_eq!(roster.display_name(&"zed".into()), "zed");
    }
}
