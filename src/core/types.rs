use serde::{Deserialize, Serialize};

/// Identifier of a participant, as it appears in result and entrant rows
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The placeholder opponent used to even out an odd field
    #[must_use]
    pub fn is_bye(&self) -> bool {
        self.0.eq_ignore_ascii_case("bye")
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One side of a pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub player: PlayerId,
    /// Does this player go first?
    pub starts: bool,
}

impl Seat {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            starts: false,
        }
    }
}

/// Two players meeting in one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub first: Seat,
    pub second: Seat,

    /// Number of times these two have met, including this game
    #[serde(default)]
    pub repeats: u32,

    /// Player pinned to start by a fixed pairing row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_starter: Option<PlayerId>,
}

impl Pairing {
    pub fn new(first: PlayerId, second: PlayerId) -> Self {
        Self {
            first: Seat::new(first),
            second: Seat::new(second),
            repeats: 0,
            pinned_starter: None,
        }
    }

    #[must_use]
    pub fn with_pinned_starter(mut self, starter: Option<PlayerId>) -> Self {
        self.pinned_starter = starter;
        self
    }

    /// True if `id` plays in this pairing
    #[must_use]
    pub fn involves(&self, id: &PlayerId) -> bool {
        &self.first.player == id || &self.second.player == id
    }

    /// The player who goes first, once starts have been assigned
    #[must_use]
    pub fn starter(&self) -> &PlayerId {
        if self.first.starts {
            &self.first.player
        } else {
            &self.second.player
        }
    }

    /// The player who goes second, once starts have been assigned
    #[must_use]
    pub fn follower(&self) -> &PlayerId {
        if self.first.starts {
            &self.second.player
        } else {
            &self.first.player
        }
    }

    /// True if either side is the bye
    #[must_use]
    pub fn has_bye(&self) -> bool {
        self.first.player.is_bye() || self.second.player.is_bye()
    }
}

impl std::fmt::Display for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v. {}", self.first.player, self.second.player)
    }
}

/// Key for unordered pairs of players: always stored in sorted order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey(PlayerId, PlayerId);

impl PairKey {
    pub fn new(a: &PlayerId, b: &PlayerId) -> Self {
        if a <= b {
            Self(a.clone(), b.clone())
        } else {
            Self(b.clone(), a.clone())
        }
    }
}
