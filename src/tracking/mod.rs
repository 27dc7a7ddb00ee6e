//! Cross-round bookkeeping shared by every pairing system.
//!
//! - [`RepeatTracker`]: how often each pair of players has met
//! - [`StartsTracker`]: who went first, and who should go first next
//! - [`ByeTracker`]: byes received, including byes assigned to rounds not yet played
//!
//! All trackers are plain values owned by one pairing run.

pub mod byes;
pub mod repeats;
pub mod starts;

pub use byes::ByeTracker;
pub use repeats::RepeatTracker;
pub use starts::StartsTracker;
