//! Command caller interface

use uuid::Uuid;

/// Whoever issued a flag query or mutation (a player or the console)
pub trait Caller {
    /// Display name, used in log output
    fn name(&self) -> &str;

    /// The player's UUID, or `None` for non-player callers
    fn player_id(&self) -> Option<Uuid>;

    /// Whether the caller holds a permission node
    fn has_permission(&self, node: &str) -> bool;

    fn is_player(&self) -> bool {
        self.player_id().is_some()
    }
}
