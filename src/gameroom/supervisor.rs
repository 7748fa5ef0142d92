use crate::gameplay::PlayerId;
use std::collections::HashSet;

/// Disconnect bookkeeping for an active game.
///
/// A departed player stays seated, in hand-count and in turn order; the
/// room arms their grace deadline and auto-plays their turns until they
/// come back or the deadline fires. This type only remembers who is out;
/// the deadlines themselves live in [`Timers`](super::Timers) and the
/// elimination itself in the state machine, so all three change together
/// in one serialized transition.
#[derive(Debug, Default)]
pub struct Supervisor {
    waiting: HashSet<PlayerId>,
}

impl Supervisor {
    /// Marks a player departed. False if they already were.
    pub fn depart(&mut self, player: PlayerId) -> bool {
        self.waiting.insert(player)
    }
    /// Clears a departure on reconnect. False if nothing was pending,
    /// which the room treats as an ordinary (re-)attach.
    pub fn rejoin(&mut self, player: &PlayerId) -> bool {
        self.waiting.remove(player)
    }
    /// Drops bookkeeping for a player eliminated by any path.
    pub fn forget(&mut self, player: &PlayerId) {
        self.waiting.remove(player);
    }
    pub fn waiting(&self, player: &PlayerId) -> bool {
        self.waiting.contains(player)
    }
    pub fn reset(&mut self) {
        self.waiting.clear();
    }
}
