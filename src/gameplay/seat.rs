use crate::cards::Hand;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Stable player identity, independent of any transport binding. The room
/// shell maps transports to and from this id; the state machine never sees
/// anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PlayerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
impl From<PlayerId> for Uuid {
    fn from(id: PlayerId) -> Uuid {
        id.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // eight hex chars are plenty for log lines
        let s = self.0.simple().to_string();
        write!(f, "{}", &s[..8])
    }
}

/// One seat at the table: who sits there, what they hold, and whether they
/// are still in the game. Seat order is fixed for the lifetime of a game;
/// elimination marks a seat dead rather than removing it.
#[derive(Debug, Clone)]
pub struct Seat {
    player: PlayerId,
    hand: Hand,
    alive: bool,
}

impl Seat {
    pub fn new(player: PlayerId, hand: Hand) -> Self {
        Self {
            player,
            hand,
            alive: true,
        }
    }
    pub fn player(&self) -> PlayerId {
        self.player
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
    pub fn alive(&self) -> bool {
        self.alive
    }
    pub fn eliminate(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn fresh_seat_is_alive() {
        let seat = Seat::new(PlayerId::new(), Hand::default());
        assert!(seat.alive());
    }
    #[test]
    fn eliminated_seat_keeps_identity() {
        let player = PlayerId::new();
        let mut seat = Seat::new(player, Hand::default());
        seat.eliminate();
        assert!(!seat.alive());
        assert_eq!(seat.player(), player);
    }
}
