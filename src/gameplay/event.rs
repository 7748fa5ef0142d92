use super::played::PlayedAction;
use super::seat::PlayerId;
use crate::cards::CardId;
use serde::Serialize;

/// Why a seat left the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Elimination {
    /// Drew the bomb with no defuse in hand.
    Exploded,
    /// Disconnect grace period expired without a reconnect.
    TimedOut,
}

impl std::fmt::Display for Elimination {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Exploded => write!(f, "exploded"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Facts emitted by a successful state transition, in order. The room
/// shell turns these into broadcasts, timer changes, and collaborator
/// callbacks; the machine itself performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A play was declared; its interrupt window should open.
    Declared(PlayedAction),
    /// A counter was accepted, bringing the stack to `depth`.
    Countered { player: PlayerId, depth: usize },
    /// The window resolved; the subject applied or was cancelled.
    Resolved { play: PlayedAction, cancelled: bool },
    /// The current player drew the top card.
    Drew { player: PlayerId, bomb: bool },
    /// A pending bomb was neutralized and reinserted.
    Defused { player: PlayerId },
    /// Favor resolution moved one hidden card.
    Gave { from: PlayerId, to: PlayerId },
    /// Pair steal moved one hidden card.
    Stole { from: PlayerId, to: PlayerId },
    /// Five-cat claim took a public card from the discard pile.
    Claimed { player: PlayerId, card: CardId },
    /// The turn moved; `draws_remaining` is the new obligation.
    TurnStarted { player: PlayerId, draws_remaining: u8 },
    /// A seat left the game; its hand is in the discard pile.
    Eliminated { player: PlayerId, reason: Elimination },
    /// Exactly one seat remains.
    Won { player: PlayerId },
}
