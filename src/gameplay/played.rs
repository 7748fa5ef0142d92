use super::seat::PlayerId;
use serde::Serialize;

/// What a declaration does once its interrupt window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayKind {
    Skip,
    Attack,
    Shuffle,
    PeekFuture,
    Favor,
    PairSteal,
    FiveCats,
}

impl std::fmt::Display for PlayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            PlayKind::Skip => "skip",
            PlayKind::Attack => "attack",
            PlayKind::Shuffle => "shuffle",
            PlayKind::PeekFuture => "peek-future",
            PlayKind::Favor => "favor",
            PlayKind::PairSteal => "pair-steal",
            PlayKind::FiveCats => "five-cats",
        };
        write!(f, "{}", name)
    }
}

/// Immutable audit record of the most recent declaration, and the sole
/// subject of interrupt resolution. `seq` is a per-game monotonic counter;
/// wall-clock timestamps are the room shell's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayedAction {
    pub actor: PlayerId,
    pub kind: PlayKind,
    pub target: Option<PlayerId>,
    pub seq: u64,
}

impl std::fmt::Display for PlayedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.target {
            Some(target) => write!(f, "{} {} at {}", self.actor, self.kind, target),
            None => write!(f, "{} {}", self.actor, self.kind),
        }
    }
}
