use super::seat::PlayerId;
use crate::cards::CardId;

/// A decoded inbound player action, ready for validation by the state
/// machine. The acting player arrives alongside, bound by the room from
/// the transport the message came in on, never from the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Declare one card or a recognized combo, optionally at a target.
    Play {
        cards: Vec<CardId>,
        target: Option<PlayerId>,
    },
    /// Draw the top card, voluntarily or against a forced-draw obligation.
    Draw,
    /// Resolve a pending bomb by reinserting it at the given depth.
    Defuse { position: usize },
    /// Favor target's choice of which card to surrender.
    Give { card: CardId },
    /// Counter the declaration currently at `depth` on the interrupt stack.
    Counter { depth: usize },
    /// Close out a delivered peek.
    AcknowledgePeek,
    /// Five-cat claim of a discard-pile card.
    Pick { card: CardId },
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Play { cards, target: None } => write!(f, "play {} card(s)", cards.len()),
            Action::Play {
                cards,
                target: Some(t),
            } => write!(f, "play {} card(s) at {}", cards.len(), t),
            Action::Draw => write!(f, "draw"),
            Action::Defuse { position } => write!(f, "defuse at {}", position),
            Action::Give { card } => write!(f, "give {}", card),
            Action::Counter { depth } => write!(f, "counter depth {}", depth),
            Action::AcknowledgePeek => write!(f, "acknowledge peek"),
            Action::Pick { card } => write!(f, "pick {}", card),
        }
    }
}
