use super::projector::ClientGameState;
use crate::cards::CardId;
use crate::gameplay::Action;
use crate::gameplay::Elimination;
use crate::gameplay::PlayedAction;
use crate::gameplay::PlayerId;
use serde::Deserialize;
use serde::Serialize;

/// Messages sent by clients. The sender's identity never travels in the
/// payload; the transport owner attributes each message to the player its
/// connection belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    StartGame,
    PlayCard {
        cards: Vec<CardId>,
        #[serde(default)]
        target: Option<PlayerId>,
    },
    DrawCard,
    Defuse {
        position: usize,
    },
    GiveCard {
        card: CardId,
    },
    PlayCounter {
        depth: usize,
    },
    AcknowledgePeek,
    PickCard {
        card: CardId,
    },
    RequestRestart,
    VoteRestart,
}

/// Messages sent to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full per-recipient state, re-sent after every mutation.
    Snapshot { state: ClientGameState },
    Started,
    Restarted,
    /// A play was declared; its window is open.
    Action { play: PlayedAction },
    Countered { player: PlayerId, depth: usize },
    Resolved { play: PlayedAction, cancelled: bool },
    Drew { player: PlayerId, bomb: bool },
    Defused { player: PlayerId },
    Gave { from: PlayerId, to: PlayerId },
    Stole { from: PlayerId, to: PlayerId },
    Claimed { player: PlayerId, card: CardId },
    TurnStarted { player: PlayerId, draws_remaining: u8 },
    TurnTick { remaining_ms: u64 },
    PlayerConnected { player: PlayerId },
    PlayerDisconnected { player: PlayerId },
    Eliminated { player: PlayerId, reason: Elimination },
    GameOver { winner: PlayerId },
    RestartRequested { player: PlayerId },
    /// Per-sender rejection; carries no state change.
    Rejected { reason: String },
    /// The game was torn down after an internal invariant failure.
    Terminated { reason: String },
}

impl ServerMessage {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}

/// Errors from the wire layer itself, before any rules run.
#[derive(Debug, Clone)]
pub enum ProtocolError {
    Malformed(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(s) => write!(f, "malformed message: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Conversion between wire messages and machine actions.
pub struct Protocol;

impl Protocol {
    /// Parses an inbound JSON frame.
    pub fn decode(s: &str) -> Result<ClientMessage, ProtocolError> {
        serde_json::from_str(s).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }
    /// Serializes an outbound message.
    pub fn encode(message: &ServerMessage) -> String {
        message.to_json()
    }
    /// Maps a wire message to a state-machine action. Room-lifecycle
    /// messages (start, restart votes) return `None`; the shell handles
    /// those itself.
    pub fn action(message: &ClientMessage) -> Option<Action> {
        match message {
            ClientMessage::PlayCard { cards, target } => Some(Action::Play {
                cards: cards.clone(),
                target: *target,
            }),
            ClientMessage::DrawCard => Some(Action::Draw),
            ClientMessage::Defuse { position } => Some(Action::Defuse {
                position: *position,
            }),
            ClientMessage::GiveCard { card } => Some(Action::Give { card: *card }),
            ClientMessage::PlayCounter { depth } => Some(Action::Counter { depth: *depth }),
            ClientMessage::AcknowledgePeek => Some(Action::AcknowledgePeek),
            ClientMessage::PickCard { card } => Some(Action::Pick { card: *card }),
            ClientMessage::StartGame
            | ClientMessage::RequestRestart
            | ClientMessage::VoteRestart => None,
        }
    }
}
