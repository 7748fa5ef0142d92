use super::protocol::ServerMessage;
use crate::gameplay::PlayerId;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

/// The room's view of its seats and their transports: a fixed, ordered
/// seating plus whatever outbound sender is currently bound to each
/// player. The room never holds transport objects, only these senders;
/// a player without one is disconnected.
#[derive(Debug)]
pub struct Table {
    order: Vec<PlayerId>,
    senders: HashMap<PlayerId, UnboundedSender<ServerMessage>>,
}

impl Table {
    /// Creates a table for a fixed seating order.
    pub fn new(order: Vec<PlayerId>) -> Self {
        Self {
            order,
            senders: HashMap::new(),
        }
    }
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }
    pub fn is_seated(&self, player: &PlayerId) -> bool {
        self.order.contains(player)
    }
    pub fn is_attached(&self, player: &PlayerId) -> bool {
        self.senders.contains_key(player)
    }
    pub fn attached_count(&self) -> usize {
        self.senders.len()
    }
    /// Binds an outbound sender to a seated player. Rejected for
    /// strangers.
    pub fn attach(&mut self, player: PlayerId, sender: UnboundedSender<ServerMessage>) -> bool {
        if !self.is_seated(&player) {
            return false;
        }
        self.senders.insert(player, sender);
        true
    }
    /// Unbinds a player's sender. Returns whether one was bound.
    pub fn detach(&mut self, player: &PlayerId) -> bool {
        self.senders.remove(player).is_some()
    }
    /// Sends a message to one player.
    pub fn unicast(&self, player: PlayerId, message: ServerMessage) {
        match self.senders.get(&player).map(|tx| tx.send(message)) {
            Some(Ok(())) => {}
            Some(Err(e)) => log::warn!("[table] unicast to {} failed: {:?}", player, e),
            None => log::debug!("[table] unicast to {}: not attached", player),
        }
    }
    /// Sends a message to every attached player.
    pub fn broadcast(&self, message: ServerMessage) {
        for (player, tx) in &self.senders {
            if let Err(e) = tx.send(message.clone()) {
                log::warn!("[table] broadcast to {} failed: {:?}", player, e);
            }
        }
    }
}
