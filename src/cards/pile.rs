use super::card::Card;
use super::card::CardId;

/// The face-up discard pile. Public information, append-only except for
/// five-cat claims, which may pull any card back out by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscardPile(Vec<Card>);

impl From<Vec<Card>> for DiscardPile {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl DiscardPile {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn top(&self) -> Option<&Card> {
        self.0.last()
    }
    pub fn contains(&self, id: CardId) -> bool {
        self.0.iter().any(|c| c.id() == id)
    }
    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.0.extend(cards);
    }
    /// Removes and returns the card with the given id, if present.
    pub fn claim(&mut self, id: CardId) -> Option<Card> {
        let i = self.0.iter().position(|c| c.id() == id)?;
        Some(self.0.remove(i))
    }
}
