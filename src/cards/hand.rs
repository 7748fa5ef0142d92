use super::card::Card;
use super::card::CardId;
use super::card::CardKind;
use rand::Rng;
use rand::rngs::SmallRng;

/// A player's cards. Rules treat this as a multiset; insertion order is
/// preserved across removals so clients see a stable layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand(Vec<Card>);

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl Hand {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn push(&mut self, card: Card) {
        self.0.push(card);
    }
    pub fn get(&self, id: CardId) -> Option<Card> {
        self.0.iter().find(|c| c.id() == id).copied()
    }
    pub fn holds(&self, kind: CardKind) -> bool {
        self.0.iter().any(|c| c.kind() == kind)
    }
    pub fn count(&self, kind: CardKind) -> usize {
        self.0.iter().filter(|c| c.kind() == kind).count()
    }
    /// Removes the card with the given id, if held.
    pub fn take(&mut self, id: CardId) -> Option<Card> {
        let i = self.0.iter().position(|c| c.id() == id)?;
        Some(self.0.remove(i))
    }
    /// Removes the first held card of the given kind.
    pub fn take_kind(&mut self, kind: CardKind) -> Option<Card> {
        let i = self.0.iter().position(|c| c.kind() == kind)?;
        Some(self.0.remove(i))
    }
    /// Removes one card uniformly at random.
    pub fn take_random(&mut self, rng: &mut SmallRng) -> Option<Card> {
        if self.0.is_empty() {
            None
        } else {
            let i = rng.random_range(0..self.0.len());
            Some(self.0.remove(i))
        }
    }
    /// Empties the hand, returning every card in display order.
    pub fn drain(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn hand(kinds: &[CardKind]) -> Hand {
        Hand::from(
            kinds
                .iter()
                .enumerate()
                .map(|(i, k)| Card::new(CardId::from(i as u32), *k))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn take_preserves_display_order() {
        let mut hand = hand(&[CardKind::Skip, CardKind::Attack, CardKind::Favor]);
        hand.take(CardId::from(1));
        let kinds: Vec<_> = hand.cards().iter().map(Card::kind).collect();
        assert_eq!(kinds, vec![CardKind::Skip, CardKind::Favor]);
    }
    #[test]
    fn take_kind_takes_first_match() {
        let mut hand = hand(&[CardKind::Defuse, CardKind::Skip, CardKind::Defuse]);
        let taken = hand.take_kind(CardKind::Defuse).unwrap();
        assert_eq!(taken.id(), CardId::from(0));
        assert_eq!(hand.count(CardKind::Defuse), 1);
    }
    #[test]
    fn take_random_from_empty_is_none() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(Hand::default().take_random(&mut rng).is_none());
    }
    #[test]
    fn take_random_removes_exactly_one() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut hand = hand(&[CardKind::Skip, CardKind::Attack, CardKind::Favor]);
        let taken = hand.take_random(&mut rng).unwrap();
        assert_eq!(hand.len(), 2);
        assert!(hand.get(taken.id()).is_none());
    }
}
