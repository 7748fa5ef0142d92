use super::card::Card;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// The shared draw pile. Ordered, with the top of the deck at the end of
/// the vector so that drawing is a pop. Insertion positions count from the
/// top: position 0 is the next card drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck(Vec<Card>);

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}
impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}

impl Deck {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    /// Removes and returns the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }
    /// Inserts a card at the given depth from the top, clamped to the deck
    /// size. Position 0 puts it on top, `len()` (or anything larger) on the
    /// bottom.
    pub fn insert(&mut self, position: usize, card: Card) {
        let depth = position.min(self.0.len());
        self.0.insert(self.0.len() - depth, card);
    }
    /// The top `n` cards in draw order without removing them. Shorter if
    /// the deck holds fewer than `n`.
    pub fn peek(&self, n: usize) -> Vec<Card> {
        self.0.iter().rev().take(n).copied().collect()
    }
    /// Uniform Fisher-Yates permutation of the whole pile.
    pub fn shuffle(&mut self, rng: &mut SmallRng) {
        self.0.shuffle(rng);
    }
    pub(crate) fn push(&mut self, card: Card) {
        self.0.push(card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::cards::CardKind;
    use rand::SeedableRng;

    fn deck(kinds: &[CardKind]) -> Deck {
        Deck::from(
            kinds
                .iter()
                .enumerate()
                .map(|(i, k)| Card::new(CardId::from(i as u32), *k))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn draw_takes_from_the_top() {
        let mut deck = deck(&[CardKind::Skip, CardKind::Attack]);
        assert_eq!(deck.draw().unwrap().kind(), CardKind::Attack);
        assert_eq!(deck.draw().unwrap().kind(), CardKind::Skip);
        assert!(deck.draw().is_none());
    }
    #[test]
    fn insert_at_zero_is_next_draw() {
        let mut deck = deck(&[CardKind::Skip, CardKind::Attack]);
        let bomb = Card::new(CardId::from(9), CardKind::Bomb);
        deck.insert(0, bomb);
        assert_eq!(deck.draw().unwrap().kind(), CardKind::Bomb);
    }
    #[test]
    fn insert_past_bottom_clamps() {
        let mut deck = deck(&[CardKind::Skip]);
        let bomb = Card::new(CardId::from(9), CardKind::Bomb);
        deck.insert(100, bomb);
        assert_eq!(deck.draw().unwrap().kind(), CardKind::Skip);
        assert_eq!(deck.draw().unwrap().kind(), CardKind::Bomb);
    }
    #[test]
    fn peek_matches_draw_order() {
        let mut deck = deck(&[CardKind::Skip, CardKind::Attack, CardKind::Favor]);
        let peeked: Vec<_> = deck.peek(2).iter().map(Card::kind).collect();
        assert_eq!(peeked, vec![CardKind::Favor, CardKind::Attack]);
        assert_eq!(deck.draw().unwrap().kind(), CardKind::Favor);
        assert_eq!(deck.draw().unwrap().kind(), CardKind::Attack);
    }
    #[test]
    fn peek_is_non_destructive() {
        let deck = deck(&[CardKind::Skip, CardKind::Attack]);
        assert_eq!(deck.peek(5).len(), 2);
        assert_eq!(deck.len(), 2);
    }
    #[test]
    fn shuffle_is_a_permutation() {
        for n in [0usize, 1, 2, 17, 52] {
            let mut deck = Deck::from(
                (0..n)
                    .map(|i| Card::new(CardId::from(i as u32), CardKind::Skip))
                    .collect::<Vec<_>>(),
            );
            let mut before: Vec<CardId> = deck.cards().iter().map(Card::id).collect();
            let mut rng = SmallRng::seed_from_u64(42);
            deck.shuffle(&mut rng);
            let mut after: Vec<CardId> = deck.cards().iter().map(Card::id).collect();
            before.sort();
            after.sort();
            assert_eq!(before, after);
        }
    }
}
