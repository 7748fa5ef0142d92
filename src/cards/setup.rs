use super::card::Card;
use super::card::CardId;
use super::card::CardKind;
use super::deck::Deck;
use super::hand::Hand;
use rand::rngs::SmallRng;

/// Cards dealt to each player on top of their reserved defuse.
pub const HAND_SIZE: usize = 7;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

/// Per-kind quantities for one player-count bracket.
///
/// Defuses and bombs are governed separately: defuse count is always
/// `players + 1` (one reserved per player for the opening deal, the
/// remainder shuffled into the pile), and `players - 1` bombs are inserted
/// only after the deal. Each bracket is sized so the opening deal can never
/// run the pile dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composition {
    pub skip: usize,
    pub attack: usize,
    pub shuffle: usize,
    pub peek: usize,
    pub counter: usize,
    pub favor: usize,
    pub cats_each: usize,
}

impl Composition {
    const SMALL: Self = Self {
        skip: 4,
        attack: 4,
        shuffle: 2,
        peek: 3,
        counter: 4,
        favor: 2,
        cats_each: 3,
    };
    const MEDIUM: Self = Self {
        skip: 7,
        attack: 7,
        shuffle: 5,
        peek: 6,
        counter: 7,
        favor: 5,
        cats_each: 5,
    };
    const LARGE: Self = Self {
        skip: 10,
        attack: 8,
        shuffle: 8,
        peek: 8,
        counter: 10,
        favor: 8,
        cats_each: 6,
    };

    /// Bracket lookup. Panics outside the supported player range.
    pub fn bracket(players: usize) -> Self {
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&players),
            "unsupported player count {}",
            players
        );
        match players {
            2..=3 => Self::SMALL,
            4..=7 => Self::MEDIUM,
            _ => Self::LARGE,
        }
    }
    /// Per-kind quantities of the built pile, spare defuse included.
    pub fn quantities(&self) -> Vec<(CardKind, usize)> {
        let mut counts = vec![
            (CardKind::Skip, self.skip),
            (CardKind::Attack, self.attack),
            (CardKind::Shuffle, self.shuffle),
            (CardKind::PeekFuture, self.peek),
            (CardKind::Counter, self.counter),
            (CardKind::Favor, self.favor),
            (CardKind::Defuse, 1),
        ];
        counts.extend(CardKind::CATS.map(|cat| (cat, self.cats_each)));
        counts
    }
    /// Size of the built pile before dealing.
    pub fn total(&self) -> usize {
        self.quantities().iter().map(|(_, n)| n).sum()
    }
}

/// Everything minted for one game before the opening deal: the shuffled
/// pile, one reserved defuse per seat, and the bombs held back until the
/// deal is done. Card ids are dense and unique across all three.
#[derive(Debug)]
pub struct Shoe {
    pile: Deck,
    reserves: Vec<Card>,
    bombs: Vec<Card>,
}

impl Shoe {
    /// Mints and shuffles every card for a game of `players`.
    pub fn build(players: usize, rng: &mut SmallRng) -> Self {
        let composition = Composition::bracket(players);
        let mut next = 0u32;
        let mut mint = |kind: CardKind| {
            let card = Card::new(CardId::from(next), kind);
            next += 1;
            card
        };
        let mut pile = Deck::default();
        for (kind, quantity) in composition.quantities() {
            for _ in 0..quantity {
                pile.push(mint(kind));
            }
        }
        let reserves = (0..players).map(|_| mint(CardKind::Defuse)).collect();
        let bombs = (0..players - 1).map(|_| mint(CardKind::Bomb)).collect();
        pile.shuffle(rng);
        Self {
            pile,
            reserves,
            bombs,
        }
    }
    pub fn pile(&self) -> &Deck {
        &self.pile
    }
    pub fn bombs(&self) -> &[Card] {
        &self.bombs
    }
    pub fn reserves(&self) -> &[Card] {
        &self.reserves
    }
    /// Opening deal: each seat gets its reserved defuse plus [`HAND_SIZE`]
    /// cards off the top, then the bombs are shuffled into what remains.
    ///
    /// Bracket sizing guarantees sufficiency; a shortfall would be a
    /// construction bug, so it asserts rather than clamps.
    pub fn deal(mut self, rng: &mut SmallRng) -> (Deck, Vec<Hand>) {
        let players = self.reserves.len();
        assert!(
            self.pile.len() >= players * HAND_SIZE,
            "bracket sizing must cover the opening deal"
        );
        let hands = self
            .reserves
            .drain(..)
            .map(|defuse| {
                let mut hand = Hand::from(vec![defuse]);
                for _ in 0..HAND_SIZE {
                    hand.push(self.pile.draw().expect("sizing checked above"));
                }
                hand
            })
            .collect();
        for bomb in self.bombs.drain(..) {
            self.pile.push(bomb);
        }
        self.pile.shuffle(rng);
        (self.pile, hands)
    }
}
