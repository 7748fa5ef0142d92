use super::card::Card;
use super::card::CardKind;

/// A recognized multi-card play shape.
///
/// Classification is a total function over any card slice: selections that
/// form no legal shape yield `None`, never a panic, including empty and
/// wrongly-sized inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combo {
    /// Two cards of the same kind (bomb and defuse excluded). Steals a
    /// random card from a declared target.
    Pair(CardKind),
    /// Five cards covering all five distinct cat kinds. Claims any card
    /// from the discard pile.
    FiveCats,
}

impl Combo {
    pub fn classify(cards: &[Card]) -> Option<Self> {
        match cards {
            [a, b] if a.id() != b.id() && a.kind() == b.kind() && a.kind().is_pairable() => {
                Some(Self::Pair(a.kind()))
            }
            five @ [_, _, _, _, _] => {
                let mut kinds: Vec<CardKind> = five.iter().map(Card::kind).collect();
                kinds.sort();
                kinds.dedup();
                (kinds.len() == 5 && kinds.iter().all(|k| k.is_cat())).then_some(Self::FiveCats)
            }
            _ => None,
        }
    }
}
