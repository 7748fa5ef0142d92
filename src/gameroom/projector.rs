use crate::cards::Card;
use crate::gameplay::*;
use serde::Serialize;
use std::time::Duration;

/// A seat as everyone but its owner sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub player: PlayerId,
    pub cards: usize,
    pub alive: bool,
    pub connected: bool,
}

/// The pending sub-phase as a given recipient may see it. Peeked card
/// contents are withheld from everyone but the peeking player; the parked
/// bomb of a pending defuse is public knowledge anyway (the draw was
/// broadcast) so only the card itself is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingView {
    DefuseInsert {
        player: PlayerId,
    },
    FavorGive {
        actor: PlayerId,
        target: PlayerId,
    },
    PeekFuture {
        player: PlayerId,
        #[serde(skip_serializing_if = "Option::is_none")]
        cards: Option<Vec<Card>>,
    },
    PickFromDiscard {
        player: PlayerId,
    },
}

/// The open interrupt window. Entirely public: everyone needs to know
/// what can still be countered and how deep the stack is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowView {
    pub subject: PlayedAction,
    pub depth: usize,
}

/// Per-recipient, hand-redacting view of the authoritative state. This is
/// the only shape clients ever receive; it is recomputed wholesale after
/// every authoritative mutation, never patched incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientGameState {
    /// The recipient's own hand, verbatim.
    pub hand: Vec<Card>,
    /// Every seat in order; hands reduced to counts.
    pub seats: Vec<SeatView>,
    /// Draw pile reduced to its size.
    pub deck: usize,
    /// The discard pile is public.
    pub discard: Vec<Card>,
    pub current: PlayerId,
    pub draws_remaining: u8,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_play: Option<PlayedAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_remaining_ms: Option<u64>,
}

/// Derives [`ClientGameState`] from authoritative state for one recipient.
pub struct Projector;

impl Projector {
    pub fn project<F>(
        game: &Game,
        viewer: PlayerId,
        turn_remaining: Option<Duration>,
        connected: F,
    ) -> ClientGameState
    where
        F: Fn(&PlayerId) -> bool,
    {
        let hand = game
            .seat(viewer)
            .map(|s| s.hand().cards().to_vec())
            .unwrap_or_default();
        let seats = game
            .seats()
            .iter()
            .map(|seat| SeatView {
                player: seat.player(),
                cards: seat.hand().len(),
                alive: seat.alive(),
                connected: connected(&seat.player()),
            })
            .collect();
        let pending = game.pending().map(|pending| match pending {
            PendingAction::DefuseInsert { player, .. } => {
                PendingView::DefuseInsert { player: *player }
            }
            PendingAction::FavorGive { actor, target } => PendingView::FavorGive {
                actor: *actor,
                target: *target,
            },
            PendingAction::PeekFuture { player, cards } => PendingView::PeekFuture {
                player: *player,
                cards: (*player == viewer).then(|| cards.clone()),
            },
            PendingAction::PickFromDiscard { player } => {
                PendingView::PickFromDiscard { player: *player }
            }
        });
        let window = game.interrupt().map(|w| WindowView {
            subject: *w.subject(),
            depth: w.depth(),
        });
        ClientGameState {
            hand,
            seats,
            deck: game.deck().len(),
            discard: game.discard().cards().to_vec(),
            current: game.current_player(),
            draws_remaining: game.draws_remaining(),
            phase: game.phase(),
            pending,
            window,
            last_play: game.last_play().copied(),
            winner: game.winner(),
            turn_remaining_ms: turn_remaining.map(|d| d.as_millis() as u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::*;

    fn mint(id: u32, kind: CardKind) -> Card {
        Card::new(CardId::from(id), kind)
    }

    #[test]
    fn own_hand_verbatim_others_as_counts() {
        let players: Vec<PlayerId> = (0..3).map(|_| PlayerId::new()).collect();
        let game = Game::seeded(players.clone(), 21);
        let view = Projector::project(&game, players[0], None, |_| true);
        assert_eq!(view.hand.len(), 8);
        assert_eq!(view.seats.len(), 3);
        for seat in &view.seats {
            assert_eq!(seat.cards, 8);
        }
        assert_eq!(view.deck, game.deck().len());
        assert_eq!(view.current, players[0]);
    }
    #[test]
    fn no_other_hand_leaks_through_any_view() {
        let players: Vec<PlayerId> = (0..3).map(|_| PlayerId::new()).collect();
        let game = Game::seeded(players.clone(), 22);
        let view = Projector::project(&game, players[1], None, |_| true);
        let visible: Vec<CardId> = view
            .hand
            .iter()
            .chain(view.discard.iter())
            .map(Card::id)
            .collect();
        for other in [players[0], players[2]] {
            for card in game.seat(other).unwrap().hand().cards() {
                assert!(!visible.contains(&card.id()));
            }
        }
    }
    #[test]
    fn peeked_cards_visible_only_to_the_peeker() {
        let players: Vec<PlayerId> = (0..2).map(|_| PlayerId::new()).collect();
        let (p1, p2) = (players[0], players[1]);
        let deck = vec![
            mint(10, CardKind::TacoCat),
            mint(11, CardKind::BeardCat),
            mint(12, CardKind::RainbowCat),
        ];
        let hands = vec![vec![mint(0, CardKind::PeekFuture)], vec![mint(1, CardKind::Defuse)]];
        let mut game = Game::rigged(players, deck, hands, 23);
        game.apply(
            p1,
            Action::Play {
                cards: vec![CardId::from(0)],
                target: None,
            },
        )
        .unwrap();
        game.resolve_interrupt().unwrap();

        let mine = Projector::project(&game, p1, None, |_| true);
        let theirs = Projector::project(&game, p2, None, |_| true);
        assert!(matches!(
            mine.pending,
            Some(PendingView::PeekFuture { cards: Some(_), .. })
        ));
        assert!(matches!(
            theirs.pending,
            Some(PendingView::PeekFuture { cards: None, .. })
        ));
    }
    #[test]
    fn turn_time_and_connectivity_pass_through() {
        let players: Vec<PlayerId> = (0..2).map(|_| PlayerId::new()).collect();
        let game = Game::seeded(players.clone(), 24);
        let absent = players[1];
        let view = Projector::project(
            &game,
            players[0],
            Some(Duration::from_millis(1500)),
            |p| *p != absent,
        );
        assert_eq!(view.turn_remaining_ms, Some(1500));
        assert!(view.seats[0].connected);
        assert!(!view.seats[1].connected);
    }
}
