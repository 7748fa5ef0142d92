//! Deterministic end-to-end scenarios against rigged decks.

use super::*;
use crate::cards::*;

fn mint(id: u32, kind: CardKind) -> Card {
    Card::new(CardId::from(id), kind)
}
fn players(n: usize) -> Vec<PlayerId> {
    (0..n).map(|_| PlayerId::new()).collect()
}
fn play_one(game: &mut Game, actor: PlayerId, card: u32) -> Vec<Event> {
    game.apply(
        actor,
        Action::Play {
            cards: vec![CardId::from(card)],
            target: None,
        },
    )
    .unwrap()
}
fn play_at(game: &mut Game, actor: PlayerId, cards: &[u32], target: PlayerId) -> Vec<Event> {
    game.apply(
        actor,
        Action::Play {
            cards: cards.iter().map(|c| CardId::from(*c)).collect(),
            target: Some(target),
        },
    )
    .unwrap()
}

#[test]
fn two_player_attack_scenario_exact_sequence() {
    let ids = players(2);
    let (p1, p2) = (ids[0], ids[1]);
    let deck = vec![
        mint(90, CardKind::Bomb),
        mint(3, CardKind::TacoCat),
        mint(4, CardKind::BeardCat),
        mint(5, CardKind::Skip),
    ];
    let hands = vec![
        vec![mint(0, CardKind::Defuse)],
        vec![mint(1, CardKind::Defuse), mint(2, CardKind::Attack)],
    ];
    let mut game = Game::rigged(ids, deck, hands, 1);

    let events = game.apply(p1, Action::Draw).unwrap();
    assert!(events.contains(&Event::TurnStarted {
        player: p2,
        draws_remaining: 1,
    }));

    let events = play_one(&mut game, p2, 2);
    assert!(matches!(events[0], Event::Declared(_)));
    // the declared attack has no effect yet, and draws are blocked
    assert_eq!(game.current_player(), p2);
    let err = game.apply(p1, Action::Draw).unwrap_err();
    assert!(matches!(err, ActionError::InvalidAction(_)));

    let events = game.resolve_interrupt().unwrap();
    assert!(events.contains(&Event::TurnStarted {
        player: p1,
        draws_remaining: 2,
    }));
    assert_eq!(game.current_player(), p1);
    assert_eq!(game.draws_remaining(), 2);
    assert_eq!(game.phase(), Phase::DrawPending);

    // first forced draw keeps the turn
    game.apply(p1, Action::Draw).unwrap();
    assert_eq!(game.current_player(), p1);
    assert_eq!(game.draws_remaining(), 1);
    assert_eq!(game.phase(), Phase::DrawPending);

    // second forced draw ends it
    let events = game.apply(p1, Action::Draw).unwrap();
    assert!(events.contains(&Event::TurnStarted {
        player: p2,
        draws_remaining: 1,
    }));
    assert_eq!(game.current_player(), p2);
    assert_eq!(game.draws_remaining(), 1);
    assert_eq!(game.phase(), Phase::Normal);
}

#[test]
fn attacks_stack_cumulatively() {
    let ids = players(3);
    let (p1, p2, p3) = (ids[0], ids[1], ids[2]);
    let deck = vec![
        mint(90, CardKind::Bomb),
        mint(10, CardKind::TacoCat),
        mint(11, CardKind::TacoCat),
        mint(12, CardKind::TacoCat),
        mint(13, CardKind::TacoCat),
    ];
    let hands = vec![
        vec![mint(0, CardKind::Attack)],
        vec![mint(1, CardKind::Attack)],
        vec![mint(2, CardKind::Skip)],
    ];
    let mut game = Game::rigged(ids, deck, hands, 2);

    // fresh attack: victim owes 2
    play_one(&mut game, p1, 0);
    game.resolve_interrupt().unwrap();
    assert_eq!(game.current_player(), p2);
    assert_eq!(game.draws_remaining(), 2);

    // attacking with an unserved stack passes it on plus two
    play_one(&mut game, p2, 1);
    let events = game.resolve_interrupt().unwrap();
    assert!(events.contains(&Event::TurnStarted {
        player: p3,
        draws_remaining: 4,
    }));
    assert_eq!(game.draws_remaining(), 4);
    assert_eq!(game.phase(), Phase::DrawPending);

    // a skip cancels exactly one owed draw, not the stack
    play_one(&mut game, p3, 2);
    game.resolve_interrupt().unwrap();
    assert_eq!(game.current_player(), p3);
    assert_eq!(game.draws_remaining(), 3);
    assert_eq!(game.phase(), Phase::DrawPending);
}

#[test]
fn counter_cancels_exactly_one_action() {
    let ids = players(2);
    let (p1, p2) = (ids[0], ids[1]);
    let deck = vec![mint(90, CardKind::Bomb), mint(10, CardKind::TacoCat)];
    let hands = vec![
        vec![mint(0, CardKind::Attack)],
        vec![mint(1, CardKind::Counter)],
    ];
    let mut game = Game::rigged(ids, deck, hands, 3);

    play_one(&mut game, p1, 0);
    let events = game.apply(p2, Action::Counter { depth: 0 }).unwrap();
    assert_eq!(
        events,
        vec![Event::Countered {
            player: p2,
            depth: 1,
        }]
    );
    let events = game.resolve_interrupt().unwrap();
    assert!(matches!(
        events[0],
        Event::Resolved {
            cancelled: true,
            ..
        }
    ));
    // the attack never applied: p1 is still up with the usual obligation
    assert_eq!(game.current_player(), p1);
    assert_eq!(game.draws_remaining(), 1);
    assert_eq!(game.phase(), Phase::Normal);
    // both the attack and the counter are in the discard pile
    assert!(game.discard().contains(CardId::from(0)));
    assert!(game.discard().contains(CardId::from(1)));
}

#[test]
fn counter_of_counter_restores_the_action() {
    let ids = players(3);
    let (p1, p2, p3) = (ids[0], ids[1], ids[2]);
    let deck = vec![mint(90, CardKind::Bomb), mint(10, CardKind::TacoCat)];
    let hands = vec![
        vec![mint(0, CardKind::Attack)],
        vec![mint(1, CardKind::Counter)],
        vec![mint(2, CardKind::Counter)],
    ];
    let mut game = Game::rigged(ids, deck, hands, 4);

    play_one(&mut game, p1, 0);
    game.apply(p2, Action::Counter { depth: 0 }).unwrap();
    game.apply(p3, Action::Counter { depth: 1 }).unwrap();
    let events = game.resolve_interrupt().unwrap();
    assert!(matches!(
        events[0],
        Event::Resolved {
            cancelled: false,
            ..
        }
    ));
    assert_eq!(game.current_player(), p2);
    assert_eq!(game.draws_remaining(), 2);
}

#[test]
fn racing_counter_with_stale_depth_is_rejected() {
    let ids = players(3);
    let (p1, p2, p3) = (ids[0], ids[1], ids[2]);
    let deck = vec![mint(90, CardKind::Bomb), mint(10, CardKind::TacoCat)];
    let hands = vec![
        vec![mint(0, CardKind::Attack)],
        vec![mint(1, CardKind::Counter)],
        vec![mint(2, CardKind::Counter)],
    ];
    let mut game = Game::rigged(ids, deck, hands, 4);

    play_one(&mut game, p1, 0);
    game.apply(p2, Action::Counter { depth: 0 }).unwrap();
    let err = game.apply(p3, Action::Counter { depth: 0 }).unwrap_err();
    assert!(matches!(err, ActionError::RaceRejected(_)));
    // the loser's card was not consumed
    assert!(game.seat(p3).unwrap().hand().holds(CardKind::Counter));
    assert_eq!(game.interrupt().unwrap().depth(), 1);
}

#[test]
fn defuse_reinserts_the_bomb_at_the_chosen_depth() {
    let ids = players(2);
    let (p1, p2) = (ids[0], ids[1]);
    // p1 will draw the bomb immediately
    let deck = vec![
        mint(10, CardKind::TacoCat),
        mint(11, CardKind::BeardCat),
        mint(90, CardKind::Bomb),
    ];
    let hands = vec![
        vec![mint(0, CardKind::Defuse)],
        vec![mint(1, CardKind::Defuse)],
    ];
    let mut game = Game::rigged(ids, deck, hands, 5);

    let events = game.apply(p1, Action::Draw).unwrap();
    assert!(events.contains(&Event::Drew {
        player: p1,
        bomb: true,
    }));
    assert_eq!(game.phase(), Phase::DefusePending);

    // reinsert one under the top, then the turn passes
    let events = game.apply(p1, Action::Defuse { position: 1 }).unwrap();
    assert!(events.contains(&Event::Defused { player: p1 }));
    assert_eq!(game.current_player(), p2);
    // exactly one defuse was consumed
    assert_eq!(game.seat(p1).unwrap().hand().count(CardKind::Defuse), 0);
    assert!(game.discard().cards().iter().any(|c| c.kind() == CardKind::Defuse));
    assert!(game.winner().is_none());

    // subsequent draw sequence proves the placement: beard-cat, then bomb
    let events = game.apply(p2, Action::Draw).unwrap();
    assert!(events.contains(&Event::Drew {
        player: p2,
        bomb: false,
    }));
    assert!(game.seat(p2).unwrap().hand().get(CardId::from(11)).is_some());
    let events = game.apply(p1, Action::Draw).unwrap();
    assert!(events.contains(&Event::Drew {
        player: p1,
        bomb: true,
    }));
}

#[test]
fn undefused_bomb_eliminates_without_early_win() {
    let ids = players(4);
    let (p1, p2, p3, p4) = (ids[0], ids[1], ids[2], ids[3]);
    // bottom-to-top: p1 and p2 draw cats, p3 draws the bomb
    let deck = vec![
        mint(20, CardKind::TacoCat),
        mint(21, CardKind::BeardCat),
        mint(90, CardKind::Bomb),
        mint(22, CardKind::RainbowCat),
        mint(23, CardKind::PotatoCat),
    ];
    let hands = vec![
        vec![mint(0, CardKind::Defuse)],
        vec![mint(1, CardKind::Defuse)],
        vec![mint(2, CardKind::Skip), mint(3, CardKind::Favor)],
        vec![mint(4, CardKind::Defuse)],
    ];
    let mut game = Game::rigged(ids.clone(), deck, hands, 6);

    game.apply(p1, Action::Draw).unwrap();
    game.apply(p2, Action::Draw).unwrap();
    let events = game.apply(p3, Action::Draw).unwrap();
    assert!(events.contains(&Event::Eliminated {
        player: p3,
        reason: Elimination::Exploded,
    }));
    // no winner yet: three players remain
    assert!(game.winner().is_none());
    assert_eq!(game.alive(), 3);
    assert_eq!(game.current_player(), p4);

    // p3's cards are in the discard pile and nowhere else
    for id in [2u32, 3] {
        assert!(game.discard().contains(CardId::from(id)));
        assert!(game.deck().cards().iter().all(|c| c.id() != CardId::from(id)));
        for p in &ids {
            assert!(game.seat(*p).unwrap().hand().get(CardId::from(id)).is_none());
        }
    }
    // the bomb is out of circulation, not discarded
    assert!(game.destroyed().iter().any(|c| c.id() == CardId::from(90)));
    assert!(!game.discard().contains(CardId::from(90)));
    assert!(game.audit().is_ok());
}

#[test]
fn turn_order_skips_eliminated_seats_permanently() {
    let ids = players(3);
    let (p1, p2, p3) = (ids[0], ids[1], ids[2]);
    let deck = vec![
        mint(10, CardKind::TacoCat),
        mint(11, CardKind::BeardCat),
        mint(12, CardKind::RainbowCat),
        mint(13, CardKind::PotatoCat),
    ];
    let hands = vec![
        vec![mint(0, CardKind::Defuse)],
        vec![mint(1, CardKind::Defuse)],
        vec![mint(2, CardKind::Defuse)],
    ];
    let mut game = Game::rigged(ids, deck, hands, 7);

    let events = game.timeout_eliminate(p2).unwrap();
    assert!(events.contains(&Event::Eliminated {
        player: p2,
        reason: Elimination::TimedOut,
    }));
    // eliminated exactly once; a second expiry is a quiet no-op
    assert!(game.timeout_eliminate(p2).unwrap().is_empty());
    // p2's hand went to the discard pile
    assert!(game.discard().contains(CardId::from(1)));

    // p1 -> p3, permanently skipping p2
    let events = game.apply(p1, Action::Draw).unwrap();
    assert!(events.contains(&Event::TurnStarted {
        player: p3,
        draws_remaining: 1,
    }));
    let events = game.apply(p3, Action::Draw).unwrap();
    assert!(events.contains(&Event::TurnStarted {
        player: p1,
        draws_remaining: 1,
    }));
}

#[test]
fn timeout_of_last_opponent_ends_the_game() {
    let ids = players(2);
    let (p1, p2) = (ids[0], ids[1]);
    let deck = vec![mint(10, CardKind::TacoCat)];
    let hands = vec![vec![mint(0, CardKind::Defuse)], vec![mint(1, CardKind::Defuse)]];
    let mut game = Game::rigged(ids, deck, hands, 8);

    let events = game.timeout_eliminate(p2).unwrap();
    assert!(events.contains(&Event::Won { player: p1 }));
    assert_eq!(game.winner(), Some(p1));
    assert_eq!(game.phase(), Phase::Over);
    // terminal: nothing further is accepted
    let err = game.apply(p1, Action::Draw).unwrap_err();
    assert!(matches!(err, ActionError::InvalidAction(_)));
}

#[test]
fn favor_moves_the_chosen_card() {
    let ids = players(2);
    let (p1, p2) = (ids[0], ids[1]);
    let deck = vec![mint(10, CardKind::TacoCat), mint(11, CardKind::BeardCat)];
    let hands = vec![
        vec![mint(0, CardKind::Favor)],
        vec![mint(1, CardKind::Defuse), mint(2, CardKind::Skip)],
    ];
    let mut game = Game::rigged(ids, deck, hands, 9);

    play_at(&mut game, p1, &[0], p2);
    game.resolve_interrupt().unwrap();
    assert_eq!(game.phase(), Phase::FavorPending);
    // only the target's give resolves it
    let err = game
        .apply(p1, Action::Give { card: CardId::from(2) })
        .unwrap_err();
    assert!(matches!(err, ActionError::InvalidAction(_)));
    let events = game
        .apply(p2, Action::Give { card: CardId::from(2) })
        .unwrap();
    assert_eq!(events, vec![Event::Gave { from: p2, to: p1 }]);
    assert!(game.seat(p1).unwrap().hand().get(CardId::from(2)).is_some());
    // the favor did not end the turn
    assert_eq!(game.current_player(), p1);
    assert_eq!(game.phase(), Phase::Normal);
}

#[test]
fn favor_at_empty_hand_is_a_rule_violation() {
    let ids = players(2);
    let (p1, p2) = (ids[0], ids[1]);
    let deck = vec![mint(10, CardKind::TacoCat)];
    let hands = vec![vec![mint(0, CardKind::Favor)], vec![]];
    let mut game = Game::rigged(ids, deck, hands, 10);

    let err = game
        .apply(
            p1,
            Action::Play {
                cards: vec![CardId::from(0)],
                target: Some(p2),
            },
        )
        .unwrap_err();
    assert!(matches!(err, ActionError::RuleViolation(_)));
    // rejected before any mutation
    assert!(game.seat(p1).unwrap().hand().holds(CardKind::Favor));
    assert!(game.interrupt().is_none());
}

#[test]
fn pair_steals_one_random_card() {
    let ids = players(2);
    let (p1, p2) = (ids[0], ids[1]);
    let deck = vec![mint(10, CardKind::TacoCat)];
    let hands = vec![
        vec![mint(0, CardKind::MelonCat), mint(1, CardKind::MelonCat)],
        vec![mint(2, CardKind::Defuse), mint(3, CardKind::Skip)],
    ];
    let mut game = Game::rigged(ids, deck, hands, 11);

    play_at(&mut game, p1, &[0, 1], p2);
    let events = game.resolve_interrupt().unwrap();
    assert!(events.contains(&Event::Stole { from: p2, to: p1 }));
    assert_eq!(game.seat(p2).unwrap().hand().len(), 1);
    assert_eq!(game.seat(p1).unwrap().hand().len(), 1);
    // the pair itself is discarded
    assert!(game.discard().contains(CardId::from(0)));
    assert!(game.discard().contains(CardId::from(1)));
    // turn continues
    assert_eq!(game.current_player(), p1);
}

#[test]
fn five_cats_claim_from_discard() {
    let ids = players(2);
    let (p1, p2) = (ids[0], ids[1]);
    let deck = vec![mint(20, CardKind::PeekFuture), mint(21, CardKind::BeardCat)];
    let five_cats: Vec<Card> = CardKind::CATS
        .iter()
        .enumerate()
        .map(|(i, k)| mint(i as u32, *k))
        .collect();
    let mut p2_hand = five_cats.clone();
    p2_hand.push(mint(6, CardKind::Defuse));
    let hands = vec![vec![mint(5, CardKind::Skip)], p2_hand];
    let mut game = Game::rigged(ids, deck, hands, 12);

    // p1's skip seeds the discard pile and hands the turn to p2
    play_one(&mut game, p1, 5);
    game.resolve_interrupt().unwrap();
    assert_eq!(game.current_player(), p2);

    let events = game
        .apply(
            p2,
            Action::Play {
                cards: five_cats.iter().map(|c| c.id()).collect(),
                target: None,
            },
        )
        .unwrap();
    assert!(matches!(events[0], Event::Declared(_)));
    game.resolve_interrupt().unwrap();
    assert_eq!(game.phase(), Phase::PickPending);

    // claim the skip p1 discarded earlier
    let events = game
        .apply(p2, Action::Pick { card: CardId::from(5) })
        .unwrap();
    assert_eq!(
        events,
        vec![Event::Claimed {
            player: p2,
            card: CardId::from(5),
        }]
    );
    assert!(game.seat(p2).unwrap().hand().get(CardId::from(5)).is_some());
    // the five cats stay discarded
    assert_eq!(game.discard().len(), 5);
    assert_eq!(game.current_player(), p2);
}

#[test]
fn five_cats_with_empty_discard_rejected_before_mutation() {
    let ids = players(2);
    let p1 = ids[0];
    let deck = vec![mint(20, CardKind::PeekFuture)];
    let five_cats: Vec<Card> = CardKind::CATS
        .iter()
        .enumerate()
        .map(|(i, k)| mint(i as u32, *k))
        .collect();
    let hands = vec![five_cats.clone(), vec![mint(6, CardKind::Defuse)]];
    let mut game = Game::rigged(ids, deck, hands, 13);

    let err = game
        .apply(
            p1,
            Action::Play {
                cards: five_cats.iter().map(|c| c.id()).collect(),
                target: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, ActionError::RuleViolation(_)));
    assert_eq!(game.seat(p1).unwrap().hand().len(), 5);
    assert_eq!(game.discard().len(), 0);
}

#[test]
fn peek_reveals_top_three_in_draw_order() {
    let ids = players(2);
    let p1 = ids[0];
    let deck = vec![
        mint(10, CardKind::TacoCat),
        mint(11, CardKind::BeardCat),
        mint(12, CardKind::RainbowCat),
        mint(13, CardKind::PotatoCat),
    ];
    let hands = vec![vec![mint(0, CardKind::PeekFuture)], vec![mint(1, CardKind::Defuse)]];
    let mut game = Game::rigged(ids, deck, hands, 14);

    play_one(&mut game, p1, 0);
    game.resolve_interrupt().unwrap();
    assert_eq!(game.phase(), Phase::PeekPending);
    let Some(PendingAction::PeekFuture { player, cards }) = game.pending() else {
        panic!("peek should be pending");
    };
    assert_eq!(*player, p1);
    let peeked: Vec<u32> = cards.iter().map(|c| u32::from(c.id())).collect();
    assert_eq!(peeked, vec![13, 12, 11]);
    // peeking removed nothing
    assert_eq!(game.deck().len(), 4);

    game.apply(p1, Action::AcknowledgePeek).unwrap();
    assert_eq!(game.phase(), Phase::Normal);
    assert_eq!(game.current_player(), p1);
}

#[test]
fn shuffle_keeps_the_turn_and_the_cards() {
    let ids = players(2);
    let p1 = ids[0];
    let deck: Vec<Card> = (10..30).map(|i| mint(i, CardKind::TacoCat)).collect();
    let hands = vec![vec![mint(0, CardKind::Shuffle)], vec![mint(1, CardKind::Defuse)]];
    let mut game = Game::rigged(ids, deck.clone(), hands, 15);

    play_one(&mut game, p1, 0);
    game.resolve_interrupt().unwrap();
    assert_eq!(game.current_player(), p1);
    let mut before: Vec<CardId> = deck.iter().map(Card::id).collect();
    let mut after: Vec<CardId> = game.deck().cards().iter().map(Card::id).collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn auto_play_draws_once_and_clears_the_stack() {
    let ids = players(3);
    let (p1, p2, p3) = (ids[0], ids[1], ids[2]);
    let deck = vec![
        mint(10, CardKind::TacoCat),
        mint(11, CardKind::BeardCat),
        mint(12, CardKind::RainbowCat),
    ];
    let hands = vec![
        vec![mint(0, CardKind::Attack)],
        vec![mint(1, CardKind::Defuse)],
        vec![mint(2, CardKind::Defuse)],
    ];
    let mut game = Game::rigged(ids, deck, hands, 16);

    play_one(&mut game, p1, 0);
    game.resolve_interrupt().unwrap();
    assert_eq!(game.draws_remaining(), 2);

    // deadline policy: one draw, then the turn ends regardless of the stack
    let events = game.auto_play().unwrap();
    assert!(events.contains(&Event::Drew {
        player: p2,
        bomb: false,
    }));
    assert!(events.contains(&Event::TurnStarted {
        player: p3,
        draws_remaining: 1,
    }));
    assert_eq!(game.current_player(), p3);
}

#[test]
fn auto_play_defuses_at_a_random_depth() {
    let ids = players(2);
    let (p1, p2) = (ids[0], ids[1]);
    let deck = vec![mint(10, CardKind::TacoCat), mint(90, CardKind::Bomb)];
    let hands = vec![vec![mint(0, CardKind::Defuse)], vec![mint(1, CardKind::Defuse)]];
    let mut game = Game::rigged(ids, deck, hands, 17);

    let events = game.auto_play().unwrap();
    assert!(events.contains(&Event::Drew {
        player: p1,
        bomb: true,
    }));
    assert!(events.contains(&Event::Defused { player: p1 }));
    assert_eq!(game.current_player(), p2);
    assert_eq!(game.seat(p1).unwrap().hand().count(CardKind::Defuse), 0);
    // the bomb went back into the deck
    let bombs = game
        .deck()
        .cards()
        .iter()
        .filter(|c| c.kind() == CardKind::Bomb)
        .count();
    assert_eq!(bombs, 1);
    assert!(game.audit().is_ok());
}

#[test]
fn rejected_play_mutates_nothing() {
    let ids = players(2);
    let p1 = ids[0];
    let deck = vec![mint(10, CardKind::TacoCat)];
    let hands = vec![vec![mint(0, CardKind::Skip)], vec![mint(1, CardKind::Defuse)]];
    let mut game = Game::rigged(ids, deck, hands, 18);

    let err = game
        .apply(
            p1,
            Action::Play {
                cards: vec![CardId::from(99)],
                target: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, ActionError::InvalidAction(_)));
    assert_eq!(game.seat(p1).unwrap().hand().len(), 1);
    assert_eq!(game.discard().len(), 0);
    assert!(game.last_play().is_none());
    assert!(game.interrupt().is_none());
}
