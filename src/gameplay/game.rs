use super::*;
use crate::cards::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use serde::Serialize;

/// Turn state machine phase.
///
/// `Normal` and `DrawPending` both accept plays and draws from the current
/// player; `DrawPending` means at least one forced draw from an attack is
/// still outstanding. The remaining phases each wait on exactly one
/// player's input, recorded in [`PendingAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Normal,
    DrawPending,
    DefusePending,
    FavorPending,
    PeekPending,
    PickPending,
    Over,
}

/// The authoritative state of one game and the machine that mutates it.
///
/// All mutation goes through [`apply`](Self::apply) (validated player
/// actions) or the shell-driven entry points ([`resolve_interrupt`]
/// (Self::resolve_interrupt), [`auto_play`](Self::auto_play),
/// [`timeout_eliminate`](Self::timeout_eliminate)). Every entry point
/// validates before touching anything: an `Err` means no state changed and
/// nothing should be broadcast.
///
/// The machine holds no clocks and performs no I/O. Time-boxing (turn
/// deadlines, the interrupt window, disconnect grace) belongs to the room
/// shell, which calls back in when a deadline fires.
#[derive(Debug)]
pub struct Game {
    deck: Deck,
    discard: DiscardPile,
    destroyed: Vec<Card>,
    seats: Vec<Seat>,
    current: usize,
    draws_remaining: u8,
    attacked: bool,
    phase: Phase,
    pending: Option<PendingAction>,
    interrupt: Option<Interrupt>,
    last_play: Option<PlayedAction>,
    winner: Option<PlayerId>,
    seq: u64,
    total: usize,
    rng: SmallRng,
}

impl Game {
    /// Deals a fresh game for the given fixed seating order. The first
    /// seat opens with the usual single-draw obligation.
    pub fn new(players: Vec<PlayerId>, mut rng: SmallRng) -> Self {
        let shoe = Shoe::build(players.len(), &mut rng);
        let (deck, hands) = shoe.deal(&mut rng);
        let seats: Vec<Seat> = players
            .into_iter()
            .zip(hands)
            .map(|(player, hand)| Seat::new(player, hand))
            .collect();
        let total = deck.len() + seats.iter().map(|s| s.hand().len()).sum::<usize>();
        Self {
            deck,
            discard: DiscardPile::default(),
            destroyed: Vec::new(),
            seats,
            current: 0,
            draws_remaining: 1,
            attacked: false,
            phase: Phase::Normal,
            pending: None,
            interrupt: None,
            last_play: None,
            winner: None,
            seq: 0,
            total,
            rng,
        }
    }
    /// Deterministic constructor for reproducible games.
    pub fn seeded(players: Vec<PlayerId>, seed: u64) -> Self {
        Self::new(players, SmallRng::seed_from_u64(seed))
    }
    /// Test rig: explicit deck and hands, no shuffling.
    #[cfg(test)]
    pub(crate) fn rigged(
        players: Vec<PlayerId>,
        deck: Vec<Card>,
        hands: Vec<Vec<Card>>,
        seed: u64,
    ) -> Self {
        let deck = Deck::from(deck);
        let seats: Vec<Seat> = players
            .into_iter()
            .zip(hands)
            .map(|(player, hand)| Seat::new(player, Hand::from(hand)))
            .collect();
        let total = deck.len() + seats.iter().map(|s| s.hand().len()).sum::<usize>();
        Self {
            deck,
            discard: DiscardPile::default(),
            destroyed: Vec::new(),
            seats,
            current: 0,
            draws_remaining: 1,
            attacked: false,
            phase: Phase::Normal,
            pending: None,
            interrupt: None,
            last_play: None,
            winner: None,
            seq: 0,
            total,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Game {
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
    pub fn discard(&self) -> &DiscardPile {
        &self.discard
    }
    pub fn destroyed(&self) -> &[Card] {
        &self.destroyed
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn seat(&self, player: PlayerId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.player() == player)
    }
    pub fn current_player(&self) -> PlayerId {
        self.seats[self.current].player()
    }
    pub fn draws_remaining(&self) -> u8 {
        self.draws_remaining
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }
    pub fn interrupt(&self) -> Option<&Interrupt> {
        self.interrupt.as_ref()
    }
    pub fn last_play(&self) -> Option<&PlayedAction> {
        self.last_play.as_ref()
    }
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }
    pub fn alive(&self) -> usize {
        self.seats.iter().filter(|s| s.alive()).count()
    }
    /// The player whose input the machine is waiting on: the pending
    /// action's resolver if one is active, the current player otherwise.
    pub fn waiting_on(&self) -> PlayerId {
        self.pending
            .as_ref()
            .map(PendingAction::waiting_on)
            .unwrap_or_else(|| self.current_player())
    }
    fn index_of(&self, player: PlayerId) -> Option<usize> {
        self.seats.iter().position(|s| s.player() == player)
    }
}

impl Game {
    /// Applies a validated inbound action for `actor`. On `Err` nothing
    /// was mutated and the rejection goes to the sender alone.
    pub fn apply(&mut self, actor: PlayerId, action: Action) -> Result<Vec<Event>, ActionError> {
        log::debug!("[game] {}: {}", actor, action);
        let result = match action {
            Action::Play { cards, target } => self.play(actor, cards, target),
            Action::Draw => self.draw_card(actor),
            Action::Defuse { position } => self.defuse(actor, position),
            Action::Give { card } => self.give(actor, card),
            Action::Counter { depth } => self.counter(actor, depth),
            Action::AcknowledgePeek => self.acknowledge_peek(actor),
            Action::Pick { card } => self.pick(actor, card),
        };
        if result.is_ok() {
            debug_assert!(self.audit().is_ok(), "transition broke an invariant");
        }
        result
    }
    /// Card-count and turn-ownership invariants. A failure here is a bug
    /// in the machine, never a consequence of client input; the room
    /// terminates and flags the game when it sees one.
    pub fn audit(&self) -> Result<(), ActionError> {
        let held: usize = self.seats.iter().map(|s| s.hand().len()).sum();
        let parked = matches!(self.pending, Some(PendingAction::DefuseInsert { .. })) as usize;
        let count = self.deck.len() + self.discard.len() + self.destroyed.len() + held + parked;
        if count != self.total {
            return Err(ActionError::fatal(format!(
                "card count drifted: {} != {}",
                count, self.total
            )));
        }
        if self.phase != Phase::Over && !self.seats[self.current].alive() {
            return Err(ActionError::fatal("current seat is eliminated"));
        }
        Ok(())
    }
}

/// Declarations and the interrupt window.
impl Game {
    fn play(
        &mut self,
        actor: PlayerId,
        ids: Vec<CardId>,
        target: Option<PlayerId>,
    ) -> Result<Vec<Event>, ActionError> {
        self.ensure_live()?;
        self.ensure_no_window()?;
        self.ensure_unpending()?;
        let seat = self
            .index_of(actor)
            .ok_or_else(|| ActionError::invalid("not seated at this table"))?;
        if seat != self.current {
            return Err(ActionError::invalid("not your turn"));
        }
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        if ids.is_empty() || unique.len() != ids.len() {
            return Err(ActionError::invalid("malformed card selection"));
        }
        let cards: Vec<Card> = ids
            .iter()
            .map(|id| {
                self.seats[seat]
                    .hand()
                    .get(*id)
                    .ok_or_else(|| ActionError::invalid("card not in hand"))
            })
            .collect::<Result<_, _>>()?;
        let (kind, effect) = self.classify_play(actor, &cards, target)?;
        for id in &ids {
            let card = self.seats[seat].hand_mut().take(*id).expect("validated");
            self.discard.push(card);
        }
        self.seq += 1;
        let play = PlayedAction {
            actor,
            kind,
            target,
            seq: self.seq,
        };
        self.last_play = Some(play);
        self.interrupt = Some(Interrupt::new(play, effect));
        Ok(vec![Event::Declared(play)])
    }
    fn classify_play(
        &self,
        actor: PlayerId,
        cards: &[Card],
        target: Option<PlayerId>,
    ) -> Result<(PlayKind, DeferredPlay), ActionError> {
        match cards {
            [card] => match card.kind() {
                CardKind::Skip => self.untargeted(target, PlayKind::Skip, DeferredPlay::Skip),
                CardKind::Attack => self.untargeted(target, PlayKind::Attack, DeferredPlay::Attack),
                CardKind::Shuffle => {
                    self.untargeted(target, PlayKind::Shuffle, DeferredPlay::Shuffle)
                }
                CardKind::PeekFuture => {
                    self.untargeted(target, PlayKind::PeekFuture, DeferredPlay::PeekFuture)
                }
                CardKind::Favor => {
                    let target = self.targeted(actor, target)?;
                    Ok((PlayKind::Favor, DeferredPlay::Favor { target }))
                }
                CardKind::Counter => Err(ActionError::invalid(
                    "a counter is played against an open window, not as a turn",
                )),
                CardKind::Defuse => Err(ActionError::invalid("a defuse resolves a drawn bomb")),
                CardKind::Bomb => Err(ActionError::invalid("bombs cannot be played")),
                _ => Err(ActionError::invalid("cat cards only play in combos")),
            },
            _ => match Combo::classify(cards) {
                Some(Combo::Pair(_)) => {
                    let target = self.targeted(actor, target)?;
                    Ok((PlayKind::PairSteal, DeferredPlay::PairSteal { target }))
                }
                Some(Combo::FiveCats) => {
                    if target.is_some() {
                        return Err(ActionError::invalid("unexpected target"));
                    }
                    if self.discard.is_empty() {
                        return Err(ActionError::rule("the discard pile is empty"));
                    }
                    Ok((PlayKind::FiveCats, DeferredPlay::FiveCats))
                }
                None => Err(ActionError::invalid("unrecognized card combination")),
            },
        }
    }
    fn untargeted(
        &self,
        target: Option<PlayerId>,
        kind: PlayKind,
        effect: DeferredPlay,
    ) -> Result<(PlayKind, DeferredPlay), ActionError> {
        match target {
            Some(_) => Err(ActionError::invalid("unexpected target")),
            None => Ok((kind, effect)),
        }
    }
    fn targeted(&self, actor: PlayerId, target: Option<PlayerId>) -> Result<PlayerId, ActionError> {
        let target = target.ok_or_else(|| ActionError::invalid("a target is required"))?;
        if target == actor {
            return Err(ActionError::invalid("cannot target yourself"));
        }
        let seat = self
            .index_of(target)
            .ok_or_else(|| ActionError::invalid("target not found"))?;
        if !self.seats[seat].alive() {
            return Err(ActionError::invalid("target is out of the game"));
        }
        if self.seats[seat].hand().is_empty() {
            return Err(ActionError::rule("target has no cards"));
        }
        Ok(target)
    }
    fn counter(&mut self, actor: PlayerId, depth: usize) -> Result<Vec<Event>, ActionError> {
        self.ensure_live()?;
        let window = self
            .interrupt
            .as_ref()
            .ok_or_else(|| ActionError::race("too late, the window already closed"))?;
        let seat = self
            .index_of(actor)
            .ok_or_else(|| ActionError::invalid("not seated at this table"))?;
        if !self.seats[seat].alive() {
            return Err(ActionError::invalid("you are out of the game"));
        }
        if actor == window.top_declarer() {
            return Err(ActionError::invalid("cannot counter your own play"));
        }
        if !self.seats[seat].hand().holds(CardKind::Counter) {
            return Err(ActionError::invalid("no counter card in hand"));
        }
        if depth != window.depth() {
            return Err(ActionError::race("too late, that play was already countered"));
        }
        let card = self.seats[seat]
            .hand_mut()
            .take_kind(CardKind::Counter)
            .expect("validated");
        self.discard.push(card);
        let depth = self
            .interrupt
            .as_mut()
            .expect("validated")
            .push(actor, depth)
            .expect("depth validated");
        Ok(vec![Event::Countered {
            player: actor,
            depth,
        }])
    }
    /// Called by the room when the interrupt window expires. Applies the
    /// deferred effect at even parity, drops it at odd. A no-op when no
    /// window is open (the room may race its own timer bookkeeping).
    pub fn resolve_interrupt(&mut self) -> Result<Vec<Event>, ActionError> {
        let Some(window) = self.interrupt.take() else {
            return Ok(Vec::new());
        };
        let play = *window.subject();
        let cancelled = window.cancelled();
        log::debug!(
            "[game] window closed: {} ({})",
            play,
            if cancelled { "cancelled" } else { "applies" }
        );
        let mut events = vec![Event::Resolved { play, cancelled }];
        if cancelled {
            return Ok(events);
        }
        // the declarer may have been grace-eliminated mid-window
        let Some(actor_seat) = self.index_of(play.actor).filter(|i| self.seats[*i].alive()) else {
            return Ok(events);
        };
        match window.effect() {
            DeferredPlay::Skip => {
                self.draws_remaining = self.draws_remaining.saturating_sub(1);
                if self.draws_remaining == 0 {
                    events.extend(self.advance_turn());
                } else {
                    self.settle_phase();
                }
            }
            DeferredPlay::Attack => {
                let owed = if self.attacked {
                    self.draws_remaining.saturating_add(2)
                } else {
                    2
                };
                events.extend(self.pass_turn(owed, true));
            }
            DeferredPlay::Shuffle => {
                self.deck.shuffle(&mut self.rng);
            }
            DeferredPlay::PeekFuture => {
                let cards = self.deck.peek(3);
                self.pending = Some(PendingAction::PeekFuture {
                    player: play.actor,
                    cards,
                });
                self.phase = Phase::PeekPending;
            }
            DeferredPlay::Favor { target } => {
                let viable = self
                    .index_of(target)
                    .filter(|i| self.seats[*i].alive() && !self.seats[*i].hand().is_empty());
                // the target may have spent or lost their last card since
                // the declaration, in which case the favor fizzles
                if viable.is_some() {
                    self.pending = Some(PendingAction::FavorGive {
                        actor: play.actor,
                        target,
                    });
                    self.phase = Phase::FavorPending;
                }
            }
            DeferredPlay::PairSteal { target } => {
                if let Some(t) = self.index_of(target).filter(|i| self.seats[*i].alive()) {
                    if let Some(card) = self.seats[t].hand_mut().take_random(&mut self.rng) {
                        self.seats[actor_seat].hand_mut().push(card);
                        events.push(Event::Stole {
                            from: target,
                            to: play.actor,
                        });
                    }
                }
            }
            DeferredPlay::FiveCats => {
                // non-empty by construction: the five cats are in it
                self.pending = Some(PendingAction::PickFromDiscard { player: play.actor });
                self.phase = Phase::PickPending;
            }
        }
        Ok(events)
    }
}

/// Draws and bomb resolution.
impl Game {
    fn draw_card(&mut self, actor: PlayerId) -> Result<Vec<Event>, ActionError> {
        self.ensure_live()?;
        self.ensure_no_window()?;
        self.ensure_unpending()?;
        let seat = self
            .index_of(actor)
            .ok_or_else(|| ActionError::invalid("not seated at this table"))?;
        if seat != self.current {
            return Err(ActionError::invalid("not your turn"));
        }
        if self.deck.is_empty() {
            // unreachable by construction: the deck always holds the
            // bombs still in circulation
            return Err(ActionError::fatal("draw pile exhausted"));
        }
        let card = self.deck.draw().expect("checked non-empty");
        if card.kind() == CardKind::Bomb {
            log::debug!("[game] {} drew the bomb", actor);
            if self.seats[seat].hand().holds(CardKind::Defuse) {
                self.pending = Some(PendingAction::DefuseInsert {
                    player: actor,
                    bomb: card,
                });
                self.phase = Phase::DefusePending;
                Ok(vec![Event::Drew {
                    player: actor,
                    bomb: true,
                }])
            } else {
                let mut events = vec![Event::Drew {
                    player: actor,
                    bomb: true,
                }];
                events.extend(self.eliminate(seat, Elimination::Exploded, Some(card)));
                Ok(events)
            }
        } else {
            self.seats[seat].hand_mut().push(card);
            self.draws_remaining = self.draws_remaining.saturating_sub(1);
            let mut events = vec![Event::Drew {
                player: actor,
                bomb: false,
            }];
            if self.draws_remaining == 0 {
                events.extend(self.advance_turn());
            } else {
                self.settle_phase();
            }
            Ok(events)
        }
    }
    fn defuse(&mut self, actor: PlayerId, position: usize) -> Result<Vec<Event>, ActionError> {
        self.ensure_live()?;
        match &self.pending {
            Some(PendingAction::DefuseInsert { player, .. }) if *player == actor => {}
            _ => return Err(ActionError::invalid("no bomb awaiting your defuse")),
        }
        let seat = self.index_of(actor).expect("pending player is seated");
        if !self.seats[seat].hand().holds(CardKind::Defuse) {
            return Err(ActionError::fatal("defuse pending without a defuse in hand"));
        }
        let Some(PendingAction::DefuseInsert { bomb, .. }) = self.pending.take() else {
            unreachable!("matched above");
        };
        let defuse = self.seats[seat]
            .hand_mut()
            .take_kind(CardKind::Defuse)
            .expect("checked above");
        self.discard.push(defuse);
        self.deck.insert(position, bomb);
        // a bomb draw ends the turn outright, attack stack included
        self.draws_remaining = 0;
        self.attacked = false;
        let mut events = vec![Event::Defused { player: actor }];
        events.extend(self.advance_turn());
        Ok(events)
    }
}

/// Pending-action resolutions.
impl Game {
    fn give(&mut self, actor: PlayerId, card: CardId) -> Result<Vec<Event>, ActionError> {
        self.ensure_live()?;
        let (to, target) = match &self.pending {
            Some(PendingAction::FavorGive { actor: a, target }) => (*a, *target),
            _ => return Err(ActionError::invalid("no favor awaiting a card")),
        };
        if target != actor {
            return Err(ActionError::invalid("you are not the favor target"));
        }
        let giver = self.index_of(actor).expect("pending target is seated");
        let receiver = self.index_of(to).expect("pending actor is seated");
        if self.seats[giver].hand().get(card).is_none() {
            return Err(ActionError::invalid("card not in hand"));
        }
        let card = self.seats[giver].hand_mut().take(card).expect("checked");
        self.seats[receiver].hand_mut().push(card);
        self.pending = None;
        self.settle_phase();
        Ok(vec![Event::Gave {
            from: actor,
            to,
        }])
    }
    fn pick(&mut self, actor: PlayerId, card: CardId) -> Result<Vec<Event>, ActionError> {
        self.ensure_live()?;
        match &self.pending {
            Some(PendingAction::PickFromDiscard { player }) if *player == actor => {}
            _ => return Err(ActionError::invalid("no discard claim awaiting you")),
        }
        if !self.discard.contains(card) {
            return Err(ActionError::invalid("no such card in the discard pile"));
        }
        let seat = self.index_of(actor).expect("pending player is seated");
        let claimed = self.discard.claim(card).expect("checked");
        self.seats[seat].hand_mut().push(claimed);
        self.pending = None;
        self.settle_phase();
        Ok(vec![Event::Claimed {
            player: actor,
            card,
        }])
    }
    fn acknowledge_peek(&mut self, actor: PlayerId) -> Result<Vec<Event>, ActionError> {
        self.ensure_live()?;
        match &self.pending {
            Some(PendingAction::PeekFuture { player, .. }) if *player == actor => {}
            _ => return Err(ActionError::invalid("no peek awaiting acknowledgment")),
        }
        self.pending = None;
        self.settle_phase();
        Ok(Vec::new())
    }
}

/// Shell-driven entry points: deadlines and disconnect policy.
impl Game {
    /// Auto-resolution when the awaited player's deadline fires or their
    /// turn arrives while disconnected: a stuck pending phase resolves
    /// with a neutral choice, otherwise the current player draws once and
    /// the turn ends, remaining obligation included.
    pub fn auto_play(&mut self) -> Result<Vec<Event>, ActionError> {
        self.ensure_live()?;
        self.ensure_no_window()?;
        match self.pending.clone() {
            Some(PendingAction::DefuseInsert { player, .. }) => {
                let position = self.random_depth();
                self.defuse(player, position)
            }
            Some(PendingAction::FavorGive { target, .. }) => {
                let giver = self.index_of(target).expect("pending target is seated");
                let card = self.seats[giver]
                    .hand()
                    .cards()
                    .choose(&mut self.rng)
                    .map(Card::id)
                    .expect("favor target holds cards");
                self.give(target, card)
            }
            Some(PendingAction::PeekFuture { player, .. }) => self.acknowledge_peek(player),
            Some(PendingAction::PickFromDiscard { player }) => {
                let card = self
                    .discard
                    .cards()
                    .choose(&mut self.rng)
                    .map(Card::id)
                    .expect("discard non-empty while claim pends");
                self.pick(player, card)
            }
            None => self.forced_draw(),
        }
    }
    /// Grace expiry. Idempotent: an already-eliminated or unknown player
    /// and a finished game are quiet no-ops.
    pub fn timeout_eliminate(&mut self, player: PlayerId) -> Result<Vec<Event>, ActionError> {
        if self.phase == Phase::Over {
            return Ok(Vec::new());
        }
        let Some(seat) = self.index_of(player).filter(|i| self.seats[*i].alive()) else {
            return Ok(Vec::new());
        };
        Ok(self.eliminate(seat, Elimination::TimedOut, None))
    }
    fn forced_draw(&mut self) -> Result<Vec<Event>, ActionError> {
        let actor = self.current_player();
        let seat = self.current;
        if self.deck.is_empty() {
            return Err(ActionError::fatal("draw pile exhausted"));
        }
        let card = self.deck.draw().expect("checked non-empty");
        if card.kind() == CardKind::Bomb {
            if self.seats[seat].hand().holds(CardKind::Defuse) {
                let defuse = self.seats[seat]
                    .hand_mut()
                    .take_kind(CardKind::Defuse)
                    .expect("checked");
                self.discard.push(defuse);
                let position = self.random_depth();
                self.deck.insert(position, card);
                self.draws_remaining = 0;
                self.attacked = false;
                let mut events = vec![
                    Event::Drew {
                        player: actor,
                        bomb: true,
                    },
                    Event::Defused { player: actor },
                ];
                events.extend(self.advance_turn());
                Ok(events)
            } else {
                let mut events = vec![Event::Drew {
                    player: actor,
                    bomb: true,
                }];
                events.extend(self.eliminate(seat, Elimination::Exploded, Some(card)));
                Ok(events)
            }
        } else {
            self.seats[seat].hand_mut().push(card);
            self.draws_remaining = 0;
            self.attacked = false;
            let mut events = vec![Event::Drew {
                player: actor,
                bomb: false,
            }];
            events.extend(self.advance_turn());
            Ok(events)
        }
    }
    fn random_depth(&mut self) -> usize {
        self.rng.random_range(0..=self.deck.len())
    }
}

/// Turn order, elimination, and the win condition.
impl Game {
    fn eliminate(&mut self, seat: usize, reason: Elimination, bomb: Option<Card>) -> Vec<Event> {
        let player = self.seats[seat].player();
        log::info!("[game] {} eliminated ({})", player, reason);
        let cards = self.seats[seat].hand_mut().drain();
        self.discard.extend(cards);
        if let Some(bomb) = bomb {
            self.destroyed.push(bomb);
        }
        self.seats[seat].eliminate();
        let mut events = vec![Event::Eliminated { player, reason }];
        if self.pending.as_ref().is_some_and(|p| p.involves(player)) {
            // a pending bomb goes out of circulation with its holder
            if let Some(PendingAction::DefuseInsert { bomb, .. }) = self.pending.take() {
                self.destroyed.push(bomb);
            }
        }
        if self
            .interrupt
            .as_ref()
            .is_some_and(|w| w.subject().actor == player)
        {
            self.interrupt = None;
        }
        if self.alive() == 1 {
            let winner = self
                .seats
                .iter()
                .find(|s| s.alive())
                .map(Seat::player)
                .expect("exactly one alive");
            self.winner = Some(winner);
            self.phase = Phase::Over;
            self.pending = None;
            self.interrupt = None;
            self.draws_remaining = 0;
            events.push(Event::Won { player: winner });
            return events;
        }
        if seat == self.current {
            events.extend(self.advance_turn());
        } else if self.pending.is_none() {
            self.settle_phase();
        }
        events
    }
    fn pass_turn(&mut self, draws: u8, attacked: bool) -> Vec<Event> {
        self.current = self.next_alive(self.current);
        self.draws_remaining = draws;
        self.attacked = attacked;
        self.phase = if attacked {
            Phase::DrawPending
        } else {
            Phase::Normal
        };
        vec![Event::TurnStarted {
            player: self.current_player(),
            draws_remaining: draws,
        }]
    }
    fn advance_turn(&mut self) -> Vec<Event> {
        self.pass_turn(1, false)
    }
    fn next_alive(&self, from: usize) -> usize {
        (1..=self.seats.len())
            .map(|step| (from + step) % self.seats.len())
            .find(|i| self.seats[*i].alive())
            .expect("at least one seat alive")
    }
    /// Recomputes the open-play phase after a pending action cleared.
    fn settle_phase(&mut self) {
        if self.phase != Phase::Over {
            self.phase = if self.attacked {
                Phase::DrawPending
            } else {
                Phase::Normal
            };
        }
    }
    fn ensure_live(&self) -> Result<(), ActionError> {
        match self.phase {
            Phase::Over => Err(ActionError::invalid("the game is over")),
            _ => Ok(()),
        }
    }
    fn ensure_no_window(&self) -> Result<(), ActionError> {
        match self.interrupt {
            Some(_) => Err(ActionError::invalid(
                "an interrupt window is open, only counters are accepted",
            )),
            None => Ok(()),
        }
    }
    fn ensure_unpending(&self) -> Result<(), ActionError> {
        match &self.pending {
            Some(p) => Err(ActionError::invalid(format!(
                "waiting on {}",
                p.waiting_on()
            ))),
            None => Ok(()),
        }
    }
}
