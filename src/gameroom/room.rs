use super::notices::Notices;
use super::projector::Projector;
use super::protocol::ClientMessage;
use super::protocol::Protocol;
use super::protocol::ServerMessage;
use super::supervisor::Supervisor;
use super::table::Table;
use super::timer::Deadline;
use super::timer::TimerConfig;
use super::timer::Timers;
use crate::cards::MAX_PLAYERS;
use crate::cards::MIN_PLAYERS;
use crate::gameplay::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::HashSet;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use uuid::Uuid;

/// Inbound mail for a room task. Everything a room ever reacts to comes
/// through here, one at a time, in arrival order.
#[derive(Debug)]
pub enum RoomCommand {
    /// A decoded client message, attributed to its sender by the
    /// transport owner.
    Client(PlayerId, ClientMessage),
    /// Bind a player's outbound sender.
    Attach(PlayerId, UnboundedSender<ServerMessage>),
    /// Transport loss.
    Detach(PlayerId),
}

/// Cloneable handle for feeding a room from the transport layer.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    tx: UnboundedSender<RoomCommand>,
}

impl RoomHandle {
    pub fn client(&self, player: PlayerId, message: ClientMessage) {
        let _ = self.tx.send(RoomCommand::Client(player, message));
    }
    pub fn attach(&self, player: PlayerId, sender: UnboundedSender<ServerMessage>) {
        let _ = self.tx.send(RoomCommand::Attach(player, sender));
    }
    pub fn detach(&self, player: PlayerId) {
        let _ = self.tx.send(RoomCommand::Detach(player));
    }
}

/// One live room: the serialized shell around a [`Game`].
///
/// All inbound commands drain through a single inbox and are processed one
/// at a time against the earliest armed deadline, so no two mutations for
/// the same room ever interleave. Different rooms are independent tasks
/// and run in parallel.
///
/// The room owns the timers (turn deadline, interrupt window, disconnect
/// grace, outbound tick) and calls back into the machine when one fires;
/// every mutation ends with a full re-projection to every attached player.
pub struct Room {
    id: Uuid,
    game: Option<Game>,
    table: Table,
    timers: Timers,
    supervisor: Supervisor,
    inbox: UnboundedReceiver<RoomCommand>,
    notices: Option<Box<dyn Notices>>,
    votes: HashSet<PlayerId>,
    rng: SmallRng,
    done: bool,
}

impl Room {
    /// Creates a room for a fixed, ordered seating.
    pub fn new(players: Vec<PlayerId>) -> (Self, RoomHandle) {
        Self::with(players, TimerConfig::default(), SmallRng::from_os_rng())
    }
    /// Deterministic variant for reproducible rooms.
    pub fn seeded(players: Vec<PlayerId>, seed: u64) -> (Self, RoomHandle) {
        Self::with(
            players,
            TimerConfig::default(),
            SmallRng::seed_from_u64(seed),
        )
    }
    pub fn with(players: Vec<PlayerId>, config: TimerConfig, rng: SmallRng) -> (Self, RoomHandle) {
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()),
            "unsupported player count {}",
            players.len()
        );
        let (tx, rx) = unbounded_channel();
        let room = Self {
            id: Uuid::new_v4(),
            game: None,
            table: Table::new(players),
            timers: Timers::new(config),
            supervisor: Supervisor::default(),
            inbox: rx,
            notices: None,
            votes: HashSet::new(),
            rng,
            done: false,
        };
        (room, RoomHandle { tx })
    }
    /// Wires the chat collaborator in.
    pub fn with_notices(mut self, notices: Box<dyn Notices>) -> Self {
        self.notices = Some(notices);
        self
    }
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Serialized driver loop. Runs until the handle is dropped or the
    /// game is torn down after an invariant failure.
    pub async fn run(mut self) {
        log::info!("[room {}] started", self.id);
        while !self.done {
            match self.timers.next() {
                Some((deadline, at)) => {
                    tokio::select! {
                        biased;
                        _ = tokio::time::sleep_until(at) => self.expire(deadline),
                        command = self.inbox.recv() => match command {
                            Some(command) => self.handle(command),
                            None => break,
                        },
                    }
                }
                None => match self.inbox.recv().await {
                    Some(command) => self.handle(command),
                    None => break,
                },
            }
        }
        log::info!("[room {}] stopped", self.id);
    }
}

/// Inbound command handling.
impl Room {
    fn handle(&mut self, command: RoomCommand) {
        match command {
            RoomCommand::Attach(player, sender) => self.attach(player, sender),
            RoomCommand::Detach(player) => self.detach(player),
            RoomCommand::Client(player, message) => self.client(player, message),
        }
    }
    fn attach(&mut self, player: PlayerId, sender: UnboundedSender<ServerMessage>) {
        if !self.table.is_seated(&player) {
            log::warn!("[room {}] attach from stranger {}", self.id, player);
            return;
        }
        if self.table.is_attached(&player) {
            let _ = sender.send(ServerMessage::Rejected {
                reason: "already connected".to_string(),
            });
            return;
        }
        self.table.attach(player, sender);
        if self.supervisor.rejoin(&player) {
            self.timers.clear_grace(&player);
            log::info!("[room {}] {} reconnected within grace", self.id, player);
        }
        self.table.broadcast(ServerMessage::PlayerConnected { player });
        self.snapshot_to(player);
    }
    fn detach(&mut self, player: PlayerId) {
        if !self.table.detach(&player) {
            return;
        }
        log::info!("[room {}] {} disconnected", self.id, player);
        self.table
            .broadcast(ServerMessage::PlayerDisconnected { player });
        let in_game = self.game.as_ref().is_some_and(|game| {
            game.phase() != Phase::Over && game.seat(player).is_some_and(Seat::alive)
        });
        if in_game && self.supervisor.depart(player) {
            self.timers.arm_grace(player);
            // if the machine is already waiting on them, play it out now
            self.after_mutation(Vec::new());
        }
    }
    fn client(&mut self, player: PlayerId, message: ClientMessage) {
        if !self.table.is_seated(&player) {
            log::warn!("[room {}] message from stranger {}", self.id, player);
            return;
        }
        match Protocol::action(&message) {
            Some(action) => self.action(player, action),
            None => match message {
                ClientMessage::StartGame => self.start(player),
                ClientMessage::RequestRestart => self.vote(player, true),
                ClientMessage::VoteRestart => self.vote(player, false),
                _ => {}
            },
        }
    }
    fn action(&mut self, player: PlayerId, action: Action) {
        let Some(game) = self.game.as_mut() else {
            self.reject(player, "the game has not started");
            return;
        };
        match game.apply(player, action) {
            Ok(events) => self.after_mutation(events),
            Err(e) if e.is_fatal() => self.tear_down(e),
            Err(e) => self.reject(player, &e.to_string()),
        }
    }
    fn start(&mut self, player: PlayerId) {
        if self.game.is_some() {
            self.reject(player, "the game already started");
            return;
        }
        let players = self.table.order().to_vec();
        let game = Game::new(players, SmallRng::from_rng(&mut self.rng));
        log::info!("[room {}] game started by {}", self.id, player);
        self.game = Some(game);
        self.votes.clear();
        self.table.broadcast(ServerMessage::Started);
        self.timers.arm_turn();
        self.timers.arm_tick();
        self.after_mutation(Vec::new());
    }
    fn vote(&mut self, player: PlayerId, announce: bool) {
        let Some(game) = self.game.as_ref() else {
            self.reject(player, "nothing to restart");
            return;
        };
        if game.phase() != Phase::Over {
            self.reject(player, "the game is still running");
            return;
        }
        if announce {
            self.table
                .broadcast(ServerMessage::RestartRequested { player });
        }
        self.votes.insert(player);
        // unanimity among connected seats replaces the game wholesale
        let connected: Vec<PlayerId> = self
            .table
            .order()
            .iter()
            .copied()
            .filter(|p| self.table.is_attached(p))
            .collect();
        if !connected.is_empty() && connected.iter().all(|p| self.votes.contains(p)) {
            let players = self.table.order().to_vec();
            self.game = Some(Game::new(players, SmallRng::from_rng(&mut self.rng)));
            self.votes.clear();
            self.supervisor.reset();
            log::info!("[room {}] game restarted", self.id);
            self.table.broadcast(ServerMessage::Restarted);
            self.timers.arm_turn();
            self.timers.arm_tick();
            self.after_mutation(Vec::new());
        }
    }
}

/// Deadline handling.
impl Room {
    fn expire(&mut self, deadline: Deadline) {
        match deadline {
            Deadline::Window => {
                self.timers.clear_window();
                let Some(game) = self.game.as_mut() else { return };
                match game.resolve_interrupt() {
                    Ok(events) => self.after_mutation(events),
                    Err(e) => self.tear_down(e),
                }
            }
            Deadline::Turn => {
                self.timers.clear_turn();
                let Some(game) = self.game.as_mut() else { return };
                if game.phase() == Phase::Over || game.interrupt().is_some() {
                    return;
                }
                log::debug!("[room {}] turn deadline hit", self.id);
                match game.auto_play() {
                    Ok(events) => self.after_mutation(events),
                    Err(e) if e.is_fatal() => self.tear_down(e),
                    Err(e) => log::warn!("[room {}] deadline auto-play: {}", self.id, e),
                }
            }
            Deadline::Grace(player) => {
                self.timers.clear_grace(&player);
                self.supervisor.forget(&player);
                let Some(game) = self.game.as_mut() else { return };
                match game.timeout_eliminate(player) {
                    Ok(events) => self.after_mutation(events),
                    Err(e) => self.tear_down(e),
                }
            }
            Deadline::Tick => match self.timers.turn_remaining() {
                Some(remaining) => {
                    self.table.broadcast(ServerMessage::TurnTick {
                        remaining_ms: remaining.as_millis() as u64,
                    });
                    self.timers.arm_tick();
                }
                None => self.timers.clear_tick(),
            },
        }
    }
}

/// Reaction to machine events: broadcasts, timers, collaborators.
impl Room {
    fn after_mutation(&mut self, events: Vec<Event>) {
        self.react(&events);
        self.settle_absent();
        if self.done {
            return;
        }
        if let Some(game) = self.game.as_ref() {
            if let Err(e) = game.audit() {
                self.tear_down(e);
                return;
            }
        }
        self.sync_timers();
        self.broadcast_snapshots();
    }
    fn react(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::Declared(play) => {
                    // the turn clock is suspended while the window runs
                    self.timers.clear_turn();
                    self.timers.arm_window();
                    self.table.broadcast(ServerMessage::Action { play: *play });
                }
                Event::Countered { player, depth } => {
                    // every counter restarts the window
                    self.timers.arm_window();
                    self.table.broadcast(ServerMessage::Countered {
                        player: *player,
                        depth: *depth,
                    });
                }
                Event::Resolved { play, cancelled } => {
                    self.timers.clear_window();
                    self.timers.arm_turn();
                    self.timers.arm_tick();
                    self.table.broadcast(ServerMessage::Resolved {
                        play: *play,
                        cancelled: *cancelled,
                    });
                }
                Event::Drew { player, bomb } => {
                    self.table.broadcast(ServerMessage::Drew {
                        player: *player,
                        bomb: *bomb,
                    });
                }
                Event::Defused { player } => {
                    self.table
                        .broadcast(ServerMessage::Defused { player: *player });
                }
                Event::Gave { from, to } => {
                    self.table.broadcast(ServerMessage::Gave {
                        from: *from,
                        to: *to,
                    });
                }
                Event::Stole { from, to } => {
                    self.table.broadcast(ServerMessage::Stole {
                        from: *from,
                        to: *to,
                    });
                }
                Event::Claimed { player, card } => {
                    self.table.broadcast(ServerMessage::Claimed {
                        player: *player,
                        card: *card,
                    });
                }
                Event::TurnStarted {
                    player,
                    draws_remaining,
                } => {
                    self.timers.arm_turn();
                    self.timers.arm_tick();
                    self.table.broadcast(ServerMessage::TurnStarted {
                        player: *player,
                        draws_remaining: *draws_remaining,
                    });
                }
                Event::Eliminated { player, reason } => {
                    self.timers.clear_grace(player);
                    self.supervisor.forget(player);
                    self.table.broadcast(ServerMessage::Eliminated {
                        player: *player,
                        reason: *reason,
                    });
                    self.notice(&format!("{} {}!", player, reason));
                }
                Event::Won { player } => {
                    self.timers.clear_all();
                    self.table
                        .broadcast(ServerMessage::GameOver { winner: *player });
                    self.notice(&format!("{} wins!", player));
                }
            }
        }
    }
    /// Auto-plays for whoever the machine is waiting on while they are
    /// disconnected, repeatedly: eliminations can hand the turn straight
    /// to another absent player.
    fn settle_absent(&mut self) {
        loop {
            let awaited = match self.game.as_ref() {
                Some(game) if game.phase() != Phase::Over && game.interrupt().is_none() => {
                    game.waiting_on()
                }
                _ => return,
            };
            if self.table.is_attached(&awaited) {
                return;
            }
            log::info!("[room {}] auto-playing for absent {}", self.id, awaited);
            let result = self.game.as_mut().expect("checked above").auto_play();
            match result {
                Ok(events) => self.react(&events),
                Err(e) if e.is_fatal() => {
                    self.tear_down(e);
                    return;
                }
                Err(e) => {
                    log::warn!("[room {}] absent auto-play: {}", self.id, e);
                    return;
                }
            }
        }
    }
    fn sync_timers(&mut self) {
        match self.game.as_ref() {
            Some(game) if game.phase() != Phase::Over => {
                if game.interrupt().is_none() {
                    self.timers.clear_window();
                }
            }
            _ => self.timers.clear_all(),
        }
    }
    fn broadcast_snapshots(&self) {
        let Some(game) = self.game.as_ref() else { return };
        let remaining = self.timers.turn_remaining();
        for player in self.table.order() {
            if !self.table.is_attached(player) {
                continue;
            }
            let state = Projector::project(game, *player, remaining, |p| {
                self.table.is_attached(p)
            });
            self.table
                .unicast(*player, ServerMessage::Snapshot { state });
        }
    }
    fn snapshot_to(&self, player: PlayerId) {
        let Some(game) = self.game.as_ref() else { return };
        let state = Projector::project(game, player, self.timers.turn_remaining(), |p| {
            self.table.is_attached(p)
        });
        self.table
            .unicast(player, ServerMessage::Snapshot { state });
    }
    fn reject(&self, player: PlayerId, reason: &str) {
        self.table.unicast(
            player,
            ServerMessage::Rejected {
                reason: reason.to_string(),
            },
        );
    }
    fn tear_down(&mut self, error: ActionError) {
        log::error!("[room {}] torn down: {}", self.id, error);
        self.table.broadcast(ServerMessage::Terminated {
            reason: error.to_string(),
        });
        self.game = None;
        self.timers.clear_all();
        self.done = true;
    }
    fn notice(&self, text: &str) {
        if let Some(notices) = &self.notices {
            notices.system(text);
        }
    }
}
