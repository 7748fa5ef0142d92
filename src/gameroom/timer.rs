use crate::gameplay::PlayerId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Durations for the three governed timers plus the outbound tick cadence.
#[derive(Debug, Clone, Copy)]
pub struct TimerConfig {
    /// Whole-turn deadline; expiry forces a draw-and-pass.
    pub turn: Duration,
    /// Interrupt window; each accepted counter restarts it.
    pub window: Duration,
    /// Disconnect grace; expiry eliminates.
    pub grace: Duration,
    /// Cadence of turn-timer ticks to clients.
    pub tick: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            turn: Duration::from_secs(45),
            window: Duration::from_secs(5),
            grace: Duration::from_secs(60),
            tick: Duration::from_secs(1),
        }
    }
}

/// Which deadline fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    Turn,
    Window,
    Grace(PlayerId),
    Tick,
}

/// Deadline bookkeeping for one room. Every armed instant sits alongside
/// the state it guards and is cleared or replaced in the same transition
/// that makes it moot, so nothing ever fires against stale state.
#[derive(Debug)]
pub struct Timers {
    config: TimerConfig,
    turn: Option<Instant>,
    window: Option<Instant>,
    tick: Option<Instant>,
    grace: HashMap<PlayerId, Instant>,
}

impl Timers {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            turn: None,
            window: None,
            tick: None,
            grace: HashMap::new(),
        }
    }
    pub fn with_defaults() -> Self {
        Self::new(TimerConfig::default())
    }
    pub fn config(&self) -> TimerConfig {
        self.config
    }
    pub fn arm_turn(&mut self) {
        self.turn = Some(Instant::now() + self.config.turn);
    }
    pub fn clear_turn(&mut self) {
        self.turn = None;
    }
    pub fn turn_remaining(&self) -> Option<Duration> {
        self.turn.map(|at| at.saturating_duration_since(Instant::now()))
    }
    pub fn arm_window(&mut self) {
        self.window = Some(Instant::now() + self.config.window);
    }
    pub fn clear_window(&mut self) {
        self.window = None;
    }
    pub fn window_armed(&self) -> bool {
        self.window.is_some()
    }
    pub fn arm_tick(&mut self) {
        self.tick = Some(Instant::now() + self.config.tick);
    }
    pub fn clear_tick(&mut self) {
        self.tick = None;
    }
    pub fn arm_grace(&mut self, player: PlayerId) {
        self.grace.insert(player, Instant::now() + self.config.grace);
    }
    pub fn clear_grace(&mut self, player: &PlayerId) {
        self.grace.remove(player);
    }
    pub fn grace_armed(&self, player: &PlayerId) -> bool {
        self.grace.contains_key(player)
    }
    pub fn clear_all(&mut self) {
        self.turn = None;
        self.window = None;
        self.tick = None;
        self.grace.clear();
    }
    /// The earliest armed deadline, window first on ties so an interrupt
    /// always resolves before the turn it suspends.
    pub fn next(&self) -> Option<(Deadline, Instant)> {
        let mut best: Option<(Deadline, Instant)> = None;
        let mut consider = |deadline: Deadline, at: Option<Instant>| {
            if let Some(at) = at {
                if best.is_none_or(|(_, b)| at < b) {
                    best = Some((deadline, at));
                }
            }
        };
        consider(Deadline::Window, self.window);
        consider(Deadline::Turn, self.turn);
        consider(Deadline::Tick, self.tick);
        for (player, at) in &self.grace {
            consider(Deadline::Grace(*player), Some(*at));
        }
        best
    }
}
