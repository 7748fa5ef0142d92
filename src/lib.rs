//! Authoritative core for a room-based, turn-taking bomb-card game.
//!
//! Players draw and play cards; the one losing outcome is drawing the bomb
//! card without a defuse in hand. Every declared play can be retroactively
//! cancelled by a counter card during a short interrupt window, attacks
//! stack forced draws onto the next player, and mid-game disconnects are
//! held open for a grace period before elimination.
//!
//! ## Architecture
//!
//! - [`cards`] — deck engine and combo evaluator: pure data, no I/O
//! - [`gameplay`] — the turn state machine: validates actions, mutates the
//!   authoritative state, emits [`gameplay::Event`]s
//! - [`gameroom`] — the imperative shell: one serialized task per room,
//!   deadline timers, disconnect supervision, per-recipient projection
//!
//! The room owns all hidden state. Clients only ever see the redacted
//! [`gameroom::ClientGameState`] projected for them; transports, lobbies
//! and chat are external collaborators reached through narrow seams
//! ([`gameroom::Table`] senders and [`gameroom::Notices`]).

pub mod cards;
pub mod gameplay;
pub mod gameroom;
