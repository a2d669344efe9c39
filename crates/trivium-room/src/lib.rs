//! Room lifecycle management for Trivium.
//!
//! Each room runs as an isolated Tokio task (actor model) owning the full
//! round state machine: question rotation, the 15-second countdown, answer
//! aggregation, scoring, and end-of-game determination. The actor's
//! `select!` loop is the only place a room's state is ever mutated, which
//! is what makes "first trigger wins" between the all-answered path and
//! the countdown expiry an ordinary sequential decision.
//!
//! # Key types
//!
//! - [`RoomStore`] — creates rooms, owns all handles for process lifetime
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`RoundPhase`] — the round lifecycle state machine
//! - [`RoomSettings`] — round length, inter-round pause, rotation budget

mod config;
mod error;
mod room;
mod rotation;
mod scoring;
mod store;

pub use config::{RoomSettings, RoundPhase};
pub use error::RoomError;
pub use room::{RoomHandle, RoomInfo, RoomSender};
pub use store::RoomStore;
