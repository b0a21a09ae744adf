//! The concurrent multiplayer surface over the core rules.
//!
//! One [`Game`] aggregate is shared by a fixed set of [`Player`] handles,
//! each meant to live on its own task. Reads (`aware`, `capture`, `status`)
//! take a shared lock; every action (`play`, `discard`, `cue`) takes the
//! exclusive lock for its entire duration, so actions are globally
//! serialized and a snapshot is never torn.
//!
//! After each committed action a [`GameEvent`] is published on a bounded
//! broadcast channel while the write lock is still held: subscribers see
//! every event in commit order, publishing never blocks the critical
//! section, and a consumer that stops draining loses oldest events instead
//! of freezing the game for the other seats.

pub mod events;
pub mod player;
pub mod session;

pub use events::GameEvent;
pub use player::Player;
pub use session::Game;
