//! Core game rules, entities, and state.
//!
//! Everything in this module is synchronous and lock-free: it is the pure
//! rules engine (cards, deck, token accounting, turn order, end
//! conditions). The concurrent, multi-actor surface that wraps it lives in
//! [`crate::table`].

pub mod constants;
pub mod entities;
pub mod state_machine;

pub use state_machine::{GameData, GameError, GameSettings};
