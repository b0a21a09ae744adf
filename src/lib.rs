//! # Hanabi
//!
//! A cooperative fireworks card game engine for 2–5 players who share
//! limited information and a shared fate: a bounded pool of mistake
//! tokens.
//!
//! The crate is the rules core only: no networking, persistence, or
//! rendering. A deployment wraps it with a transport layer that turns
//! remote messages into calls on [`Player`] handles and a presentation
//! layer that renders [`Snapshot`] and [`GameEvent`] values.
//!
//! ## Architecture
//!
//! - [`game`]: the synchronous rules engine: cards, deck composition,
//!   token accounting, turn order, and end conditions.
//! - [`table`]: the concurrent surface: one shared aggregate behind a
//!   read/write lock, per-seat action handles, and an event broadcast
//!   channel that delivers every committed action to every participant in
//!   commit order.
//!
//! ## Example
//!
//! ```
//! use hanabi::{Game, GameStatus};
//!
//! let (game, players) = Game::new(4).unwrap();
//! assert_eq!(players.len(), 4);
//! assert_eq!(game.player_count(), 4);
//! ```

/// Core game rules, entities, and state.
pub mod game;
pub use game::{
    GameError, GameSettings, constants,
    entities::{Card, Color, GameStatus, Hand, Hint, PlayerId, Rank, Snapshot},
};

/// Concurrent multiplayer surface: game and player handles, events.
pub mod table;
pub use table::{Game, GameEvent, Player};
