//! The shared game aggregate and its observation surface.

use std::fmt;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use super::events::GameEvent;
use super::player::Player;
use crate::game::entities::{GameStatus, Snapshot};
use crate::game::state_machine::{GameData, GameError, GameSettings};

/// State shared between the game handle and every player handle: the rule
/// state behind one read/write lock, and the event channel fed under it.
pub(crate) struct Shared {
    pub(crate) data: RwLock<GameData>,
    pub(crate) events: broadcast::Sender<GameEvent>,
}

impl Shared {
    /// Publish a committed event to every subscriber. Called with the write
    /// lock still held, which is what keeps events in commit order; the
    /// send itself never blocks, so a stalled consumer lags instead of
    /// stalling the table.
    pub(crate) fn publish(&self, event: GameEvent) {
        if self.events.send(event).is_err() {
            log::debug!("dropping event, no live subscribers");
        }
    }
}

/// A handle on one cooperative fireworks game.
///
/// Constructing a game also yields one [`Player`] handle per seat; those
/// are the only way to act on the game, while this handle carries the
/// game-wide observation surface ([`capture`](Self::capture),
/// [`status`](Self::status), [`subscribe`](Self::subscribe)). All handles
/// share one state aggregate behind a single read/write lock: observation
/// takes the shared lock, every action takes the exclusive lock for its
/// whole duration, so actions never interleave and snapshots are never
/// torn.
///
/// The handle is cheap to clone and safe to hand to observer tasks.
#[derive(Clone)]
pub struct Game {
    shared: Arc<Shared>,
    player_count: usize,
}

impl Game {
    /// Open a table for `player_count` players (2 through 5), shuffling
    /// from thread-local entropy.
    pub fn new(player_count: usize) -> Result<(Self, Vec<Player>), GameError> {
        Self::with_settings(&GameSettings::new(player_count))
    }

    /// Open a table with explicit settings, e.g. a deterministic shuffle
    /// seed or a different event buffer size.
    pub fn with_settings(settings: &GameSettings) -> Result<(Self, Vec<Player>), GameError> {
        let data = GameData::new(settings)?;
        let player_count = data.player_count();
        let (events, _) = broadcast::channel(settings.event_capacity.max(1));
        let shared = Arc::new(Shared {
            data: RwLock::new(data),
            events,
        });
        let players = (0..player_count)
            .map(|id| Player::new(id, Arc::clone(&shared)))
            .collect();
        log::info!("table opened for {player_count} players");
        Ok((
            Self {
                shared,
                player_count,
            },
            players,
        ))
    }

    /// A consistent point-in-time copy of the observable game state.
    pub async fn capture(&self) -> Snapshot {
        self.shared.data.read().await.snapshot()
    }

    /// The current status, recomputed from state on every call.
    pub async fn status(&self) -> GameStatus {
        self.shared.data.read().await.status()
    }

    /// An extra event receiver for observers that aren't seated at the
    /// table (UIs, loggers, test harnesses). It only sees events committed
    /// after the call; the per-player receivers created at construction see
    /// everything.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.shared.events.subscribe()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Game")
            .field("player_count", &self.player_count)
            .finish_non_exhaustive()
    }
}
