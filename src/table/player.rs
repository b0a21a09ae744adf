//! Per-seat action handles.

use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::events::GameEvent;
use super::session::Shared;
use crate::game::entities::{Hand, Hint, PlayerId};
use crate::game::state_machine::{GameData, GameError};

/// One seat at the table.
///
/// Each handle is meant to be moved into its own task; actions from any
/// number of seats may run concurrently and are serialized by the game's
/// write lock. The handle owns this seat's event receiver, so dropping a
/// `Player` also drops its subscription.
pub struct Player {
    id: PlayerId,
    shared: Arc<Shared>,
    events: broadcast::Receiver<GameEvent>,
}

impl Player {
    pub(crate) fn new(id: PlayerId, shared: Arc<Shared>) -> Self {
        let events = shared.events.subscribe();
        Self { id, shared, events }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Play the card at `out`, drawing a replacement into `into` (a
    /// position in the hand after `out` is removed).
    ///
    /// A card that doesn't continue its color's sequence is still consumed
    /// and costs a fuse token; that is a legal, costly move, not an error.
    pub async fn play(&self, out: usize, into: usize) -> Result<(), GameError> {
        let mut data = self.shared.data.write().await;
        let (card, continued) = data.play(self.id, out, into)?;
        if continued {
            log::info!("player {} plays {card}", self.id);
        } else {
            log::info!(
                "player {} misplays {card}, {} fuse tokens left",
                self.id,
                data.fuse_tokens
            );
        }
        self.finish_action(
            &data,
            GameEvent::Play {
                player: self.id,
                card,
            },
        );
        Ok(())
    }

    /// Discard the card at `out`, drawing a replacement into `into` and
    /// refunding one info token.
    pub async fn discard(&self, out: usize, into: usize) -> Result<(), GameError> {
        let mut data = self.shared.data.write().await;
        let card = data.discard(self.id, out, into)?;
        log::info!("player {} discards {card}", self.id);
        self.finish_action(
            &data,
            GameEvent::Discard {
                player: self.id,
                card,
            },
        );
        Ok(())
    }

    /// Spend an info token to point out every card in `target`'s hand
    /// matching `hint`. The matched positions reach all seats through the
    /// resulting [`GameEvent::Cue`].
    pub async fn cue(&self, target: PlayerId, hint: Hint) -> Result<(), GameError> {
        let mut data = self.shared.data.write().await;
        let indices = data.cue(self.id, target, hint)?;
        log::info!("player {} cues player {target}: {hint}", self.id);
        self.finish_action(
            &data,
            GameEvent::Cue {
                from: self.id,
                to: target,
                indices,
                hint,
            },
        );
        Ok(())
    }

    /// Look at another player's hand. Fails with
    /// [`GameError::SelfInspection`] for this seat's own hand, which stays
    /// hidden except through cues. The returned copy is detached from the
    /// game.
    pub async fn aware(&self, target: PlayerId) -> Result<Hand, GameError> {
        self.shared.data.read().await.peek_hand(self.id, target)
    }

    /// This seat's event stream, delivered in commit order.
    ///
    /// Consumers should keep draining it; one that falls more than the
    /// buffer capacity behind loses the oldest events
    /// ([`broadcast::error::RecvError::Lagged`]) rather than stalling the
    /// table for everyone.
    pub fn events(&mut self) -> &mut broadcast::Receiver<GameEvent> {
        &mut self.events
    }

    fn finish_action(&self, data: &GameData, event: GameEvent) {
        self.shared.publish(event);
        let status = data.status();
        if status.is_terminal() {
            log::info!("game over: {status}");
        }
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
