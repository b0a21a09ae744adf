//! Events broadcast to every participant after each committed action.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::entities::{Card, Hint, PlayerId};

/// An immutable fact about a committed action, published to every seat
/// (including the actor's) and to any extra observers.
///
/// A `Cue` reveals positions and the matched attribute, never full card
/// identity; `Play` and `Discard` name the card because it is leaving the
/// actor's hand anyway, and by the rules the actor was the only one who
/// couldn't see it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameEvent {
    Cue {
        from: PlayerId,
        to: PlayerId,
        /// Positions in the target's hand matching the hint; never empty.
        indices: Vec<usize>,
        hint: Hint,
    },
    Play {
        player: PlayerId,
        card: Card,
    },
    Discard {
        player: PlayerId,
        card: Card,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Cue {
                from,
                to,
                indices,
                hint,
            } => {
                let positions = indices
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("player {from} cues player {to}: {hint} at {positions}")
            }
            Self::Play { player, card } => format!("player {player} plays {card}"),
            Self::Discard { player, card } => format!("player {player} discards {card}"),
        };
        write!(f, "{repr}")
    }
}
