use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::constants::{
    COLOR_COUNT, DECK_SIZE, MAX_FUSE_TOKENS, MAX_INFO_TOKENS, RANK_MULTIPLICITIES,
};

/// The five firework colors.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Color {
    White,
    Yellow,
    Green,
    Blue,
    Red,
}

impl Color {
    /// Every color, in the order used by per-color progress arrays.
    pub const ALL: [Self; COLOR_COUNT] = [
        Self::White,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Red,
    ];

    /// Position of this color in `Color::ALL` and in progress arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::White => "w",
            Self::Yellow => "y",
            Self::Green => "g",
            Self::Blue => "b",
            Self::Red => "r",
        };
        write!(f, "{repr}")
    }
}

/// Card rank, 1 through 5.
pub type Rank = u8;

/// Seat positions double as player identities; a player's id is its index
/// into the seating order fixed at construction.
pub type PlayerId = usize;

/// A card is a rank paired with a color. Cards are plain values; two cards
/// of the same rank and color are indistinguishable.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Rank, pub Color);

impl Card {
    #[must_use]
    pub const fn rank(self) -> Rank {
        self.0
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.1
    }

    /// Whether this card is what the hint names.
    #[must_use]
    pub fn matches(self, hint: Hint) -> bool {
        match hint {
            Hint::Color(color) => self.1 == color,
            Hint::Rank(rank) => self.0 == rank,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.1, self.0)
    }
}

/// The single attribute-and-value pair a cue may reveal about a hand.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Hint {
    Color(Color),
    Rank(Rank),
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Color(color) => write!(f, "color {color}"),
            Self::Rank(rank) => write!(f, "rank {rank}"),
        }
    }
}

/// An ordered hand of cards. Every player-facing operation addresses cards
/// by their position in this sequence.
pub type Hand = Vec<Card>;

/// The draw pile. Built once with the fixed 50-card composition, shuffled
/// before dealing, and consumed from the front; it never grows back.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
    idx: usize,
}

impl Deck {
    /// Deal the next card, or `None` once the pile is exhausted.
    pub fn deal(&mut self) -> Option<Card> {
        let card = self.cards.get(self.idx).copied()?;
        self.idx += 1;
        Some(card)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.idx = 0;
    }

    /// Cards remaining in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        DECK_SIZE - self.idx
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.idx == DECK_SIZE
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards = [Card(0, Color::White); DECK_SIZE];
        let mut i = 0;
        for color in Color::ALL {
            for (rank, n) in RANK_MULTIPLICITIES.iter().enumerate() {
                for _ in 0..*n {
                    cards[i] = Card(rank as Rank + 1, color);
                    i += 1;
                }
            }
        }
        Self { cards, idx: 0 }
    }
}

/// Where the game stands: still running, or one of the three endings.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum GameStatus {
    /// Actions are still being accepted.
    InProgress,
    /// Every color reached rank 5.
    Won,
    /// The fuse tokens ran out.
    Lost,
    /// The deck ran dry and every player took one final turn.
    Ended,
}

impl GameStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Ended => "ended",
        };
        write!(f, "{repr}")
    }
}

/// A point-in-time copy of everything publicly observable about a game.
///
/// Snapshots are taken under the same lock discipline as mutations, so the
/// fields are always mutually consistent, and they own their data outright;
/// holding one never pins or reveals live game state.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    /// Highest rank played so far, per color, in `Color::ALL` order.
    pub played: [Rank; COLOR_COUNT],
    pub info_tokens: u8,
    pub fuse_tokens: u8,
    pub deck_len: usize,
    pub current_player: PlayerId,
    pub status: GameStatus,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let progress = Color::ALL
            .iter()
            .zip(self.played)
            .map(|(color, rank)| format!("{color}{rank}"))
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            f,
            "{progress} | info {}/{MAX_INFO_TOKENS} | fuse {}/{MAX_FUSE_TOKENS} | deck {} | player {} to act | {}",
            self.info_tokens, self.fuse_tokens, self.deck_len, self.current_player, self.status,
        )
    }
}
