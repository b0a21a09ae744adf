//! Rule logic for the shared game aggregate.
//!
//! [`GameData`] owns everything that changes over the course of a game: the
//! draw pile, per-color progress, both token pools, the turn pointer, and
//! every player's hand. The methods here validate an action completely
//! before touching any state, so a rejected action leaves the game exactly
//! as it was. Terminal status is recomputed from state on demand rather
//! than cached.
//!
//! Nothing in this module locks or broadcasts; the concurrent surface in
//! [`crate::table`] wraps a `GameData` in a lock and publishes events after
//! each committed action.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{
    COLOR_COUNT, DEFAULT_EVENT_CAPACITY, DEFAULT_PLAYER_COUNT, MAX_FUSE_TOKENS, MAX_INFO_TOKENS,
    MAX_PLAYERS, MAX_RANK, MIN_PLAYERS, hand_size,
};
use super::entities::{Card, Deck, GameStatus, Hand, Hint, PlayerId, Rank, Snapshot};

/// Ways a player action or game construction can be rejected.
///
/// Every rejection is local and non-fatal: the game stays fully usable and
/// unchanged, and the caller may retry with corrected input. Note that a
/// rule-illegal play (wrong rank for its color) is NOT an error; it is a
/// legal move that costs a fuse token.
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("player count {0} is outside 2-5")]
    InvalidPlayerCount(usize),
    #[error("game over")]
    GameOver,
    #[error("not your turn")]
    NotYourTurn,
    #[error("card index {0} out of range")]
    InvalidCardIndex(usize),
    #[error("not enough info tokens")]
    InsufficientInfoTokens,
    #[error("no cards match that hint")]
    NoMatchingCards,
    #[error("can't inspect your own hand")]
    SelfInspection,
    #[error("no player seated at {0}")]
    UnknownPlayer(PlayerId),
}

/// Game construction settings.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameSettings {
    pub player_count: usize,
    /// Deterministic shuffle seed. `None` shuffles from thread-local
    /// entropy.
    pub seed: Option<u64>,
    /// Per-subscriber event buffer size; see
    /// [`crate::game::constants::DEFAULT_EVENT_CAPACITY`].
    pub event_capacity: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_COUNT)
    }
}

impl GameSettings {
    #[must_use]
    pub const fn new(player_count: usize) -> Self {
        Self {
            player_count,
            seed: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The mutable state of one game, exclusively owned for mutation by
/// whichever operation currently holds the table's write lock.
#[derive(Debug)]
pub struct GameData {
    pub(crate) deck: Deck,
    pub(crate) played: [Rank; COLOR_COUNT],
    pub(crate) info_tokens: u8,
    pub(crate) fuse_tokens: u8,
    pub(crate) current_player: PlayerId,
    /// Turns taken while the draw pile was already empty. The game ends
    /// once every player has taken one.
    pub(crate) ending_turns: usize,
    pub(crate) hands: Vec<Hand>,
}

impl GameData {
    /// Build the 50-card deck, shuffle it, and deal opening hands in
    /// player-id order from the front of the pile.
    pub fn new(settings: &GameSettings) -> Result<Self, GameError> {
        let GameSettings {
            player_count, seed, ..
        } = *settings;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(GameError::InvalidPlayerCount(player_count));
        }

        let mut deck = Deck::default();
        match seed {
            Some(seed) => deck.shuffle(&mut ChaCha8Rng::seed_from_u64(seed)),
            None => deck.shuffle(&mut rand::rng()),
        }

        let cards_per_player = hand_size(player_count);
        let mut hands = Vec::with_capacity(player_count);
        for _ in 0..player_count {
            let mut hand = Hand::with_capacity(cards_per_player);
            for _ in 0..cards_per_player {
                if let Some(card) = deck.deal() {
                    hand.push(card);
                }
            }
            hands.push(hand);
        }

        Ok(Self {
            deck,
            played: [0; COLOR_COUNT],
            info_tokens: MAX_INFO_TOKENS,
            fuse_tokens: MAX_FUSE_TOKENS,
            current_player: 0,
            ending_turns: 0,
            hands,
        })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.len()
    }

    /// Current status, recomputed from state. When several end conditions
    /// hold at once, a burnt-out fuse outranks a completed board, which
    /// outranks running out of final turns.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.fuse_tokens == 0 {
            return GameStatus::Lost;
        }
        if self.played.iter().all(|&rank| rank == MAX_RANK) {
            return GameStatus::Won;
        }
        if self.ending_turns >= self.hands.len() {
            return GameStatus::Ended;
        }
        GameStatus::InProgress
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status().is_terminal()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            played: self.played,
            info_tokens: self.info_tokens,
            fuse_tokens: self.fuse_tokens,
            deck_len: self.deck.len(),
            current_player: self.current_player,
            status: self.status(),
        }
    }

    /// Play the card at `out`, drawing a replacement into `into`.
    ///
    /// Returns the card removed from the hand and whether it continued its
    /// color's sequence. An off-sequence card is still consumed and burns a
    /// fuse token; an on-sequence 5 refunds an info token. Both indices are
    /// validated against the hand as the player currently sees it; `into`
    /// then addresses the hand after `out` has been removed.
    pub fn play(
        &mut self,
        player: PlayerId,
        out: usize,
        into: usize,
    ) -> Result<(Card, bool), GameError> {
        self.ensure_active()?;
        self.ensure_turn(player)?;
        self.check_hand_indices(player, out, into)?;

        self.note_ending_turn();
        let card = self.splice_hand(player, out, into);
        let continued = self.apply_play(card);
        self.advance_turn();

        Ok((card, continued))
    }

    /// Discard the card at `out`, drawing a replacement into `into` and
    /// refunding one info token. Any card may be discarded.
    pub fn discard(
        &mut self,
        player: PlayerId,
        out: usize,
        into: usize,
    ) -> Result<Card, GameError> {
        self.ensure_active()?;
        self.ensure_turn(player)?;
        self.check_hand_indices(player, out, into)?;

        self.note_ending_turn();
        let card = self.splice_hand(player, out, into);
        self.refund_info_token();
        self.advance_turn();

        Ok(card)
    }

    /// Spend an info token to reveal every card in `target`'s hand matching
    /// `hint`. Returns the matched positions, which are never empty: a cue
    /// that would reveal nothing is rejected outright.
    pub fn cue(
        &mut self,
        from: PlayerId,
        target: PlayerId,
        hint: Hint,
    ) -> Result<Vec<usize>, GameError> {
        self.ensure_active()?;
        self.ensure_turn(from)?;
        let hand = self
            .hands
            .get(target)
            .ok_or(GameError::UnknownPlayer(target))?;
        if self.info_tokens == 0 {
            return Err(GameError::InsufficientInfoTokens);
        }
        let indices: Vec<usize> = hand
            .iter()
            .enumerate()
            .filter(|(_, card)| card.matches(hint))
            .map(|(i, _)| i)
            .collect();
        if indices.is_empty() {
            return Err(GameError::NoMatchingCards);
        }

        self.info_tokens -= 1;
        self.note_ending_turn();
        self.advance_turn();

        Ok(indices)
    }

    /// A defensive copy of `target`'s hand for `viewer`. Players may never
    /// look at their own cards through this path; those stay hidden except
    /// through cues.
    pub fn peek_hand(&self, viewer: PlayerId, target: PlayerId) -> Result<Hand, GameError> {
        let hand = self
            .hands
            .get(target)
            .ok_or(GameError::UnknownPlayer(target))?;
        if viewer == target {
            return Err(GameError::SelfInspection);
        }
        Ok(hand.clone())
    }

    fn ensure_active(&self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    fn ensure_turn(&self, player: PlayerId) -> Result<(), GameError> {
        if player != self.current_player {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    /// `into` may equal the last valid pre-removal index: that inserts the
    /// drawn card at the end of the shortened hand.
    fn check_hand_indices(
        &self,
        player: PlayerId,
        out: usize,
        into: usize,
    ) -> Result<(), GameError> {
        let len = self.hands[player].len();
        if out >= len {
            return Err(GameError::InvalidCardIndex(out));
        }
        if into >= len {
            return Err(GameError::InvalidCardIndex(into));
        }
        Ok(())
    }

    /// Remove `out`, then insert a drawn card at `into` in the shortened
    /// hand. With the deck empty the hand simply stays one card short.
    fn splice_hand(&mut self, player: PlayerId, out: usize, into: usize) -> Card {
        let card = self.hands[player].remove(out);
        if let Some(drawn) = self.deck.deal() {
            self.hands[player].insert(into, drawn);
        }
        card
    }

    fn apply_play(&mut self, card: Card) -> bool {
        let slot = card.color().index();
        if self.played[slot] + 1 != card.rank() {
            self.fuse_tokens = self.fuse_tokens.saturating_sub(1);
            return false;
        }
        self.played[slot] = card.rank();
        if card.rank() == MAX_RANK {
            self.refund_info_token();
        }
        true
    }

    fn refund_info_token(&mut self) {
        if self.info_tokens < MAX_INFO_TOKENS {
            self.info_tokens += 1;
        }
    }

    /// Counted before this turn's draw: a turn contributes to the final
    /// round only when the pile was already empty as the action committed.
    fn note_ending_turn(&mut self) {
        if self.deck.is_empty() {
            self.ending_turns += 1;
        }
    }

    fn advance_turn(&mut self) {
        self.current_player = (self.current_player + 1) % self.hands.len();
    }
}
