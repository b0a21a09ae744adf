//! Game-wide constants: deck composition, token pools, and table limits.

/// Number of firework colors in the deck.
pub const COLOR_COUNT: usize = 5;

/// Highest card rank; completing a color means playing ranks 1 through 5.
pub const MAX_RANK: u8 = 5;

/// How many copies of each rank exist per color, indexed by rank - 1.
/// Three 1s, two each of 2/3/4, and a single 5.
pub const RANK_MULTIPLICITIES: [usize; COLOR_COUNT] = [3, 2, 2, 2, 1];

/// Total deck size: the rank multiplicities summed over every color.
pub const DECK_SIZE: usize = 50;

/// Info tokens available at the start; also the refund cap.
pub const MAX_INFO_TOKENS: u8 = 8;

/// Fuse tokens available at the start. The game is lost at zero.
pub const MAX_FUSE_TOKENS: u8 = 3;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 5;

/// Player count used by default game settings.
pub const DEFAULT_PLAYER_COUNT: usize = 4;

/// Default per-subscriber event buffer size. A consumer that falls more
/// than this many events behind starts losing the oldest ones.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Cards dealt to each player: 5 at small tables, 4 once seating is tight.
#[must_use]
pub const fn hand_size(player_count: usize) -> usize {
    if player_count < 4 { 5 } else { 4 }
}
