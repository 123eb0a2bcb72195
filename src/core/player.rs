//! Player seats and externally supplied identities.
//!
//! ## PlayerId
//!
//! Seat index at the table: `PlayerId(0)` is the first registered player
//! (the host in two-player mode), `PlayerId(1)` the second.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## PlayerIdentity
//!
//! The `{ id, username }` pair handed in by the host application. It is
//! never validated here; authentication is the caller's business.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier. Indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a table of `player_count` players.
    ///
    /// ```
    /// use memory_match::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(2).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The seat after this one, wrapping around.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count.max(1)) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Identity of a person at the table, as supplied by the host application.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerIdentity {
    /// Stable account or guest id.
    pub id: String,
    /// Name shown on scoreboards.
    pub username: String,
}

impl PlayerIdentity {
    /// Create a new identity.
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use memory_match::core::{PlayerId, PlayerMap};
///
/// let mut matches: PlayerMap<u32> = PlayerMap::with_value(2, 0);
/// matches[PlayerId::new(1)] += 1;
/// assert_eq!(matches[PlayerId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Build a PlayerMap from one value per seat, in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Find the first seat whose data satisfies `predicate`.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<PlayerId> {
        self.iter().find(|(_, v)| predicate(v)).map(|(p, _)| p)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
