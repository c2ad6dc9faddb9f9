use std::collections::HashMap;
use std::fmt;

use crate::token::{ContainerId, TokenId, ZoneId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementError {
    UnknownToken { id: TokenId },
    UnknownContainer { id: ContainerId },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::UnknownToken { id } => write!(f, "unknown token {}", id.0),
            PlacementError::UnknownContainer { id } => write!(f, "unknown container {id}"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// The single source of truth for where every token is right now.
///
/// Every live token maps to exactly one container at all times. A failed
/// `move_token` leaves the store exactly as it was; there is no observable
/// half-moved state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementStore {
    locations: HashMap<TokenId, ContainerId>,
    pool: Vec<TokenId>,
    zones: Vec<Vec<TokenId>>,
}

impl PlacementStore {
    /// All tokens start in the pool.
    pub fn new(tokens: &[TokenId], zone_count: usize) -> Self {
        let mut locations = HashMap::with_capacity(tokens.len());
        let mut pool = Vec::with_capacity(tokens.len());
        for &token in tokens {
            locations.insert(token, ContainerId::Pool);
            pool.push(token);
        }
        Self {
            locations,
            pool,
            zones: vec![Vec::new(); zone_count],
        }
    }

    pub fn contains(&self, token: TokenId) -> bool {
        self.locations.contains_key(&token)
    }

    pub fn container_of(&self, token: TokenId) -> Result<ContainerId, PlacementError> {
        self.locations
            .get(&token)
            .copied()
            .ok_or(PlacementError::UnknownToken { id: token })
    }

    /// Tokens currently in `container`, in insertion order. Callers treating
    /// the container as unordered simply ignore the order.
    pub fn tokens_in(&self, container: ContainerId) -> Result<&[TokenId], PlacementError> {
        match container {
            ContainerId::Pool => Ok(&self.pool),
            ContainerId::Zone(zone) => self
                .zones
                .get(zone.0 as usize)
                .map(Vec::as_slice)
                .ok_or(PlacementError::UnknownContainer { id: container }),
        }
    }

    /// Count of tokens placed in any zone (the pool does not count).
    pub fn placed_count(&self) -> usize {
        self.zones.iter().map(Vec::len).sum()
    }

    pub fn move_token(
        &mut self,
        token: TokenId,
        destination: ContainerId,
    ) -> Result<(), PlacementError> {
        let source = self.container_of(token)?;
        if let ContainerId::Zone(zone) = destination {
            if zone.0 as usize >= self.zones.len() {
                return Err(PlacementError::UnknownContainer { id: destination });
            }
        }
        self.list_mut(source).retain(|&entry| entry != token);
        self.list_mut(destination).push(token);
        self.locations.insert(token, destination);
        Ok(())
    }

    fn list_mut(&mut self, container: ContainerId) -> &mut Vec<TokenId> {
        match container {
            ContainerId::Pool => &mut self.pool,
            // Validated by move_token before any mutation.
            ContainerId::Zone(ZoneId(index)) => &mut self.zones[index as usize],
        }
    }
}
