use crate::placement::{PlacementError, PlacementStore};
use crate::token::{ContainerId, TokenId};

/// Tap-modality state: at most one token is armed at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Idle,
    Armed(TokenId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Moved {
        token: TokenId,
        destination: ContainerId,
    },
    Failed(PlacementError),
    /// Tapped a destination with nothing armed. A hint for the learner,
    /// not an error.
    NothingArmed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionController {
    selection: Selection,
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            selection: Selection::Idle,
        }
    }

    pub fn armed(&self) -> Option<TokenId> {
        match self.selection {
            Selection::Idle => None,
            Selection::Armed(token) => Some(token),
        }
    }

    /// Tapping an unarmed token arms it; tapping the armed token again
    /// disarms it; tapping a different token re-arms to that one.
    pub fn tap_token(&mut self, token: TokenId) -> Selection {
        self.selection = match self.selection {
            Selection::Armed(current) if current == token => Selection::Idle,
            _ => Selection::Armed(token),
        };
        self.selection
    }

    /// Commits the armed token to `destination` through the one shared
    /// `PlacementStore::move_token`. The selection clears whether or not the
    /// move succeeded, so a rejected move never leaves the UI stuck armed.
    pub fn tap_container(
        &mut self,
        destination: ContainerId,
        store: &mut PlacementStore,
    ) -> TapOutcome {
        let Selection::Armed(token) = self.selection else {
            return TapOutcome::NothingArmed;
        };
        self.selection = Selection::Idle;
        match store.move_token(token, destination) {
            Ok(()) => TapOutcome::Moved { token, destination },
            Err(err) => TapOutcome::Failed(err),
        }
    }

    pub fn clear(&mut self) {
        self.selection = Selection::Idle;
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}
