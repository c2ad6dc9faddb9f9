use crate::placement::{PlacementError, PlacementStore};
use crate::token::{ContainerId, TokenId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Moved {
        token: TokenId,
        destination: ContainerId,
    },
    Failed(PlacementError),
    /// Drop with no drag in flight (e.g. a stray pointerup).
    NoDrag,
}

/// Pointer-modality adapter. Tags the gesture with the dragged token on
/// begin and routes the drop through the same `PlacementStore::move_token`
/// the tap path uses. Hover only drives a visual affordance and never
/// touches the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragController {
    dragging: Option<TokenId>,
    hovered: Option<ContainerId>,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            dragging: None,
            hovered: None,
        }
    }

    pub fn dragging(&self) -> Option<TokenId> {
        self.dragging
    }

    pub fn hovered(&self) -> Option<ContainerId> {
        self.hovered
    }

    pub fn begin(&mut self, token: TokenId) {
        self.dragging = Some(token);
        self.hovered = None;
    }

    pub fn hover(&mut self, container: Option<ContainerId>) {
        if self.dragging.is_some() {
            self.hovered = container;
        }
    }

    pub fn drop_on(
        &mut self,
        destination: ContainerId,
        store: &mut PlacementStore,
    ) -> DropOutcome {
        self.hovered = None;
        let Some(token) = self.dragging.take() else {
            return DropOutcome::NoDrag;
        };
        match store.move_token(token, destination) {
            Ok(()) => DropOutcome::Moved { token, destination },
            Err(err) => DropOutcome::Failed(err),
        }
    }

    pub fn cancel(&mut self) {
        self.dragging = None;
        self.hovered = None;
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}
