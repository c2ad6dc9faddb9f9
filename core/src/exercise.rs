use crate::content::{ContentError, ExerciseDef, ExerciseKind};
use crate::drag::{DragController, DropOutcome};
use crate::grade::{grade_categorize, grade_order, GradeOutcome};
use crate::placement::{PlacementError, PlacementStore};
use crate::select::{Selection, SelectionController, TapOutcome};
use crate::token::{ContainerId, Token, TokenId, Zone, ZoneId};

/// Discrete inputs the host feeds into an exercise. The pointer layer and
/// the tap layer both end up here, so scripting either modality in a test is
/// just a sequence of actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseAction {
    TapToken { token: TokenId },
    TapContainer { container: ContainerId },
    BeginDrag { token: TokenId },
    DragHover { container: Option<ContainerId> },
    Drop { container: ContainerId },
    CancelDrag,
    Reset,
}

/// What an action did, for the host to turn into feedback or a console
/// warning. Rejections never change placement state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExerciseEvent {
    Armed(TokenId),
    Disarmed,
    Placed {
        token: TokenId,
        container: ContainerId,
    },
    Rejected(PlacementError),
    SelectFirstHint,
    HoverChanged,
    DragStarted(TokenId),
    DragCancelled,
    WasReset,
    Nothing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoneSnapshot {
    pub zone: Zone,
    pub tokens: Vec<Token>,
}

/// Immutable view of an exercise for rendering and assertions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseSnapshot {
    pub kind: ExerciseKind,
    pub prompt: String,
    pub pool: Vec<Token>,
    pub zones: Vec<ZoneSnapshot>,
    pub armed: Option<TokenId>,
    pub dragging: Option<TokenId>,
    pub hovered: Option<ContainerId>,
}

/// One widget's worth of state: tokens, zones, the placement store, and the
/// two input controllers. Each widget constructs its own instance; nothing
/// is shared across widgets.
#[derive(Clone, Debug)]
pub struct Exercise {
    kind: ExerciseKind,
    prompt: String,
    token_defs: Vec<(String, Option<String>)>,
    tokens: Vec<Token>,
    zones: Vec<Zone>,
    expected: Option<String>,
    store: PlacementStore,
    selection: SelectionController,
    drag: DragController,
    next_token_id: u32,
}

impl Exercise {
    pub fn from_def(def: ExerciseDef) -> Result<Self, ContentError> {
        def.validate()?;
        let token_defs: Vec<(String, Option<String>)> = def
            .tokens
            .iter()
            .map(|token| (token.label.clone(), token.tag.clone()))
            .collect();
        let zones: Vec<Zone> = def
            .zones
            .iter()
            .enumerate()
            .map(|(index, zone)| Zone {
                id: ZoneId(index as u32),
                label: zone.label.clone(),
                accepted_tag: zone.accepted_tag.clone(),
            })
            .collect();
        let mut exercise = Self {
            kind: def.kind,
            prompt: def.prompt,
            token_defs,
            tokens: Vec::new(),
            zones,
            expected: def.expected,
            store: PlacementStore::new(&[], 0),
            selection: SelectionController::new(),
            drag: DragController::new(),
            next_token_id: 0,
        };
        exercise.regenerate();
        Ok(exercise)
    }

    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn store(&self) -> &PlacementStore {
        &self.store
    }

    pub fn armed(&self) -> Option<TokenId> {
        self.selection.armed()
    }

    pub fn dragging(&self) -> Option<TokenId> {
        self.drag.dragging()
    }

    pub fn hovered(&self) -> Option<ContainerId> {
        self.drag.hovered()
    }

    pub fn apply(&mut self, action: ExerciseAction) -> ExerciseEvent {
        match action {
            ExerciseAction::TapToken { token } => {
                if !self.store.contains(token) {
                    return ExerciseEvent::Rejected(PlacementError::UnknownToken { id: token });
                }
                match self.selection.tap_token(token) {
                    Selection::Armed(armed) => ExerciseEvent::Armed(armed),
                    Selection::Idle => ExerciseEvent::Disarmed,
                }
            }
            ExerciseAction::TapContainer { container } => {
                match self.selection.tap_container(container, &mut self.store) {
                    TapOutcome::Moved { token, destination } => ExerciseEvent::Placed {
                        token,
                        container: destination,
                    },
                    TapOutcome::Failed(err) => ExerciseEvent::Rejected(err),
                    TapOutcome::NothingArmed => ExerciseEvent::SelectFirstHint,
                }
            }
            ExerciseAction::BeginDrag { token } => {
                if !self.store.contains(token) {
                    return ExerciseEvent::Rejected(PlacementError::UnknownToken { id: token });
                }
                // A press resolves to exactly one modality; starting a drag
                // drops any stale armed selection.
                self.selection.clear();
                self.drag.begin(token);
                ExerciseEvent::DragStarted(token)
            }
            ExerciseAction::DragHover { container } => {
                if self.drag.hovered() == container {
                    return ExerciseEvent::Nothing;
                }
                self.drag.hover(container);
                ExerciseEvent::HoverChanged
            }
            ExerciseAction::Drop { container } => {
                match self.drag.drop_on(container, &mut self.store) {
                    DropOutcome::Moved { token, destination } => ExerciseEvent::Placed {
                        token,
                        container: destination,
                    },
                    DropOutcome::Failed(err) => ExerciseEvent::Rejected(err),
                    DropOutcome::NoDrag => ExerciseEvent::Nothing,
                }
            }
            ExerciseAction::CancelDrag => {
                if self.drag.dragging().is_none() {
                    return ExerciseEvent::Nothing;
                }
                self.drag.cancel();
                ExerciseEvent::DragCancelled
            }
            ExerciseAction::Reset => {
                self.regenerate();
                ExerciseEvent::WasReset
            }
        }
    }

    /// Pure read of the current placements. Calling this twice without an
    /// intervening move returns the same outcome.
    pub fn grade(&self) -> GradeOutcome {
        match self.kind {
            ExerciseKind::Categorize => grade_categorize(&self.store, &self.tokens, &self.zones),
            ExerciseKind::Order => {
                let zone = self.zones[0].id;
                let expected = self.expected.as_deref().unwrap_or("");
                grade_order(&self.store, &self.tokens, zone, expected)
            }
        }
    }

    pub fn snapshot(&self) -> ExerciseSnapshot {
        let pool = self.tokens_in_view(ContainerId::Pool);
        let zones = self
            .zones
            .iter()
            .map(|zone| ZoneSnapshot {
                zone: zone.clone(),
                tokens: self.tokens_in_view(ContainerId::Zone(zone.id)),
            })
            .collect();
        ExerciseSnapshot {
            kind: self.kind,
            prompt: self.prompt.clone(),
            pool,
            zones,
            armed: self.selection.armed(),
            dragging: self.drag.dragging(),
            hovered: self.drag.hovered(),
        }
    }

    fn tokens_in_view(&self, container: ContainerId) -> Vec<Token> {
        let Ok(ids) = self.store.tokens_in(container) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|&id| self.tokens.iter().find(|token| token.id == id))
            .cloned()
            .collect()
    }

    /// Destroys the current token generation and mints a fresh one back in
    /// the pool. Ids keep counting up so a stale id from before the reset
    /// can never alias a new token.
    fn regenerate(&mut self) {
        self.tokens = self
            .token_defs
            .iter()
            .map(|(label, tag)| {
                let id = TokenId(self.next_token_id);
                self.next_token_id += 1;
                Token {
                    id,
                    label: label.clone(),
                    tag: tag.clone(),
                }
            })
            .collect();
        let ids: Vec<TokenId> = self.tokens.iter().map(|token| token.id).collect();
        self.store = PlacementStore::new(&ids, self.zones.len());
        self.selection.clear();
        self.drag.cancel();
    }
}
