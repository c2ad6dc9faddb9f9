pub mod catalog;
pub mod content;
pub mod drag;
pub mod exercise;
pub mod grade;
pub mod placement;
pub mod select;
pub mod token;

pub use catalog::{drill_by_slug, DrillCatalogEntry, DEFAULT_DRILL_SLUG, DRILL_CATALOG};
pub use content::{ContentError, ExerciseDef, ExerciseKind, TokenDef, ZoneDef};
pub use drag::{DragController, DropOutcome};
pub use exercise::{Exercise, ExerciseAction, ExerciseEvent, ExerciseSnapshot, ZoneSnapshot};
pub use grade::{grade_categorize, grade_order, normalize_answer, GradeOutcome, GradeResult};
pub use placement::{PlacementError, PlacementStore};
pub use select::{Selection, SelectionController, TapOutcome};
pub use token::{ContainerId, Token, TokenId, Zone, ZoneId};
