use std::fmt;

use serde::{Deserialize, Serialize};

/// What a drill asks the learner to do with the tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    /// Sort tokens into the zone matching their hidden tag.
    Categorize,
    /// Build a sentence by placing tokens in order into a single zone.
    Order,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenDef {
    pub label: String,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneDef {
    pub label: String,
    #[serde(default)]
    pub accepted_tag: Option<String>,
}

/// The plain content record an exercise is constructed from. Hand-authored
/// in the catalog today, but nothing here cares where it comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDef {
    pub kind: ExerciseKind,
    pub prompt: String,
    pub tokens: Vec<TokenDef>,
    pub zones: Vec<ZoneDef>,
    #[serde(default)]
    pub expected: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentError {
    NoTokens,
    EmptyTokenLabel { index: usize },
    NoZones,
    DuplicateZoneLabel { label: String },
    OrderNeedsSingleZone { found: usize },
    MissingExpected,
    NoGradableZone,
    UnmatchedTag { label: String, tag: String },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::NoTokens => write!(f, "exercise has no tokens"),
            ContentError::EmptyTokenLabel { index } => {
                write!(f, "token {index} has an empty label")
            }
            ContentError::NoZones => write!(f, "exercise has no zones"),
            ContentError::DuplicateZoneLabel { label } => {
                write!(f, "duplicate zone label '{label}'")
            }
            ContentError::OrderNeedsSingleZone { found } => {
                write!(f, "ordering exercise needs exactly one zone, got {found}")
            }
            ContentError::MissingExpected => {
                write!(f, "ordering exercise is missing the expected sentence")
            }
            ContentError::NoGradableZone => {
                write!(f, "categorize exercise has no zone with an accepted tag")
            }
            ContentError::UnmatchedTag { label, tag } => {
                write!(f, "token '{label}' has tag '{tag}' no zone accepts")
            }
        }
    }
}

impl std::error::Error for ContentError {}

impl ExerciseDef {
    /// Rejects malformed content up front so the engine never compares
    /// against missing fields at grade time.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.tokens.is_empty() {
            return Err(ContentError::NoTokens);
        }
        for (index, token) in self.tokens.iter().enumerate() {
            if token.label.trim().is_empty() {
                return Err(ContentError::EmptyTokenLabel { index });
            }
        }
        if self.zones.is_empty() {
            return Err(ContentError::NoZones);
        }
        for (index, zone) in self.zones.iter().enumerate() {
            let label = zone.label.trim();
            if self.zones[..index]
                .iter()
                .any(|other| other.label.trim().eq_ignore_ascii_case(label))
            {
                return Err(ContentError::DuplicateZoneLabel {
                    label: zone.label.clone(),
                });
            }
        }
        match self.kind {
            ExerciseKind::Order => {
                if self.zones.len() != 1 {
                    return Err(ContentError::OrderNeedsSingleZone {
                        found: self.zones.len(),
                    });
                }
                let expected = self.expected.as_deref().unwrap_or("");
                if expected.trim().is_empty() {
                    return Err(ContentError::MissingExpected);
                }
            }
            ExerciseKind::Categorize => {
                if !self.zones.iter().any(|zone| zone.accepted_tag.is_some()) {
                    return Err(ContentError::NoGradableZone);
                }
                for token in &self.tokens {
                    let Some(tag) = token.tag.as_deref() else {
                        continue;
                    };
                    let matched = self
                        .zones
                        .iter()
                        .any(|zone| zone.accepted_tag.as_deref() == Some(tag));
                    if !matched {
                        return Err(ContentError::UnmatchedTag {
                            label: token.label.clone(),
                            tag: tag.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
