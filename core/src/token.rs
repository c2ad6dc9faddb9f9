use std::fmt;

/// Identity of a placeable token. Assigned when an exercise generates its
/// tokens and never reused within the same exercise instance, including
/// across resets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(pub u32);

/// Where a token can live: the shared pool or one of the labeled zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerId {
    Pool,
    Zone(ZoneId),
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerId::Pool => write!(f, "pool"),
            ContainerId::Zone(zone) => write!(f, "zone {}", zone.0),
        }
    }
}

/// A single placeable unit of content. `tag` is the hidden answer key used
/// by grading and is never shown to the learner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub id: TokenId,
    pub label: String,
    pub tag: Option<String>,
}

/// A named destination. `accepted_tag` is the tag this zone grades as
/// correct; a zone without one never counts a token as correct (ordering
/// drills grade against the expected sentence instead).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zone {
    pub id: ZoneId,
    pub label: String,
    pub accepted_tag: Option<String>,
}
