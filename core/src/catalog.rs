use crate::content::{ExerciseDef, ExerciseKind, TokenDef, ZoneDef};

/// One built-in drill. Tags and expected sentences use `""` for "none" so
/// the table stays `const`-friendly.
#[derive(Clone, Copy, Debug)]
pub struct DrillCatalogEntry {
    pub slug: &'static str,
    pub title: &'static str,
    pub kind: ExerciseKind,
    pub prompt: &'static str,
    /// (label, tag) pairs; empty tag means untagged.
    pub tokens: &'static [(&'static str, &'static str)],
    /// (label, accepted tag) pairs; empty tag means the zone grades nothing.
    pub zones: &'static [(&'static str, &'static str)],
    pub expected: &'static str,
    /// Lines read aloud by the narrator for this drill, in order.
    pub narration: &'static [&'static str],
}

pub const DEFAULT_DRILL_SLUG: &str = "linkers-cause-contrast";

pub const DRILL_CATALOG: &[DrillCatalogEntry] = &[
    DrillCatalogEntry {
        slug: "linkers-cause-contrast",
        title: "Linking words: cause and contrast",
        kind: ExerciseKind::Categorize,
        prompt: "Sort each linking word into the group it belongs to.",
        tokens: &[
            ("because", "cause"),
            ("since", "cause"),
            ("as a result of", "cause"),
            ("however", "contrast"),
            ("although", "contrast"),
            ("on the other hand", "contrast"),
        ],
        zones: &[("Cause", "cause"), ("Contrast", "contrast")],
        expected: "",
        narration: &[
            "Because and since introduce a cause.",
            "However and although introduce a contrast.",
        ],
    },
    DrillCatalogEntry {
        slug: "travel-collocations",
        title: "Travel: verb or noun?",
        kind: ExerciseKind::Categorize,
        prompt: "Is each word a verb or a noun in the dialogue?",
        tokens: &[
            ("book", "verb"),
            ("catch", "verb"),
            ("miss", "verb"),
            ("platform", "noun"),
            ("luggage", "noun"),
            ("timetable", "noun"),
        ],
        zones: &[("Verbs", "verb"), ("Nouns", "noun")],
        expected: "",
        narration: &[
            "You book a ticket and catch a train.",
            "You wait on the platform with your luggage.",
        ],
    },
    DrillCatalogEntry {
        slug: "order-rather-train",
        title: "Word order: preferences",
        kind: ExerciseKind::Order,
        prompt: "Put the words in order to make the sentence you hear.",
        tokens: &[
            ("I'd", ""),
            ("rather", ""),
            ("travel", ""),
            ("by", ""),
            ("train", ""),
        ],
        zones: &[("Your sentence", "")],
        expected: "I'd rather travel by train",
        narration: &["I'd rather travel by train."],
    },
    DrillCatalogEntry {
        slug: "order-lived-here",
        title: "Word order: present perfect questions",
        kind: ExerciseKind::Order,
        prompt: "Build the question from the words below.",
        tokens: &[
            ("How", ""),
            ("long", ""),
            ("have", ""),
            ("you", ""),
            ("lived", ""),
            ("here", ""),
        ],
        zones: &[("Your question", "")],
        expected: "How long have you lived here?",
        narration: &["How long have you lived here?"],
    },
];

pub fn drill_by_slug(slug: &str) -> Option<&'static DrillCatalogEntry> {
    let trimmed = slug.trim();
    DRILL_CATALOG
        .iter()
        .find(|entry| entry.slug.eq_ignore_ascii_case(trimmed))
}

impl DrillCatalogEntry {
    pub fn to_def(&self) -> ExerciseDef {
        ExerciseDef {
            kind: self.kind,
            prompt: self.prompt.to_string(),
            tokens: self
                .tokens
                .iter()
                .map(|&(label, tag)| TokenDef {
                    label: label.to_string(),
                    tag: non_empty(tag),
                })
                .collect(),
            zones: self
                .zones
                .iter()
                .map(|&(label, accepted_tag)| ZoneDef {
                    label: label.to_string(),
                    accepted_tag: non_empty(accepted_tag),
                })
                .collect(),
            expected: non_empty(self.expected),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_entry_validates() {
        for entry in DRILL_CATALOG {
            assert_eq!(
                entry.to_def().validate(),
                Ok(()),
                "catalog entry '{}' failed validation",
                entry.slug
            );
        }
    }

    #[test]
    fn slugs_are_unique() {
        for (index, entry) in DRILL_CATALOG.iter().enumerate() {
            assert!(
                DRILL_CATALOG[..index]
                    .iter()
                    .all(|other| other.slug != entry.slug),
                "duplicate slug '{}'",
                entry.slug
            );
        }
    }

    #[test]
    fn default_slug_resolves() {
        assert!(drill_by_slug(DEFAULT_DRILL_SLUG).is_some());
        assert!(drill_by_slug(" LINKERS-CAUSE-CONTRAST ").is_some());
        assert!(drill_by_slug("no-such-drill").is_none());
    }
}
