use crate::placement::PlacementStore;
use crate::token::{ContainerId, Token, TokenId, Zone, ZoneId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradeResult {
    pub correct_count: usize,
    pub total_count: usize,
    pub is_fully_correct: bool,
}

/// Grading distinguishes "nothing placed yet" from "0 of n correct" so
/// callers never style an untouched drill as failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradeOutcome {
    NotAttempted,
    Graded(GradeResult),
}

impl GradeOutcome {
    fn from_counts(correct_count: usize, total_count: usize) -> Self {
        if total_count == 0 {
            return GradeOutcome::NotAttempted;
        }
        GradeOutcome::Graded(GradeResult {
            correct_count,
            total_count,
            is_fully_correct: correct_count == total_count,
        })
    }
}

/// Partial credit over every token currently in a zone. Tokens still in the
/// pool do not count toward the total; a token in the wrong zone does.
pub fn grade_categorize(store: &PlacementStore, tokens: &[Token], zones: &[Zone]) -> GradeOutcome {
    let mut correct = 0;
    let mut total = 0;
    for zone in zones {
        let Ok(placed) = store.tokens_in(ContainerId::Zone(zone.id)) else {
            continue;
        };
        for &id in placed {
            total += 1;
            let Some(tag) = token_by_id(tokens, id).and_then(|token| token.tag.as_deref()) else {
                continue;
            };
            if zone.accepted_tag.as_deref() == Some(tag) {
                correct += 1;
            }
        }
    }
    GradeOutcome::from_counts(correct, total)
}

/// Binary grading for sentence building: the single zone's labels, joined in
/// placement order, must match the expected sentence after normalization.
pub fn grade_order(
    store: &PlacementStore,
    tokens: &[Token],
    zone: ZoneId,
    expected: &str,
) -> GradeOutcome {
    let Ok(placed) = store.tokens_in(ContainerId::Zone(zone)) else {
        return GradeOutcome::NotAttempted;
    };
    if placed.is_empty() {
        return GradeOutcome::NotAttempted;
    }
    let mut built = String::new();
    for &id in placed {
        let Some(token) = token_by_id(tokens, id) else {
            continue;
        };
        if !built.is_empty() {
            built.push(' ');
        }
        built.push_str(&token.label);
    }
    let matched = normalize_answer(&built) == normalize_answer(expected);
    GradeOutcome::from_counts(usize::from(matched), 1)
}

/// Case-insensitive, whitespace-collapsing, punctuation-insensitive form
/// used for sentence comparison. Apostrophes between alphanumerics survive
/// (so "I'd" stays one word); curly apostrophes fold to ASCII.
pub fn normalize_answer(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut pending_gap = false;
    for (index, &ch) in chars.iter().enumerate() {
        let is_apostrophe = ch == '\'' || ch == '\u{2019}';
        let keep_apostrophe = is_apostrophe
            && index > 0
            && chars[index - 1].is_alphanumeric()
            && chars.get(index + 1).is_some_and(|next| next.is_alphanumeric());
        if ch.is_alphanumeric() {
            if pending_gap && !out.is_empty() {
                out.push(' ');
            }
            pending_gap = false;
            out.extend(ch.to_lowercase());
        } else if keep_apostrophe {
            out.push('\'');
        } else {
            pending_gap = true;
        }
    }
    out
}

fn token_by_id(tokens: &[Token], id: TokenId) -> Option<&Token> {
    tokens.iter().find(|token| token.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_case_space_punctuation() {
        assert_eq!(
            normalize_answer("  I'd rather travel,   by TRAIN. "),
            "i'd rather travel by train"
        );
    }

    #[test]
    fn normalize_folds_curly_apostrophe() {
        assert_eq!(normalize_answer("I\u{2019}d"), "i'd");
    }

    #[test]
    fn normalize_drops_dangling_apostrophe() {
        assert_eq!(normalize_answer("'train'"), "train");
    }
}
