use smallvec::SmallVec;

use super::token::{ESCAPE_CHAR, PLUS_CHAR, QUESTION_CHAR, STAR_CHAR};
use super::{PatternFeatures, TokenKind, WildcardPattern};

/// One classified pattern character; `None` marks a dead slot that is
/// dropped during compaction.
type Slot = (char, Option<TokenKind>);

/// Compiles `pattern` into an immutable [`WildcardPattern`].
///
/// Compilation is total: every string is a valid pattern. Characters that are
/// not metacharacters (or that are escaped with `\`) become literals, and the
/// configured `separator` is always a separator token, escaped or not.
#[tracing::instrument(level = "trace", skip_all, fields(pattern = %pattern, separator = ?separator))]
pub fn compile(pattern: &str, separator: Option<char>) -> WildcardPattern {
    let mut slots: SmallVec<[Slot; 32]> = SmallVec::with_capacity(pattern.len());
    let mut features = PatternFeatures::empty();
    let mut escaped = false;
    let mut star_run = 0usize;

    for c in pattern.chars() {
        if separator == Some(c) {
            escaped = false;
            star_run = 0;
            slots.push((c, Some(TokenKind::Separator)));
            continue;
        }

        if escaped {
            escaped = false;
            star_run = 0;
            slots.push((c, Some(TokenKind::Literal)));
            continue;
        }

        match c {
            ESCAPE_CHAR => {
                escaped = true;
                star_run = 0;
                features |= PatternFeatures::ESCAPE;
                slots.push((c, None));
            }
            STAR_CHAR => {
                // `?*` drops the question mark
                if let Some(last) = slots.last_mut()
                    && last.1 == Some(TokenKind::Question)
                {
                    last.1 = None;
                }
                star_run += 1;
                slots.push((c, Some(TokenKind::Star)));
            }
            QUESTION_CHAR | PLUS_CHAR => {
                let kind = if c == QUESTION_CHAR {
                    TokenKind::Question
                } else {
                    TokenKind::Plus
                };
                // dead right after a single star
                let live = star_run != 1;
                star_run = 0;
                slots.push((c, live.then_some(kind)));
            }
            _ => {
                star_run = 0;
                slots.push((c, Some(TokenKind::Literal)));
            }
        }
    }

    let (tokens, kinds) = compact(&slots);
    for &kind in kinds.iter() {
        features |= PatternFeatures::from_kind(kind);
    }

    tracing::trace!(
        tokens = kinds.len() - 1,
        features = ?features,
        "wildcard pattern compiled"
    );

    WildcardPattern::from_parts(pattern, separator, tokens, kinds, features)
}

/// Drops dead slots, folds every run of adjacent stars into one `StarStar`
/// and terminates the buffers with an `EndOfPattern` slot.
fn compact(slots: &[Slot]) -> (Box<[char]>, Box<[TokenKind]>) {
    let mut tokens: Vec<char> = Vec::with_capacity(slots.len() + 1);
    let mut kinds: Vec<TokenKind> = Vec::with_capacity(slots.len() + 1);

    for &(c, kind) in slots {
        let Some(kind) = kind else {
            continue;
        };

        if kind.is_star()
            && let Some(last) = kinds.last_mut()
            && last.is_star()
        {
            *last = TokenKind::StarStar;
            continue;
        }

        tokens.push(c);
        kinds.push(kind);
    }

    tokens.push('\0');
    kinds.push(TokenKind::EndOfPattern);

    (tokens.into_boxed_slice(), kinds.into_boxed_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn kinds_of(pattern: &str, separator: Option<char>) -> Vec<TokenKind> {
        compile(pattern, separator).kinds().to_vec()
    }

    #[test]
    fn empty_pattern_compiles_to_end_only() {
        let p = compile("", Some('/'));
        assert!(p.is_empty());
        assert_eq!(p.kinds(), &[EndOfPattern]);
    }

    #[test]
    fn double_star_replaces_both_slots() {
        assert_eq!(
            kinds_of("a**b", Some('/')),
            vec![Literal, StarStar, Literal, EndOfPattern]
        );
    }

    #[test]
    fn long_star_runs_fold_into_one_double_star() {
        assert_eq!(kinds_of("***", None), vec![StarStar, EndOfPattern]);
        assert_eq!(kinds_of("a****", None), vec![Literal, StarStar, EndOfPattern]);
    }

    #[test]
    fn question_next_to_single_star_is_dead() {
        assert_eq!(kinds_of("*?", None), vec![Star, EndOfPattern]);
        assert_eq!(kinds_of("?*", None), vec![Star, EndOfPattern]);
        assert_eq!(kinds_of("**?", Some('/')), vec![StarStar, Question, EndOfPattern]);
    }

    #[test]
    fn plus_after_single_star_is_dead() {
        assert_eq!(kinds_of("*+", None), vec![Star, EndOfPattern]);
        assert_eq!(kinds_of("+*", None), vec![Plus, Star, EndOfPattern]);
    }

    #[test]
    fn question_between_stars_leaves_one_double_star() {
        assert_eq!(kinds_of("*?*", None), vec![StarStar, EndOfPattern]);
    }

    #[test]
    fn escape_turns_metacharacters_into_literals() {
        let p = compile(r"a\*\?\+\\", None);
        assert_eq!(p.tokens(), &['a', '*', '?', '+', '\\', '\0']);
        assert!(p.kinds()[..5].iter().all(|k| *k == Literal));
        assert!(p.features().contains(PatternFeatures::ESCAPE));
        assert!(!p.features().has_wildcards());
    }

    #[test]
    fn escape_cannot_hide_the_separator() {
        assert_eq!(
            kinds_of(r"a\/b", Some('/')),
            vec![Literal, Separator, Literal, EndOfPattern]
        );
    }

    #[test]
    fn trailing_escape_is_dropped() {
        let p = compile(r"ab\", None);
        assert_eq!(p.tokens(), &['a', 'b', '\0']);
    }

    #[test]
    fn without_separator_slash_is_literal() {
        assert_eq!(kinds_of("/", None), vec![Literal, EndOfPattern]);
    }

    #[test]
    fn metacharacter_separator_wins_over_wildcard() {
        assert_eq!(kinds_of("a*b", Some('*')), vec![Literal, Separator, Literal, EndOfPattern]);
    }
}
