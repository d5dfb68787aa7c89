mod engine;
mod mask;
mod segments;

pub use segments::{Segments, WildcardMatcher};

use crate::pattern::WildcardPattern;
use engine::{NoTrack, walk};
use mask::MaskTracker;
use smallvec::SmallVec;

pub(crate) type InputBuf = SmallVec<[char; 64]>;

/// Decides whether `input` is selected by `pattern`.
///
/// Total and deterministic; never panics on any pattern/input pair.
#[tracing::instrument(level = "trace", skip_all, fields(pattern = %pattern, input = %input))]
pub fn matches(pattern: &WildcardPattern, input: &str) -> bool {
    if pattern.is_literal() {
        return literal_eq(pattern, input);
    }

    let chars: InputBuf = input.chars().collect();
    walk(pattern, &chars, &mut NoTrack)
}

/// Returns the part of `input` consumed by wildcard tokens, or `None` when
/// `input` does not match.
///
/// Characters matched by `*`, `**`, `?` and `+` are kept in input order. A
/// separator directly after a star that consumed the preceding character is
/// kept as well; all other literal and separator characters are dropped.
#[tracing::instrument(level = "trace", skip_all, fields(pattern = %pattern, input = %input))]
pub fn mask(pattern: &WildcardPattern, input: &str) -> Option<String> {
    if pattern.is_literal() {
        return literal_eq(pattern, input).then(String::new);
    }

    let chars: InputBuf = input.chars().collect();
    let mut tracker = MaskTracker::new();

    if walk(pattern, &chars, &mut tracker) {
        Some(tracker.collect(&chars))
    } else {
        None
    }
}

#[inline]
fn literal_eq(pattern: &WildcardPattern, input: &str) -> bool {
    pattern.tokens()[..pattern.len()]
        .iter()
        .copied()
        .eq(input.chars())
}
