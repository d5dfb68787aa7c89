use std::iter::FusedIterator;

use smallvec::SmallVec;

use super::InputBuf;
use super::engine::{NoTrack, walk};
use crate::pattern::WildcardPattern;

/// Reusable matcher that remembers the separator layout of the last input so
/// that its segments can be read back after a successful match.
///
/// Unlike [`WildcardPattern`], a `WildcardMatcher` holds per-input state and is
/// meant to be owned by a single caller.
#[derive(Debug, Clone)]
pub struct WildcardMatcher<'p> {
    pattern: &'p WildcardPattern,
    input: String,
    /// Byte offsets of every separator in `input`.
    separators: SmallVec<[usize; 8]>,
    separated: bool,
}

impl<'p> WildcardMatcher<'p> {
    pub fn new(pattern: &'p WildcardPattern) -> Self {
        Self {
            pattern,
            input: String::new(),
            separators: SmallVec::new(),
            separated: false,
        }
    }

    pub fn pattern(&self) -> &'p WildcardPattern {
        self.pattern
    }

    /// Matches `input` and, on success, records its segments.
    pub fn matches(&mut self, input: &str) -> bool {
        self.reset();

        let matched = if self.pattern.is_literal() {
            super::literal_eq(self.pattern, input)
        } else {
            let chars: InputBuf = input.chars().collect();
            walk(self.pattern, &chars, &mut NoTrack)
        };

        if matched {
            self.record(input);
        }
        matched
    }

    /// Records the segments of `input` without matching it and returns the
    /// number of separators found.
    pub fn separate(&mut self, input: &str) -> usize {
        self.reset();
        self.record(input);
        self.separators.len()
    }

    /// Separators in the last recorded input; `None` when nothing is recorded.
    pub fn separator_count(&self) -> Option<usize> {
        self.separated.then_some(self.separators.len())
    }

    /// Segment `group` of the last recorded input. Group 0 precedes the first
    /// separator and group `separator_count()` follows the last one.
    pub fn segment(&self, group: usize) -> Option<&str> {
        if !self.separated || group > self.separators.len() {
            return None;
        }

        let start = match group {
            0 => 0,
            n => self.separators[n - 1] + self.separator_len(),
        };
        let end = self
            .separators
            .get(group)
            .copied()
            .unwrap_or(self.input.len());

        Some(&self.input[start..end])
    }

    /// Iterates over the segments of the last recorded input, front to back
    /// or back to front.
    pub fn segments(&self) -> Segments<'_> {
        let back = if self.separated {
            self.separators.len() + 1
        } else {
            0
        };
        Segments {
            matcher: self,
            front: 0,
            back,
        }
    }

    fn reset(&mut self) {
        self.input.clear();
        self.separators.clear();
        self.separated = false;
    }

    fn record(&mut self, input: &str) {
        self.input.push_str(input);
        if let Some(sep) = self.pattern.separator() {
            self.separators
                .extend(input.char_indices().filter(|(_, c)| *c == sep).map(|(idx, _)| idx));
        }
        self.separated = true;
    }

    fn separator_len(&self) -> usize {
        self.pattern.separator().map_or(0, char::len_utf8)
    }
}

/// Iterator returned by [`WildcardMatcher::segments`].
#[derive(Debug, Clone)]
pub struct Segments<'m> {
    matcher: &'m WildcardMatcher<'m>,
    front: usize,
    back: usize,
}

impl<'m> Iterator for Segments<'m> {
    type Item = &'m str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let segment = self.matcher.segment(self.front);
        self.front += 1;
        segment
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Segments<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.matcher.segment(self.back)
    }
}

impl ExactSizeIterator for Segments<'_> {}

impl FusedIterator for Segments<'_> {}
