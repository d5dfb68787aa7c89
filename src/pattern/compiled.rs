use std::fmt;
use std::hash::{Hash, Hasher};

use super::{PatternFeatures, TokenKind};

/// An immutable, compiled wildcard pattern.
///
/// `tokens` and `kinds` are parallel buffers of equal length; the last slot is
/// always [`TokenKind::EndOfPattern`]. Instances are never mutated after
/// compilation and can be shared freely across threads.
///
/// Equality and hashing only consider the source text and the separator, so
/// two compilations of the same pattern are interchangeable.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    text: Box<str>,
    separator: Option<char>,
    tokens: Box<[char]>,
    kinds: Box<[TokenKind]>,
    features: PatternFeatures,
    weight: f32,
    ahead: Box<[Ahead]>,
}

/// What lies at or after one token position, precomputed so that a walk never
/// rescans the token buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ahead {
    /// End of the literal run starting here; the position itself when the
    /// token is not a literal.
    pub(crate) run_end: usize,
    /// First literal at or after this position, or the end marker.
    pub(crate) next_literal: usize,
    /// Separator tokens at or after this position.
    pub(crate) separators: usize,
    /// Every token from here on may be left unmatched.
    pub(crate) nullable: bool,
}

fn lookahead(kinds: &[TokenKind]) -> Box<[Ahead]> {
    let end = kinds.len() - 1;
    let mut ahead = vec![
        Ahead {
            run_end: end,
            next_literal: end,
            separators: 0,
            nullable: true,
        };
        kinds.len()
    ];

    for idx in (0..end).rev() {
        let next = ahead[idx + 1];
        let kind = kinds[idx];
        ahead[idx] = Ahead {
            run_end: if kind == TokenKind::Literal { next.run_end } else { idx },
            next_literal: if kind == TokenKind::Literal { idx } else { next.next_literal },
            separators: next.separators + usize::from(kind == TokenKind::Separator),
            nullable: next.nullable && kind.is_nullable(),
        };
    }

    ahead.into_boxed_slice()
}

impl WildcardPattern {
    pub(crate) fn from_parts(
        text: &str,
        separator: Option<char>,
        tokens: Box<[char]>,
        kinds: Box<[TokenKind]>,
        features: PatternFeatures,
    ) -> Self {
        debug_assert_eq!(tokens.len(), kinds.len());
        debug_assert_eq!(kinds.last(), Some(&TokenKind::EndOfPattern));

        let weight: f32 = kinds
            .iter()
            .take_while(|kind| **kind != TokenKind::EndOfPattern)
            .enumerate()
            .map(|(idx, kind)| (idx + 1) as f32 * f32::from(kind.weight_code()) / 10.0)
            .sum();
        let ahead = lookahead(&kinds);

        Self {
            text: text.into(),
            separator,
            tokens,
            kinds,
            features,
            weight,
            ahead,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn separator(&self) -> Option<char> {
        self.separator
    }

    /// Pattern characters after escape resolution and compaction.
    pub fn tokens(&self) -> &[char] {
        &self.tokens
    }

    pub fn kinds(&self) -> &[TokenKind] {
        &self.kinds
    }

    pub(crate) fn ahead(&self) -> &[Ahead] {
        &self.ahead
    }

    pub fn features(&self) -> PatternFeatures {
        self.features
    }

    /// Specificity score; later and stricter tokens weigh more.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Number of live tokens, not counting the end marker.
    pub fn len(&self) -> usize {
        self.kinds.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the pattern contains no wildcard token at all.
    pub fn is_literal(&self) -> bool {
        !self.features.has_wildcards()
    }

    /// See [`crate::matcher::matches`].
    #[inline]
    pub fn matches(&self, input: &str) -> bool {
        crate::matcher::matches(self, input)
    }

    /// See [`crate::matcher::mask`].
    #[inline]
    pub fn mask(&self, input: &str) -> Option<String> {
        crate::matcher::mask(self, input)
    }
}

impl PartialEq for WildcardPattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.separator == other.separator
    }
}

impl Eq for WildcardPattern {}

impl Hash for WildcardPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
        self.separator.hash(state);
    }
}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
