use bitflags::bitflags;

pub const ESCAPE_CHAR: char = '\\';
pub const STAR_CHAR: char = '*';
pub const QUESTION_CHAR: char = '?';
pub const PLUS_CHAR: char = '+';

/// Classification of one compiled pattern position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Literal,
    Star,
    StarStar,
    Question,
    Plus,
    Separator,
    /// Terminates iteration; never consumes input.
    EndOfPattern,
}

impl TokenKind {
    /// Whether the token may be left over once the input is exhausted.
    #[inline]
    pub fn is_nullable(self) -> bool {
        matches!(
            self,
            TokenKind::Star | TokenKind::StarStar | TokenKind::EndOfPattern
        )
    }

    #[inline]
    pub fn is_star(self) -> bool {
        matches!(self, TokenKind::Star | TokenKind::StarStar)
    }

    pub(crate) fn weight_code(self) -> u8 {
        match self {
            TokenKind::Literal => 1,
            TokenKind::Star => 2,
            TokenKind::StarStar => 3,
            TokenKind::Question => 4,
            TokenKind::Plus => 5,
            TokenKind::Separator => 9,
            TokenKind::EndOfPattern => 0,
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PatternFeatures: u8 {
        const STAR = 1 << 0;
        const STAR_STAR = 1 << 1;
        const QUESTION = 1 << 2;
        const PLUS = 1 << 3;
        const SEPARATOR = 1 << 4;
        const ESCAPE = 1 << 5;
    }
}

impl PatternFeatures {
    pub const WILDCARDS: PatternFeatures = PatternFeatures::STAR
        .union(PatternFeatures::STAR_STAR)
        .union(PatternFeatures::QUESTION)
        .union(PatternFeatures::PLUS);

    #[inline]
    pub fn has_wildcards(self) -> bool {
        self.intersects(Self::WILDCARDS)
    }

    pub(crate) fn from_kind(kind: TokenKind) -> PatternFeatures {
        match kind {
            TokenKind::Star => PatternFeatures::STAR,
            TokenKind::StarStar => PatternFeatures::STAR_STAR,
            TokenKind::Question => PatternFeatures::QUESTION,
            TokenKind::Plus => PatternFeatures::PLUS,
            TokenKind::Separator => PatternFeatures::SEPARATOR,
            TokenKind::Literal | TokenKind::EndOfPattern => PatternFeatures::empty(),
        }
    }
}
