mod compiled;
mod lexer;
mod token;

pub use compiled::WildcardPattern;
pub use lexer::compile;
pub use token::{
    ESCAPE_CHAR, PLUS_CHAR, PatternFeatures, QUESTION_CHAR, STAR_CHAR, TokenKind,
};

use memchr::memchr3;

/// Returns true when `s` contains any of `*`, `?` or `+`.
///
/// This is a raw scan; escapes are not interpreted.
#[inline]
pub fn has_wildcards(s: &str) -> bool {
    memchr3(b'*', b'?', b'+', s.as_bytes()).is_some()
}
