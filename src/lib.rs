//! Separator-aware wildcard patterns.
//!
//! A pattern is compiled once with [`compile`] and then evaluated any number
//! of times, from any thread, with [`matches`] or [`mask`]:
//!
//! | token | meaning |
//! |-------|---------|
//! | `*`   | any run of characters inside one segment |
//! | `**`  | any run of characters across segments |
//! | `?`   | exactly one character other than the separator |
//! | `+`   | exactly one character other than the separator |
//! | `\`   | makes the next character literal |
//!
//! ```
//! use wildcard_mask_rs::{compile, mask, matches};
//!
//! let pattern = compile("/static/**", Some('/'));
//! assert!(matches(&pattern, "/static/a/b/c.jpg"));
//! assert_eq!(mask(&pattern, "/static/a/b/c.jpg").as_deref(), Some("a/b/c.jpg"));
//!
//! let single = compile("/static/*", Some('/'));
//! assert!(!single.matches("/static/a/test.jpg"));
//! ```

pub mod cache;
pub mod composite;
pub mod matcher;
pub mod pattern;

pub use cache::PatternCache;
pub use composite::{CompositePattern, PatternSetOptions, PatternSetOptionsError};
pub use matcher::{WildcardMatcher, mask, matches};
pub use pattern::{PatternFeatures, TokenKind, WildcardPattern, compile, has_wildcards};
