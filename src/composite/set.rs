use hashbrown::HashSet;

use super::options::{PatternSetOptions, PatternSetOptionsError};
use crate::pattern::{WildcardPattern, compile};

/// Include/exclude pair of compiled patterns sharing one separator.
///
/// A candidate is accepted when it matches any include pattern (or the include
/// set is empty) and matches no exclude pattern. Built once, read-only
/// afterwards, and safe to share across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositePattern {
    include: Box<[WildcardPattern]>,
    exclude: Box<[WildcardPattern]>,
}

impl CompositePattern {
    /// Compiles both lists with `separator`. Duplicate pattern strings within
    /// one list are compiled once.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S], separator: Option<char>) -> Self {
        Self {
            include: compile_unique(include, separator),
            exclude: compile_unique(exclude, separator),
        }
    }

    pub fn from_options(options: &PatternSetOptions) -> Result<Self, PatternSetOptionsError> {
        options.validate()?;
        Ok(Self::new(
            options.include.as_slice(),
            options.exclude.as_slice(),
            options.separator,
        ))
    }

    #[tracing::instrument(level = "trace", skip(self), fields(include = self.include.len(), exclude = self.exclude.len()))]
    pub fn accepts(&self, candidate: &str) -> bool {
        let included =
            self.include.is_empty() || self.include.iter().any(|p| p.matches(candidate));

        included && !self.exclude.iter().any(|p| p.matches(candidate))
    }

    pub fn include(&self) -> &[WildcardPattern] {
        &self.include
    }

    pub fn exclude(&self) -> &[WildcardPattern] {
        &self.exclude
    }

    /// True when no pattern is configured; such a set accepts everything.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

fn compile_unique<S: AsRef<str>>(patterns: &[S], separator: Option<char>) -> Box<[WildcardPattern]> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(patterns.len());
    patterns
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| seen.insert(*p))
        .map(|p| compile(p, separator))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_patterns_compile_once() {
        let set = CompositePattern::new(&["/a/*", "/a/*", "/b/*"], &[], Some('/'));
        assert_eq!(set.include().len(), 2);
        assert!(set.exclude().is_empty());
    }

    #[test]
    fn empty_set_accepts_everything() {
        let set = CompositePattern::new::<&str>(&[], &[], Some('/'));
        assert!(set.is_empty());
        assert!(set.accepts(""));
        assert!(set.accepts("/anything/at/all"));
    }
}
