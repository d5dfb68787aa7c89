use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pattern::{ESCAPE_CHAR, PLUS_CHAR, QUESTION_CHAR, STAR_CHAR};

pub const DEFAULT_SEPARATOR: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternList {
    Include,
    Exclude,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatternSetOptions {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub separator: Option<char>,
}

impl Default for PatternSetOptions {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            separator: Some(DEFAULT_SEPARATOR),
        }
    }
}

impl PatternSetOptions {
    pub fn builder() -> PatternSetOptionsBuilder {
        PatternSetOptionsBuilder::default()
    }

    /// True when neither list holds a pattern.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    pub fn validate(&self) -> Result<(), PatternSetOptionsError> {
        if let Some(separator) = self.separator
            && matches!(separator, STAR_CHAR | QUESTION_CHAR | PLUS_CHAR | ESCAPE_CHAR)
        {
            return Err(PatternSetOptionsError::SeparatorIsMetacharacter { separator });
        }
        for (list, patterns) in [
            (PatternList::Include, &self.include),
            (PatternList::Exclude, &self.exclude),
        ] {
            if let Some(index) = patterns.iter().position(|p| p.is_empty()) {
                return Err(PatternSetOptionsError::EmptyPattern { list, index });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct PatternSetOptionsBuilder {
    options: PatternSetOptions,
}

impl PatternSetOptionsBuilder {
    pub fn include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn separator(mut self, separator: Option<char>) -> Self {
        self.options.separator = separator;
        self
    }

    pub fn build(self) -> Result<PatternSetOptions, PatternSetOptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternSetOptionsError {
    #[error("separator '{separator}' is a wildcard metacharacter")]
    SeparatorIsMetacharacter { separator: char },
    #[error("{list:?} pattern at index {index} is empty")]
    EmptyPattern { list: PatternList, index: usize },
}
