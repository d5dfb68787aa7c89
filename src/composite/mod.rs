mod options;
mod set;

pub use options::{
    DEFAULT_SEPARATOR, PatternList, PatternSetOptions, PatternSetOptionsBuilder,
    PatternSetOptionsError,
};
pub use set::CompositePattern;
