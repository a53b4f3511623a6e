//! Keyword classification: decide which directory field a keyword searches.
//!
//! Asset tags look like `42`, `IT`, or `IT4201` (two word characters then
//! digits). Anything else is treated as a fragment of the free-text
//! description, which usually carries the owner's name and job title.

use std::sync::LazyLock;

use regex::Regex;

/// Full-match pattern for keywords that look like machine names.
///
/// `\w` and `\d` are ASCII-only here so that accented letters in a person's
/// name do not turn a description search into a name search.
#[allow(clippy::expect_used)]
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)^(?:\d+|\w\w\d+|\w\w)$").expect("machine-name pattern compiles")
});

/// Which directory field a search filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Name,
    Description,
}

impl QueryMode {
    /// The directory attribute name used in the search filter.
    pub const fn field(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
        }
    }
}

/// Classify a raw keyword. Never fails.
pub fn classify(keyword: &str) -> QueryMode {
    if NAME_RE.is_match(keyword) {
        QueryMode::Name
    } else {
        QueryMode::Description
    }
}
