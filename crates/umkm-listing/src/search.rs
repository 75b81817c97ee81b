//! Approximate free-text matching for the listing search box.
//!
//! Each candidate field is ranked against the query in tiers, best first:
//!
//! | rank             | condition (after lowercasing both sides)          |
//! |------------------|---------------------------------------------------|
//! | `Exact`          | candidate equals query                            |
//! | `StartsWith`     | candidate starts with query                       |
//! | `WordStartsWith` | some word of the candidate starts with query      |
//! | `Contains`       | query is a substring of candidate                 |
//! | `Acronym`        | query is a substring of the candidate's initials  |
//! | `Subsequence`    | every query char appears in candidate, in order   |
//! | `NoMatch`        | none of the above                                 |
//!
//! A candidate passes when it ranks `Subsequence` or better, so typing a
//! partial or gapped query ("kpi tbr" for "Kopi Tubruk") still finds the row.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use umkm_core::BusinessRecord;

/// Match quality, ordered so that `a > b` means `a` is the better match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    NoMatch,
    Subsequence,
    Acronym,
    Contains,
    WordStartsWith,
    StartsWith,
    Exact,
}

impl Rank {
    /// Minimum rank a field needs for the record to pass.
    pub const THRESHOLD: Rank = Rank::Subsequence;

    #[must_use]
    pub fn passed(self) -> bool {
        self >= Self::THRESHOLD
    }
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '_'
}

/// Rank `candidate` against `query`. Both are lowercased here; callers may
/// pass raw user input.
#[must_use]
pub fn rank_item(candidate: &str, query: &str) -> Rank {
    let candidate = candidate.to_lowercase();
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return Rank::Exact;
    }
    if candidate == query {
        return Rank::Exact;
    }
    if candidate.starts_with(&query) {
        return Rank::StartsWith;
    }
    if candidate
        .split(is_word_separator)
        .any(|word| word.starts_with(&query))
    {
        return Rank::WordStartsWith;
    }
    if candidate.contains(&query) {
        return Rank::Contains;
    }

    let acronym: String = candidate
        .split(is_word_separator)
        .filter_map(|word| word.chars().next())
        .collect();
    if acronym.contains(&query) {
        return Rank::Acronym;
    }

    if SkimMatcherV2::default()
        .fuzzy_match(&candidate, &query)
        .is_some()
    {
        return Rank::Subsequence;
    }
    Rank::NoMatch
}

/// Whether `record` passes the free-text stage.
///
/// Searches name, category, business type and owner name. A blank query
/// always passes.
#[must_use]
pub fn matches_query(record: &BusinessRecord, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    [
        record.name.as_str(),
        record.category.as_str(),
        record.business_type.as_str(),
        record.owner_name.as_str(),
    ]
    .iter()
    .any(|field| rank_item(field, query).passed())
}
