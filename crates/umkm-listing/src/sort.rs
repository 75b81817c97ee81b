use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use umkm_core::BusinessRecord;

use crate::error::ListingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    OwnerName,
    Category,
    BusinessType,
    FoundingYear,
    Rating,
    ReviewCount,
}

impl FromStr for SortKey {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "owner" | "owner_name" => Ok(SortKey::OwnerName),
            "category" => Ok(SortKey::Category),
            "type" | "business_type" => Ok(SortKey::BusinessType),
            "year" | "founding_year" => Ok(SortKey::FoundingYear),
            "rating" => Ok(SortKey::Rating),
            "reviews" | "review_count" => Ok(SortKey::ReviewCount),
            _ => Err(ListingError::UnknownSortKey(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Compare two records under this spec.
    ///
    /// Text compares case-insensitively. Records without a founding year sort
    /// after every dated record in both directions.
    #[must_use]
    pub fn compare(&self, a: &BusinessRecord, b: &BusinessRecord) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => compare_text(&a.name, &b.name),
            SortKey::OwnerName => compare_text(&a.owner_name, &b.owner_name),
            SortKey::Category => compare_text(&a.category, &b.category),
            SortKey::BusinessType => compare_text(&a.business_type, &b.business_type),
            SortKey::FoundingYear => match (a.founding_year, b.founding_year) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortKey::Rating => a.ratings.average.total_cmp(&b.ratings.average),
            SortKey::ReviewCount => a.ratings.review_count.cmp(&b.ratings.review_count),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl FromStr for SortSpec {
    type Err = ListingError;

    /// Parses `key` or `key:asc` / `key:desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.split_once(':') {
            Some((key, dir)) => {
                let direction = match dir.trim().to_ascii_lowercase().as_str() {
                    "asc" => SortDirection::Asc,
                    "desc" => SortDirection::Desc,
                    other => {
                        return Err(ListingError::InvalidSortSpec {
                            spec: s.to_owned(),
                            reason: format!("direction must be asc or desc, got \"{other}\""),
                        })
                    }
                };
                (key, direction)
            }
            None => (s, SortDirection::Asc),
        };
        Ok(SortSpec::new(key.parse()?, direction))
    }
}

/// Stable sort in place. Equal keys keep their incoming order in either
/// direction.
pub fn sort_records(records: &mut [&BusinessRecord], spec: &SortSpec) {
    records.sort_by(|a, b| spec.compare(a, b));
}
