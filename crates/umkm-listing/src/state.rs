use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use crate::error::ListingError;
use crate::facet::FacetName;
use crate::sort::SortSpec;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Page sizes offered by the "rows per page" control.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [6, 9, 12, 15, 18];

/// Immutable snapshot of everything the user has chosen in the listing UI.
///
/// Transitions take `&self` and return the next snapshot; a snapshot never
/// changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    selections: [BTreeSet<String>; FacetName::COUNT],
    min_rating: f64,
    query: String,
    sort: Option<SortSpec>,
    page_index: usize,
    page_size: NonZeroUsize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl FilterState {
    /// Fresh session state: no selections, no query, insertion order, page 0.
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            selections: Default::default(),
            min_rating: 0.0,
            query: String::new(),
            sort: None,
            page_index: 0,
            page_size,
        }
    }

    #[must_use]
    pub fn selected(&self, facet: FacetName) -> &BTreeSet<String> {
        &self.selections[facet.index()]
    }

    #[must_use]
    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    #[must_use]
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// True when no facet, rating or text restriction is active.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.selections.iter().all(BTreeSet::is_empty)
            && self.min_rating <= 0.0
            && self.query.trim().is_empty()
    }

    #[must_use]
    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page_index: 0,
            ..self.clone()
        }
    }

    /// Add `value` to the facet selection if absent, remove it if present.
    #[must_use]
    pub fn with_toggled(&self, facet: FacetName, value: &str) -> Self {
        let mut next = Self {
            page_index: 0,
            ..self.clone()
        };
        let selected = &mut next.selections[facet.index()];
        if !selected.remove(value) {
            selected.insert(value.to_owned());
        }
        next
    }

    #[must_use]
    pub fn with_cleared_facet(&self, facet: FacetName) -> Self {
        let mut next = Self {
            page_index: 0,
            ..self.clone()
        };
        next.selections[facet.index()].clear();
        next
    }

    /// Negative and NaN thresholds clamp to 0.
    #[must_use]
    pub fn with_min_rating(&self, value: f64) -> Self {
        let min_rating = if value.is_nan() { 0.0 } else { value.max(0.0) };
        Self {
            min_rating,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_sort(&self, sort: Option<SortSpec>) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_page_index(&self, page_index: usize) -> Self {
        Self {
            page_index,
            ..self.clone()
        }
    }

    /// Change the page size and return to the first page.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::InvalidPageSize`] when `page_size` is zero.
    pub fn with_page_size(&self, page_size: usize) -> Result<Self, ListingError> {
        let page_size =
            NonZeroUsize::new(page_size).ok_or(ListingError::InvalidPageSize(page_size))?;
        Ok(Self {
            page_size,
            page_index: 0,
            ..self.clone()
        })
    }
}
