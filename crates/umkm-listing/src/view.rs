use std::sync::Arc;

use serde::Serialize;
use umkm_core::BusinessRecord;

use crate::error::ListingError;
use crate::facet::{facet_options, facet_passes, FacetName};
use crate::search::matches_query;
use crate::sort::{sort_records, SortSpec};
use crate::state::FilterState;

/// Records that pass every active filter stage, sorted per `state.sort()`.
///
/// Stages run in order: facet selections, rating threshold, free-text query.
/// Without a sort spec the result keeps the collection's insertion order.
#[must_use]
pub fn filter_records<'a>(records: &'a [BusinessRecord], state: &FilterState) -> Vec<&'a BusinessRecord> {
    let mut rows: Vec<&BusinessRecord> = records
        .iter()
        .filter(|record| {
            FacetName::ALL
                .iter()
                .all(|&facet| facet_passes(facet, state.selected(facet), record))
        })
        .filter(|record| record.ratings.average >= state.min_rating())
        .filter(|record| matches_query(record, state.query()))
        .collect();

    if let Some(spec) = state.sort() {
        sort_records(&mut rows, &spec);
    }
    rows
}

/// One rendered page plus the counts a pagination footer needs.
#[derive(Debug, Clone, Serialize)]
pub struct PageView<'a> {
    pub rows: Vec<&'a BusinessRecord>,
    pub page_index: usize,
    pub page_size: usize,
    /// Number of records that passed all filters.
    pub filtered_count: usize,
    /// Size of the full collection.
    pub total_count: usize,
    pub page_count: usize,
}

impl PageView<'_> {
    #[must_use]
    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    #[must_use]
    pub fn can_next_page(&self) -> bool {
        self.page_index.saturating_add(1) < self.page_count
    }
}

fn paginate<'a>(
    filtered: Vec<&'a BusinessRecord>,
    total_count: usize,
    state: &FilterState,
) -> PageView<'a> {
    let page_size = state.page_size().get();
    let filtered_count = filtered.len();
    let start = state.page_index().saturating_mul(page_size);
    let rows = filtered.into_iter().skip(start).take(page_size).collect();

    PageView {
        rows,
        page_index: state.page_index(),
        page_size,
        filtered_count,
        total_count,
        page_count: filtered_count.div_ceil(page_size),
    }
}

/// Owns the record collection and the current [`FilterState`] snapshot.
///
/// Setters replace the snapshot; reads derive from it without side effects.
#[derive(Debug, Clone)]
pub struct ListingViewController {
    records: Arc<[BusinessRecord]>,
    state: FilterState,
}

impl ListingViewController {
    #[must_use]
    pub fn new(records: impl Into<Arc<[BusinessRecord]>>) -> Self {
        Self::with_state(records, FilterState::default())
    }

    #[must_use]
    pub fn with_state(records: impl Into<Arc<[BusinessRecord]>>, state: FilterState) -> Self {
        let records = records.into();
        tracing::debug!(records = records.len(), "listing controller created");
        Self { records, state }
    }

    #[must_use]
    pub fn records(&self) -> &[BusinessRecord] {
        &self.records
    }

    /// Current snapshot. Cloning it is the way to save and later restore a view.
    #[must_use]
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn set_free_text_query(&mut self, query: &str) {
        self.state = self.state.with_query(query);
        tracing::debug!(query, "free-text query updated");
    }

    pub fn toggle_facet_value(&mut self, facet: FacetName, value: &str) {
        self.state = self.state.with_toggled(facet, value);
        tracing::debug!(
            facet = %facet,
            value,
            selected = self.state.selected(facet).contains(value),
            "facet value toggled"
        );
    }

    pub fn clear_facet(&mut self, facet: FacetName) {
        self.state = self.state.with_cleared_facet(facet);
    }

    /// Set the rating threshold. Values below zero clamp to zero.
    pub fn set_min_rating(&mut self, value: f64) {
        if value.is_nan() || value < 0.0 {
            tracing::warn!(value, "minimum rating below zero, clamping to 0");
        }
        self.state = self.state.with_min_rating(value);
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        self.state = self.state.with_sort(sort);
    }

    /// Jump to a page. Out-of-range indices are accepted and yield an empty page.
    pub fn set_page_index(&mut self, page_index: usize) {
        self.state = self.state.with_page_index(page_index);
    }

    /// Change the page size and return to the first page.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::InvalidPageSize`] for zero; the state is left unchanged.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ListingError> {
        self.state = self.state.with_page_size(page_size)?;
        Ok(())
    }

    /// Advance one page if there is a next page. Returns whether it moved.
    pub fn next_page(&mut self) -> bool {
        if !self.can_next_page() {
            return false;
        }
        self.state = self.state.with_page_index(self.state.page_index() + 1);
        true
    }

    /// Go back one page if not on the first. Returns whether it moved.
    pub fn previous_page(&mut self) -> bool {
        if !self.can_previous_page() {
            return false;
        }
        self.state = self.state.with_page_index(self.state.page_index() - 1);
        true
    }

    /// Drop every filter, the sort and the page position; page size is kept.
    pub fn reset(&mut self) {
        self.state = FilterState::new(self.state.page_size());
    }

    #[must_use]
    pub fn filtered(&self) -> Vec<&BusinessRecord> {
        filter_records(&self.records, &self.state)
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    /// Number of pages for the current filtered set; zero when it is empty.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.filtered_count().div_ceil(self.state.page_size().get())
    }

    #[must_use]
    pub fn can_previous_page(&self) -> bool {
        self.state.page_index() > 0
    }

    #[must_use]
    pub fn can_next_page(&self) -> bool {
        self.state.page_index().saturating_add(1) < self.page_count()
    }

    #[must_use]
    pub fn page(&self) -> PageView<'_> {
        paginate(self.filtered(), self.records.len(), &self.state)
    }

    #[must_use]
    pub fn visible_page(&self) -> Vec<&BusinessRecord> {
        self.page().rows
    }

    /// Every distinct value of `facet` in the full collection, sorted. Values
    /// that the current filters hide are still listed.
    #[must_use]
    pub fn facet_options(&self, facet: FacetName) -> Vec<String> {
        facet_options(&self.records, facet)
    }
}


#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
