use super::test_support::record;
use super::*;
use crate::sort::{SortDirection, SortKey};

fn ids(rows: &[&BusinessRecord]) -> Vec<u32> {
    rows.iter().map(|r| r.id).collect()
}

fn numbered(count: u32) -> Vec<BusinessRecord> {
    (1..=count)
        .map(|id| record(id, &format!("Toko {id}"), "Makanan"))
        .collect()
}

// -----------------------------------------------------------------------
// facet stage
// -----------------------------------------------------------------------

#[test]
fn selecting_category_keeps_matching_records_in_original_order() {
    let records = vec![
        record(1, "Keripik", "Food"),
        record(2, "Sambal", "Food"),
        record(3, "Batik", "Craft"),
    ];
    let mut controller = ListingViewController::new(records);
    controller.toggle_facet_value(FacetName::Category, "Food");
    assert_eq!(ids(&controller.visible_page()), vec![1, 2]);
}

#[test]
fn empty_selections_show_everything() {
    let controller = ListingViewController::new(numbered(4));
    assert_eq!(controller.filtered_count(), 4);
}

#[test]
fn facets_combine_with_and_semantics() {
    let mut a = record(1, "A", "Makanan");
    a.payment_methods = vec!["QRIS".to_owned()];
    let mut b = record(2, "B", "Makanan");
    b.payment_methods = vec!["Tunai".to_owned()];
    let mut c = record(3, "C", "Minuman");
    c.payment_methods = vec!["QRIS".to_owned()];

    let mut controller = ListingViewController::new(vec![a, b, c]);
    controller.toggle_facet_value(FacetName::Category, "Makanan");
    controller.toggle_facet_value(FacetName::PaymentMethod, "QRIS");
    assert_eq!(ids(&controller.visible_page()), vec![1]);
}

#[test]
fn multi_valued_selection_matches_any_value() {
    let mut a = record(1, "A", "Makanan");
    a.delivery_methods = vec!["Ekspedisi".to_owned(), "Ojek Online".to_owned()];
    let mut b = record(2, "B", "Makanan");
    b.delivery_methods = vec!["Ambil Sendiri".to_owned()];
    let mut c = record(3, "C", "Makanan");
    c.delivery_methods = vec![];

    let mut controller = ListingViewController::new(vec![a, b, c]);
    controller.toggle_facet_value(FacetName::DeliveryMethod, "Ojek Online");
    controller.toggle_facet_value(FacetName::DeliveryMethod, "Ambil Sendiri");
    assert_eq!(ids(&controller.visible_page()), vec![1, 2]);
}

#[test]
fn toggling_twice_restores_the_visible_set() {
    let mut controller = ListingViewController::new(vec![
        record(1, "A", "Makanan"),
        record(2, "B", "Minuman"),
    ]);
    let before = ids(&controller.visible_page());
    controller.toggle_facet_value(FacetName::Category, "Minuman");
    assert_eq!(ids(&controller.visible_page()), vec![2]);
    controller.toggle_facet_value(FacetName::Category, "Minuman");
    assert_eq!(ids(&controller.visible_page()), before);
}

#[test]
fn clear_facet_removes_restriction() {
    let mut controller = ListingViewController::new(vec![
        record(1, "A", "Makanan"),
        record(2, "B", "Minuman"),
    ]);
    controller.toggle_facet_value(FacetName::Category, "Minuman");
    controller.clear_facet(FacetName::Category);
    assert_eq!(controller.filtered_count(), 2);
}

// -----------------------------------------------------------------------
// rating stage
// -----------------------------------------------------------------------

#[test]
fn min_rating_is_inclusive() {
    let mut records = numbered(3);
    records[0].ratings.average = 4.0;
    records[1].ratings.average = 4.5;
    records[2].ratings.average = 5.0;

    let mut controller = ListingViewController::new(records);
    controller.set_min_rating(4.5);
    assert_eq!(ids(&controller.visible_page()), vec![2, 3]);
}

#[test]
fn negative_min_rating_behaves_like_zero() {
    let mut records = numbered(2);
    records[0].ratings.average = 0.0;
    let mut controller = ListingViewController::new(records);
    controller.set_min_rating(-1.0);
    assert!(controller.state().min_rating().abs() < f64::EPSILON);
    assert_eq!(controller.filtered_count(), 2);
}

// -----------------------------------------------------------------------
// free-text stage
// -----------------------------------------------------------------------

#[test]
fn empty_query_equals_no_query() {
    let mut controller = ListingViewController::new(vec![
        record(1, "Kopi Tubruk", "Minuman"),
        record(2, "Batik Tulis", "Kerajinan"),
    ]);
    controller.toggle_facet_value(FacetName::Category, "Minuman");
    let without = ids(&controller.filtered());
    controller.set_free_text_query("");
    assert_eq!(ids(&controller.filtered()), without);
}

#[test]
fn fuzzy_query_tolerates_gaps() {
    let mut controller = ListingViewController::new(vec![
        record(1, "Kopi Tubruk", "Minuman"),
        record(2, "Batik Tulis", "Kerajinan"),
    ]);
    controller.set_free_text_query("kp tbrk");
    assert_eq!(ids(&controller.visible_page()), vec![1]);
}

#[test]
fn query_matches_category_case_insensitively() {
    let mut controller = ListingViewController::new(vec![
        record(1, "Kopi Tubruk", "Minuman"),
        record(2, "Batik Tulis", "Kerajinan"),
    ]);
    controller.set_free_text_query("KERAJ");
    assert_eq!(ids(&controller.visible_page()), vec![2]);
}

#[test]
fn query_resets_page_index() {
    let mut controller = ListingViewController::new(numbered(30));
    controller.set_page_index(2);
    controller.set_free_text_query("toko");
    assert_eq!(controller.state().page_index(), 0);
}

#[test]
fn no_match_yields_empty_page_without_error() {
    let mut controller = ListingViewController::new(numbered(3));
    controller.set_free_text_query("xyz");
    let page = controller.page();
    assert!(page.rows.is_empty());
    assert_eq!(page.filtered_count, 0);
    assert_eq!(page.page_count, 0);
    assert!(!page.can_next_page());
}

// -----------------------------------------------------------------------
// sorting
// -----------------------------------------------------------------------

#[test]
fn sort_applies_after_filtering_and_is_stable() {
    let mut records = numbered(5);
    for (i, r) in records.iter_mut().enumerate() {
        r.ratings.average = if i % 2 == 0 { 4.0 } else { 5.0 };
    }
    let mut controller = ListingViewController::new(records);
    controller.set_sort(Some(SortSpec::new(SortKey::Rating, SortDirection::Desc)));
    assert_eq!(ids(&controller.visible_page()), vec![2, 4, 1, 3, 5]);

    controller.set_sort(None);
    assert_eq!(ids(&controller.visible_page()), vec![1, 2, 3, 4, 5]);
}

// -----------------------------------------------------------------------
// pagination
// -----------------------------------------------------------------------

#[test]
fn last_page_holds_the_remainder() {
    let mut controller = ListingViewController::new(numbered(5));
    controller.set_page_size(2).unwrap();
    controller.set_page_index(2);
    assert_eq!(ids(&controller.visible_page()), vec![5]);
}

#[test]
fn page_past_the_end_is_empty() {
    let mut controller = ListingViewController::new(numbered(5));
    controller.set_page_size(2).unwrap();
    controller.set_page_index(5);
    assert!(controller.visible_page().is_empty());
}

#[test]
fn largest_page_index_is_accepted_without_overflow() {
    let mut controller = ListingViewController::new(numbered(5));
    controller.set_page_index(usize::MAX);
    assert!(controller.visible_page().is_empty());
    assert!(!controller.can_next_page());
    assert!(!controller.next_page());
    assert_eq!(controller.state().page_index(), usize::MAX);

    let page = controller.page();
    assert!(!page.can_next_page());
    assert!(page.can_previous_page());

    assert!(controller.previous_page());
    assert_eq!(controller.state().page_index(), usize::MAX - 1);
}

#[test]
fn page_never_exceeds_page_size() {
    let mut controller = ListingViewController::new(numbered(23));
    for size in [1, 6, 9, 10, 12, 50] {
        controller.set_page_size(size).unwrap();
        for index in 0..controller.page_count() + 1 {
            controller.set_page_index(index);
            assert!(controller.visible_page().len() <= size);
        }
    }
}

#[test]
fn zero_page_size_is_rejected_and_state_kept() {
    let mut controller = ListingViewController::new(numbered(5));
    controller.set_page_index(1);
    let err = controller.set_page_size(0).unwrap_err();
    assert_eq!(err, ListingError::InvalidPageSize(0));
    assert_eq!(controller.state().page_size().get(), 10);
    assert_eq!(controller.state().page_index(), 1);
}

#[test]
fn set_page_size_returns_to_first_page() {
    let mut controller = ListingViewController::new(numbered(30));
    controller.set_page_index(2);
    controller.set_page_size(6).unwrap();
    assert_eq!(controller.state().page_index(), 0);
    assert_eq!(ids(&controller.visible_page()), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn next_and_previous_stop_at_bounds() {
    let mut controller = ListingViewController::new(numbered(5));
    controller.set_page_size(2).unwrap();
    assert_eq!(controller.page_count(), 3);
    assert!(!controller.previous_page());
    assert!(controller.next_page());
    assert!(controller.next_page());
    assert!(!controller.next_page());
    assert_eq!(controller.state().page_index(), 2);
    assert!(controller.previous_page());
    assert_eq!(controller.state().page_index(), 1);
}

#[test]
fn page_view_reports_counts() {
    let mut controller = ListingViewController::new(numbered(7));
    controller.set_page_size(3).unwrap();
    controller.set_page_index(1);
    let page = controller.page();
    assert_eq!(page.page_index, 1);
    assert_eq!(page.page_size, 3);
    assert_eq!(page.filtered_count, 7);
    assert_eq!(page.total_count, 7);
    assert_eq!(page.page_count, 3);
    assert!(page.can_previous_page());
    assert!(page.can_next_page());
}

#[test]
fn reset_keeps_page_size_only() {
    let mut controller = ListingViewController::new(numbered(7));
    controller.set_page_size(6).unwrap();
    controller.set_free_text_query("toko 1");
    controller.toggle_facet_value(FacetName::Category, "Makanan");
    controller.set_page_index(1);
    controller.reset();
    assert!(controller.state().is_unfiltered());
    assert_eq!(controller.state().page_size().get(), 6);
    assert_eq!(controller.state().page_index(), 0);
}

// -----------------------------------------------------------------------
// facet options
// -----------------------------------------------------------------------

#[test]
fn facet_options_ignore_active_filters() {
    let mut controller = ListingViewController::new(vec![
        record(1, "A", "Minuman"),
        record(2, "B", "Makanan"),
        record(3, "C", "Kerajinan"),
    ]);
    controller.toggle_facet_value(FacetName::Category, "Makanan");
    controller.set_free_text_query("b");
    assert_eq!(
        controller.facet_options(FacetName::Category),
        vec!["Kerajinan", "Makanan", "Minuman"]
    );
}

#[test]
fn year_options_skip_records_without_year() {
    let mut a = record(1, "A", "Makanan");
    a.founding_year = Some(2020);
    let mut b = record(2, "B", "Makanan");
    b.founding_year = None;
    let mut c = record(3, "C", "Makanan");
    c.founding_year = Some(2009);
    let controller = ListingViewController::new(vec![a, b, c]);
    assert_eq!(
        controller.facet_options(FacetName::FoundingYear),
        vec!["2009", "2020"]
    );
}

#[test]
fn page_view_serializes_rows() {
    let controller = ListingViewController::new(numbered(1));
    let json = serde_json::to_value(controller.page()).unwrap();
    assert_eq!(json["rows"][0]["id"], 1);
    assert_eq!(json["filtered_count"], 1);
}
