//! Listing command handlers: card rendering, facet chips and the pagination
//! footer for one page of the directory.

use std::fmt::Write as _;

use umkm_core::{AppConfig, BusinessRecord};
use umkm_listing::{FacetName, FilterState, ListingViewController, PageView};

use crate::ListArgs;

/// Build a controller whose state reflects every `list` flag.
///
/// Repeated values for one facet are selected once.
///
/// # Errors
///
/// Returns an error when `--page-size` is zero.
pub(crate) fn build_controller(
    config: &AppConfig,
    records: Vec<BusinessRecord>,
    args: &ListArgs,
) -> anyhow::Result<ListingViewController> {
    let mut controller =
        ListingViewController::with_state(records, FilterState::new(config.page_size));

    if let Some(page_size) = args.page_size {
        controller.set_page_size(page_size)?;
    }
    for (facet, values) in args.selections() {
        for value in values {
            if !controller.state().selected(facet).contains(value) {
                controller.toggle_facet_value(facet, value);
            }
        }
    }
    if let Some(query) = &args.query {
        controller.set_free_text_query(query);
    }
    controller.set_min_rating(args.min_rating);
    controller.set_sort(args.sort);
    controller.set_page_index(usize::try_from(args.page)?.saturating_sub(1));

    Ok(controller)
}

pub(crate) fn run_list(
    config: &AppConfig,
    records: Vec<BusinessRecord>,
    args: &ListArgs,
) -> anyhow::Result<()> {
    let controller = build_controller(config, records, args)?;
    let page = controller.page();
    tracing::debug!(
        filtered = page.filtered_count,
        page_index = page.page_index,
        page_count = page.page_count,
        "listing page built"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", render_page(&page));
    }
    Ok(())
}

pub(crate) fn run_facets(records: Vec<BusinessRecord>, facet: FacetName) {
    let controller = ListingViewController::new(records);
    print!("{}", render_facet_chips(facet, &controller.facet_options(facet)));
}

/// One card: logo, name, category, description, founding year, owner and the
/// detail link.
pub(crate) fn render_card(record: &BusinessRecord) -> String {
    let mut out = String::new();
    let logo = record.logo_url.as_deref().unwrap_or("No Image");
    let _ = writeln!(out, "[{logo}] {}", record.name);
    let _ = writeln!(out, "    {}", record.category);
    if !record.description.is_empty() {
        let _ = writeln!(out, "    {}", record.description);
    }
    match record.founding_year {
        Some(year) => {
            let _ = writeln!(out, "    Est. {year} | {}", record.owner_name);
        }
        None => {
            let _ = writeln!(out, "    {}", record.owner_name);
        }
    }
    let _ = writeln!(
        out,
        "    {:.1} ({} reviews) -> {}",
        record.ratings.average,
        record.ratings.review_count,
        record.detail_path()
    );
    out
}

/// The cards of one page followed by the pagination footer. An empty page
/// renders the "No results." state instead of cards.
pub(crate) fn render_page(page: &PageView<'_>) -> String {
    let mut out = String::new();
    if page.rows.is_empty() {
        out.push_str("No results.\n");
    }
    for record in &page.rows {
        out.push_str(&render_card(record));
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "Page {} of {} | {} of {} businesses",
        page.page_index + 1,
        page.page_count.max(1),
        page.filtered_count,
        page.total_count
    );
    out
}

pub(crate) fn render_facet_chips(facet: FacetName, options: &[String]) -> String {
    let mut out = format!("{facet}:\n");
    for option in options {
        let _ = writeln!(out, "  [ ] {option}");
    }
    out
}
