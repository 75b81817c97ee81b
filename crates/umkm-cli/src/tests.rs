use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use super::*;
use umkm_core::{AppConfig, BusinessRecord, Environment};
use umkm_listing::{SortDirection, SortKey};

fn fixture_records() -> Vec<BusinessRecord> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/umkm.yaml");
    umkm_core::load_directory(&path)
        .expect("shipped directory fixture should load")
        .businesses
}

fn test_config() -> AppConfig {
    AppConfig {
        env: Environment::Test,
        data_path: PathBuf::from("./config/umkm.yaml"),
        log_level: "info".to_string(),
        page_size: NonZeroUsize::new(3).unwrap(),
        map_zoom: 16,
    }
}

fn marker(label: &str) -> umkm_map::MarkerViewState {
    umkm_map::MarkerViewState::new(10.0, 20.0, label)
}

fn list_args(extra: &[&str]) -> ListArgs {
    let mut argv = vec!["umkm-cli", "list"];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv).expect("expected valid cli args").command {
        Some(Commands::List(args)) => args,
        other => panic!("expected list command, got {other:?}"),
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["umkm-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn list_defaults() {
    let args = list_args(&[]);
    assert!(args.query.is_none());
    assert!(args.categories.is_empty());
    assert_eq!(args.min_rating, 0.0);
    assert!(args.sort.is_none());
    assert_eq!(args.page, 1);
    assert!(args.page_size.is_none());
    assert!(!args.json);
}

#[test]
fn list_collects_repeated_facet_flags() {
    let args = list_args(&[
        "--category",
        "Makanan",
        "--category",
        "Minuman",
        "--payment",
        "QRIS",
        "--year",
        "2015",
    ]);
    assert_eq!(args.categories, vec!["Makanan", "Minuman"]);
    assert_eq!(args.payment_methods, vec!["QRIS"]);
    assert_eq!(args.founding_years, vec!["2015"]);
}

#[test]
fn list_parses_sort_spec() {
    let args = list_args(&["--sort", "rating:desc"]);
    assert_eq!(
        args.sort,
        Some(SortSpec::new(SortKey::Rating, SortDirection::Desc))
    );
}

#[test]
fn list_rejects_unknown_sort_key() {
    assert!(Cli::try_parse_from(["umkm-cli", "list", "--sort", "price"]).is_err());
}

#[test]
fn list_rejects_page_zero() {
    assert!(Cli::try_parse_from(["umkm-cli", "list", "--page", "0"]).is_err());
}

#[test]
fn facets_parses_alias() {
    let cli = Cli::try_parse_from(["umkm-cli", "facets", "payment"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Facets {
            facet: FacetName::PaymentMethod
        })
    ));
}

#[test]
fn facets_rejects_unknown_facet() {
    assert!(Cli::try_parse_from(["umkm-cli", "facets", "color"]).is_err());
}

#[test]
fn show_requires_numeric_id() {
    assert!(Cli::try_parse_from(["umkm-cli", "show", "abc"]).is_err());
    let cli = Cli::try_parse_from(["umkm-cli", "show", "2"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Show { id: 2 })));
}

#[test]
fn controller_uses_config_page_size_and_one_based_page() {
    let controller =
        list::build_controller(&test_config(), fixture_records(), &list_args(&["--page", "3"])).unwrap();
    assert_eq!(controller.state().page_size().get(), 3);
    assert_eq!(controller.state().page_index(), 2);
    assert_eq!(controller.page_count(), 3);
    assert_eq!(controller.visible_page().len(), 1);
}

#[test]
fn controller_rejects_zero_page_size() {
    let result = list::build_controller(
        &test_config(),
        fixture_records(),
        &list_args(&["--page-size", "0"]),
    );
    assert!(result.is_err());
}

#[test]
fn repeated_facet_value_stays_selected() {
    let controller = list::build_controller(
        &test_config(),
        fixture_records(),
        &list_args(&["--category", "Makanan", "--category", "Makanan"]),
    )
    .unwrap();
    let names: Vec<&str> = controller.filtered().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Keripik Tempe Bu Sri", "Sambal Roa Mak Ijah"]);
}

#[test]
fn controller_applies_rating_and_sort() {
    let controller = list::build_controller(
        &test_config(),
        fixture_records(),
        &list_args(&["--min-rating", "4.5", "--sort", "rating:desc"]),
    )
    .unwrap();
    let ratings: Vec<f64> = controller
        .filtered()
        .iter()
        .map(|r| r.ratings.average)
        .collect();
    assert_eq!(ratings, vec![4.9, 4.7, 4.6, 4.5]);
}

#[test]
fn query_finds_business_by_name() {
    let controller = list::build_controller(
        &test_config(),
        fixture_records(),
        &list_args(&["--query", "sambal"]),
    )
    .unwrap();
    assert!(controller
        .filtered()
        .iter()
        .any(|r| r.name == "Sambal Roa Mak Ijah"));
}

#[test]
fn empty_page_renders_no_results_and_footer() {
    let controller = list::build_controller(
        &test_config(),
        fixture_records(),
        &list_args(&["--category", "Elektronik"]),
    )
    .unwrap();
    let rendered = list::render_page(&controller.page());
    assert!(rendered.starts_with("No results."));
    assert!(rendered.contains("Page 1 of 1 | 0 of 7 businesses"));
}

#[test]
fn card_shows_logo_placeholder_and_founding_year() {
    let records = fixture_records();
    let sambal = records.iter().find(|r| r.id == 4).unwrap();
    let card = list::render_card(sambal);
    assert!(card.starts_with("[No Image] Sambal Roa Mak Ijah"));
    assert!(!card.contains("Est."));
    assert!(card.contains("/umkm/4"));

    let keripik = records.iter().find(|r| r.id == 1).unwrap();
    let card = list::render_card(keripik);
    assert!(card.starts_with("[https://images.example.org/umkm/keripik-tempe.png]"));
    assert!(card.contains("Est. 2015 | Sri Wahyuni"));
}

#[test]
fn facet_chips_list_every_option() {
    let chips = list::render_facet_chips(
        FacetName::Category,
        &["Kerajinan".to_string(), "Makanan".to_string()],
    );
    assert_eq!(chips, "category:\n  [ ] Kerajinan\n  [ ] Makanan\n");
}

#[test]
fn detail_lists_payment_and_delivery() {
    let records = fixture_records();
    let detail = show::render_detail(records.iter().find(|r| r.id == 4).unwrap());
    assert!(detail.starts_with("Sambal Roa Mak Ijah (/umkm/4)"));
    assert!(detail.contains("Payment:  QRIS, E-Wallet"));
    assert!(detail.contains("Delivery: Ekspedisi, Ojek Online"));
}

#[test]
fn map_preview_includes_popup_label() {
    let preview = show::preview_map(16, marker("Toko A")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&preview).unwrap();
    assert_eq!(json["map"]["mount_point"], show::MAP_MOUNT_POINT);
    assert_eq!(json["map"]["zoom"], 16);
    assert_eq!(json["popup"]["text"], "Toko A");
    assert_eq!(json["popup"]["overlay"]["positioning"], "bottom-center");
}
