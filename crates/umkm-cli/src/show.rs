//! Detail view for a single business with a headless map preview.

use std::fmt::Write as _;

use umkm_core::{AppConfig, BusinessRecord};
use umkm_map::{HeadlessBackend, MapMarkerWidget, MarkerViewState, Pixel};

pub(crate) const MAP_MOUNT_POINT: &str = "map";

/// # Errors
///
/// Returns an error if no business has `id` or the map cannot be attached.
pub(crate) fn run_show(config: &AppConfig, records: &[BusinessRecord], id: u32) -> anyhow::Result<()> {
    let record = records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| anyhow::anyhow!("business {id} not found"))?;

    print!("{}", render_detail(record));

    let Some(props) = MarkerViewState::for_record(record) else {
        tracing::warn!(id, "business has no location, skipping map preview");
        println!("No map location recorded.");
        return Ok(());
    };
    println!("{}", preview_map(config.map_zoom, props)?);
    Ok(())
}

pub(crate) fn render_detail(record: &BusinessRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", record.name, record.detail_path());
    let _ = writeln!(out, "  Owner:    {}", record.owner_name);
    let _ = writeln!(out, "  Category: {} / {}", record.category, record.business_type);
    if let Some(year) = record.founding_year {
        let _ = writeln!(out, "  Est.:     {year}");
    }
    let _ = writeln!(out, "  Status:   {}", record.status);
    let _ = writeln!(out, "  Address:  {}", record.address);
    let _ = writeln!(
        out,
        "  Rating:   {:.1} ({} reviews)",
        record.ratings.average, record.ratings.review_count
    );
    if !record.payment_methods.is_empty() {
        let _ = writeln!(out, "  Payment:  {}", record.payment_methods.join(", "));
    }
    if !record.delivery_methods.is_empty() {
        let _ = writeln!(out, "  Delivery: {}", record.delivery_methods.join(", "));
    }
    let contact = &record.contact;
    for (label, value) in [
        ("Phone", &contact.phone),
        ("Email", &contact.email),
        ("Instagram", &contact.instagram),
        ("Website", &contact.website),
    ] {
        if let Some(value) = value {
            let _ = writeln!(out, "  {label:<9} {value}");
        }
    }
    out
}

/// Mount the marker map, click the marker once, and return the resulting map
/// and popup as JSON.
///
/// # Errors
///
/// Returns an error if the map cannot be attached or serialized.
pub(crate) fn preview_map(zoom: u8, props: MarkerViewState) -> anyhow::Result<String> {
    let backend = HeadlessBackend::new().with_mount_point(MAP_MOUNT_POINT);
    let mut widget = MapMarkerWidget::new(backend, MAP_MOUNT_POINT).with_zoom(zoom);
    widget.mount(props)?;

    if let Some(anchor) = widget.marker_pixel() {
        widget.click(Pixel {
            x: anchor.x,
            y: anchor.y - 1.0,
        });
    }

    let preview = serde_json::json!({
        "map": widget.spec(),
        "popup": widget.popup(),
    });
    Ok(serde_json::to_string_pretty(&preview)?)
}
