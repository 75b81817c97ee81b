use std::borrow::Cow;
use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use umkm_core::BusinessRecord;

use crate::error::ListingError;

/// The fixed set of multi-select filter facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetName {
    Category,
    BusinessType,
    PaymentMethod,
    DeliveryMethod,
    FoundingYear,
}

impl FacetName {
    pub const COUNT: usize = 5;

    pub const ALL: [FacetName; Self::COUNT] = [
        FacetName::Category,
        FacetName::BusinessType,
        FacetName::PaymentMethod,
        FacetName::DeliveryMethod,
        FacetName::FoundingYear,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FacetName::Category => "category",
            FacetName::BusinessType => "business_type",
            FacetName::PaymentMethod => "payment_method",
            FacetName::DeliveryMethod => "delivery_method",
            FacetName::FoundingYear => "founding_year",
        }
    }

    /// Position of this facet in [`FacetName::ALL`].
    #[must_use]
    pub(crate) fn index(self) -> usize {
        match self {
            FacetName::Category => 0,
            FacetName::BusinessType => 1,
            FacetName::PaymentMethod => 2,
            FacetName::DeliveryMethod => 3,
            FacetName::FoundingYear => 4,
        }
    }

    /// Values the record carries for this facet. Multi-valued facets yield
    /// every value; a record without a founding year yields nothing.
    #[must_use]
    pub fn values_of(self, record: &BusinessRecord) -> Vec<Cow<'_, str>> {
        match self {
            FacetName::Category => vec![Cow::Borrowed(record.category.as_str())],
            FacetName::BusinessType => vec![Cow::Borrowed(record.business_type.as_str())],
            FacetName::PaymentMethod => record
                .payment_methods
                .iter()
                .map(|m| Cow::Borrowed(m.as_str()))
                .collect(),
            FacetName::DeliveryMethod => record
                .delivery_methods
                .iter()
                .map(|m| Cow::Borrowed(m.as_str()))
                .collect(),
            FacetName::FoundingYear => record
                .founding_year
                .map(|year| Cow::Owned(year.to_string()))
                .into_iter()
                .collect(),
        }
    }
}

impl std::fmt::Display for FacetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetName {
    type Err = ListingError;

    /// Accepts the snake_case name plus the short CLI aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "category" => Ok(FacetName::Category),
            "business_type" | "type" => Ok(FacetName::BusinessType),
            "payment_method" | "payment" => Ok(FacetName::PaymentMethod),
            "delivery_method" | "delivery" => Ok(FacetName::DeliveryMethod),
            "founding_year" | "year" => Ok(FacetName::FoundingYear),
            _ => Err(ListingError::UnknownFacet(s.to_owned())),
        }
    }
}

/// Whether `record` survives the facet stage for one facet.
///
/// An empty selection places no restriction. Otherwise at least one of the
/// record's values must be selected.
#[must_use]
pub fn facet_passes(facet: FacetName, selected: &BTreeSet<String>, record: &BusinessRecord) -> bool {
    if selected.is_empty() {
        return true;
    }
    facet
        .values_of(record)
        .iter()
        .any(|value| selected.contains(value.as_ref()))
}

/// Distinct values of `facet` across `records`, sorted and deduplicated.
#[must_use]
pub fn facet_options(records: &[BusinessRecord], facet: FacetName) -> Vec<String> {
    records
        .iter()
        .flat_map(|record| facet.values_of(record))
        .map(Cow::into_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
