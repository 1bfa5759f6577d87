//! Filter compiler: storefront filter selections to catalog predicates.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;
use crate::predicate::{Field, Predicate, Value};
use crate::price::PriceBand;

/// Filter name → chosen value, as sent in the `/car_tb` query string.
///
/// Absent or blank values impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection(BTreeMap<String, String>);

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Entries whose value is non-blank, values trimmed.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.trim()))
            .filter(|(_, value)| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSelection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// What to do with a filter name that is not a catalog attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFilterPolicy {
    /// Keep it as an equality on a missing attribute, which matches nothing.
    #[default]
    PassThrough,
    /// Fail with [`CatalogError::UnknownFilter`].
    Reject,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FilterCompiler {
    unknown: UnknownFilterPolicy,
}

impl FilterCompiler {
    pub fn new(unknown: UnknownFilterPolicy) -> Self {
        Self { unknown }
    }

    /// Compile `selection` into the conjunction of its per-field constraints.
    ///
    /// `price` maps through the [`PriceBand`] table (unknown labels add no
    /// constraint), `seats` and `airbags` must parse as integers, every other
    /// attribute is matched by exact string equality.
    pub fn compile(&self, selection: &FilterSelection) -> Result<Predicate, CatalogError> {
        let mut parts = Vec::new();

        for (name, value) in selection.active() {
            let Ok(field) = Field::from_str(name) else {
                match self.unknown {
                    UnknownFilterPolicy::PassThrough => {
                        debug!(filter = name, "unknown filter passed through");
                        parts.push(Predicate::Unmapped {
                            name: name.to_owned(),
                            value: value.to_owned(),
                        });
                        continue;
                    }
                    UnknownFilterPolicy::Reject => {
                        return Err(CatalogError::UnknownFilter(name.to_owned()));
                    }
                }
            };

            match field {
                Field::Price => match PriceBand::lookup(value) {
                    Some(band) => parts.push(band.predicate()),
                    None => debug!(label = value, "unrecognized price band ignored"),
                },
                field if field.is_integer() => {
                    let n = value.parse::<i64>().map_err(|_| CatalogError::InvalidFilterValue {
                        field: name.to_owned(),
                        value: value.to_owned(),
                    })?;
                    parts.push(Predicate::Eq { field, value: Value::Int(n) });
                }
                field => parts.push(Predicate::Eq {
                    field,
                    value: Value::Text(value.to_owned()),
                }),
            }
        }

        Ok(Predicate::and(parts))
    }
}

/// Compile with the default (pass-through) policy.
pub fn compile(selection: &FilterSelection) -> Result<Predicate, CatalogError> {
    FilterCompiler::default().compile(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::CatalogEntry;
    use crate::fixtures::sample_catalog;

    fn priced(price: i64) -> CatalogEntry {
        CatalogEntry { price, ..Default::default() }
    }

    #[test]
    fn empty_selection_matches_everything() {
        let selection = FilterSelection::new().with("color", "").with("seats", "   ");
        let predicate = compile(&selection).unwrap();
        assert_eq!(predicate, Predicate::All);
        assert!(sample_catalog().iter().all(|e| predicate.matches(e)));
    }

    #[test]
    fn lakh_band_bounds() {
        let predicate = compile(&FilterSelection::new().with("price", "3L to 10L")).unwrap();
        assert!(predicate.matches(&priced(500_000)));
        assert!(predicate.matches(&priced(300_000)));
        assert!(predicate.matches(&priced(1_000_000)));
        assert!(!predicate.matches(&priced(50_000)));
        assert!(!predicate.matches(&priced(1_500_000)));
    }

    #[test]
    fn above_fifty_lakh_has_no_upper_bound() {
        let predicate = compile(&FilterSelection::new().with("price", "above 50L")).unwrap();
        assert!(predicate.matches(&priced(5_000_000)));
        assert!(predicate.matches(&priced(90_000_000)));
        assert!(!predicate.matches(&priced(4_999_999)));
    }

    #[test]
    fn unknown_price_label_adds_no_constraint() {
        let predicate = compile(&FilterSelection::new().with("price", "cheap")).unwrap();
        assert_eq!(predicate, Predicate::All);
    }

    #[test]
    fn seats_are_parsed_strictly() {
        let err = compile(&FilterSelection::new().with("seats", "5abc")).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidFilterValue { ref field, ref value } if field == "seats" && value == "5abc"
        ));

        let predicate = compile(&FilterSelection::new().with("seats", " 7 ")).unwrap();
        assert_eq!(predicate, Predicate::Eq { field: Field::SeatCount, value: Value::Int(7) });
    }

    #[test]
    fn airbags_are_numeric_too() {
        assert!(compile(&FilterSelection::new().with("airbags", "six")).is_err());
        let predicate = compile(&FilterSelection::new().with("airbags", "6")).unwrap();
        assert_eq!(predicate, Predicate::Eq { field: Field::AirbagCount, value: Value::Int(6) });
    }

    #[test]
    fn fields_are_conjoined() {
        let selection: FilterSelection =
            [("color", "Red"), ("fuel_type", "Petrol"), ("Made", "Japan")].into_iter().collect();
        let predicate = compile(&selection).unwrap();
        let hits: Vec<_> = sample_catalog().into_iter().filter(|e| predicate.matches(e)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].model, "City");
    }

    #[test]
    fn unknown_names_pass_through_and_match_nothing() {
        let selection = FilterSelection::new().with("owner", "me");
        let predicate = compile(&selection).unwrap();
        assert!(matches!(predicate, Predicate::Unmapped { .. }));
        assert!(sample_catalog().iter().all(|e| !predicate.matches(e)));
    }

    #[test]
    fn unknown_names_can_be_rejected() {
        let compiler = FilterCompiler::new(UnknownFilterPolicy::Reject);
        let err = compiler.compile(&FilterSelection::new().with("owner", "me")).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownFilter(name) if name == "owner"));
        // Blank unknown filters are still no-ops.
        assert!(compiler.compile(&FilterSelection::new().with("owner", "")).is_ok());
    }

    #[test]
    fn deserializes_from_query_map() {
        let selection: FilterSelection =
            serde_json::from_str(r#"{"color":"Blue","price":"10L to 20L"}"#).unwrap();
        assert_eq!(selection.get("color"), Some("Blue"));
        assert_eq!(selection.active().count(), 2);
    }
}
