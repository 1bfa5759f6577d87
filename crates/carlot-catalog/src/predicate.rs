//! Composable catalog query conditions.
//!
//! A [`Predicate`] is what the filter compiler and the suggestion engine hand
//! to a [`CatalogStore`](crate::CatalogStore). Stores either evaluate it
//! directly ([`Predicate::matches`]) or translate it into their own query
//! language.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::entry::CatalogEntry;

/// A catalog attribute, named by its wire/filter name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum Field {
    #[strum(serialize = "price")]
    Price,
    #[strum(serialize = "color")]
    Color,
    #[strum(serialize = "fuel_type")]
    FuelType,
    #[strum(serialize = "car_type")]
    BodyType,
    #[strum(serialize = "tier_type")]
    TrimLevel,
    #[strum(serialize = "model")]
    Model,
    #[strum(serialize = "seats")]
    SeatCount,
    #[strum(serialize = "brand")]
    Brand,
    #[strum(serialize = "Made")]
    CountryOfOrigin,
    #[strum(serialize = "engine_model")]
    Transmission,
    #[strum(serialize = "airbags")]
    AirbagCount,
    #[strum(serialize = "mileage")]
    Mileage,
    #[strum(serialize = "image")]
    Image,
}

impl Field {
    /// Name used on the wire and as a filter key.
    pub fn wire_name(self) -> &'static str {
        self.into()
    }

    /// SQL column backing this attribute.
    pub fn column(self) -> &'static str {
        match self {
            Self::CountryOfOrigin => "made",
            other => other.wire_name(),
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Self::Price | Self::SeatCount | Self::AirbagCount)
    }
}

/// A literal compared against an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Int(i64),
}

/// Query condition over [`CatalogEntry`] rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Matches every row.
    All,
    /// Matches no row.
    Never,
    /// Exact equality. A value of the wrong type never matches.
    Eq { field: Field, value: Value },
    /// Inclusive numeric range; `max: None` is unbounded above.
    Range { field: Field, min: i64, max: Option<i64> },
    /// Case-insensitive substring match.
    Contains { field: Field, needle: String },
    /// Equality on an attribute the catalog does not have. Kept in the
    /// predicate so it can be logged, but it matches no row.
    Unmapped { name: String, value: String },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Conjunction that collapses the trivial cases: no parts is [`Predicate::All`],
    /// one part is that part.
    pub fn and(mut parts: Vec<Predicate>) -> Self {
        parts.retain(|p| *p != Predicate::All);
        match parts.len() {
            0 => Predicate::All,
            1 => parts.remove(0),
            _ => Predicate::And(parts),
        }
    }

    /// Disjunction; no parts is [`Predicate::Never`], one part is that part.
    pub fn or(mut parts: Vec<Predicate>) -> Self {
        parts.retain(|p| *p != Predicate::Never);
        match parts.len() {
            0 => Predicate::Never,
            1 => parts.remove(0),
            _ => Predicate::Or(parts),
        }
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Never | Predicate::Unmapped { .. } => false,
            Predicate::Eq { field, value } => match value {
                Value::Text(s) => entry.text(*field) == Some(s.as_str()),
                Value::Int(n) => entry.integer(*field) == Some(*n),
            },
            Predicate::Range { field, min, max } => entry
                .integer(*field)
                .is_some_and(|n| n >= *min && max.is_none_or(|max| n <= max)),
            Predicate::Contains { field, needle } => entry
                .display(*field)
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Predicate::And(parts) => parts.iter().all(|p| p.matches(entry)),
            Predicate::Or(parts) => parts.iter().any(|p| p.matches(entry)),
        }
    }
}
