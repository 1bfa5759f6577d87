//! The catalog row.

use serde::{Deserialize, Serialize};

use crate::predicate::Field;

/// One car in the catalog.
///
/// Wire names follow the storefront's document schema (`car_type`, `Made`,
/// `engine_model`, ...), so rows written by the ingestion side deserialize
/// unchanged. Missing attributes default to empty / zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CatalogEntry {
    /// Store-assigned row id.
    #[serde(rename = "_id", default)]
    pub id: i64,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(rename = "car_type", default)]
    pub body_type: String,
    #[serde(rename = "tier_type", default)]
    pub trim_level: String,
    #[serde(default)]
    pub model: String,
    #[serde(rename = "seats", default)]
    pub seat_count: i64,
    #[serde(default)]
    pub brand: String,
    #[serde(rename = "Made", default)]
    pub country_of_origin: String,
    /// `"Manual"` or `"Automatic"`.
    #[serde(rename = "engine_model", default)]
    pub transmission: String,
    #[serde(rename = "airbags", default)]
    pub airbag_count: i64,
    #[serde(default)]
    pub mileage: String,
    /// Local file name under the uploads root. Never a URL.
    #[serde(rename = "image", default)]
    pub image_reference: String,
}

impl CatalogEntry {
    /// Text value of a string attribute, `None` for integer attributes.
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Color => &self.color,
            Field::FuelType => &self.fuel_type,
            Field::BodyType => &self.body_type,
            Field::TrimLevel => &self.trim_level,
            Field::Model => &self.model,
            Field::Brand => &self.brand,
            Field::CountryOfOrigin => &self.country_of_origin,
            Field::Transmission => &self.transmission,
            Field::Mileage => &self.mileage,
            Field::Image => &self.image_reference,
            Field::Price | Field::SeatCount | Field::AirbagCount => return None,
        };
        Some(value.as_str())
    }

    /// Value of an integer attribute, `None` for string attributes.
    pub fn integer(&self, field: Field) -> Option<i64> {
        match field {
            Field::Price => Some(self.price),
            Field::SeatCount => Some(self.seat_count),
            Field::AirbagCount => Some(self.airbag_count),
            _ => None,
        }
    }

    /// Attribute rendered as text, whatever its type.
    pub fn display(&self, field: Field) -> String {
        match self.integer(field) {
            Some(n) => n.to_string(),
            None => self.text(field).unwrap_or_default().to_owned(),
        }
    }
}
