use carlot_catalog::image::image_url;
use carlot_catalog::CatalogEntry;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /cars/search` and `POST /cars/suggestions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
}

impl QueryRequest {
    /// The query text, empty when missing.
    pub fn text(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }
}

/// A catalog row with its public image URL.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CarResponse {
    #[serde(flatten)]
    pub car: CatalogEntry,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl CarResponse {
    pub fn new(car: CatalogEntry, base_url: &str) -> Self {
        let image_url = image_url(base_url, &car.image_reference);
        Self { car, image_url }
    }
}
