use utoipa::OpenApi;

use crate::routes::{cars, health};

#[derive(OpenApi)]
#[openapi(info(
    title = "carlot-server",
    description = "Car catalog storefront API",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(cars::CarsApi::openapi());
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_document_lists_catalog_paths() {
        let doc = get_docs();
        for path in ["/", "/health", "/car_tb", "/cars/search", "/cars/suggestions"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
