//! Shared test data.

use crate::entry::CatalogEntry;

#[allow(clippy::too_many_arguments)]
fn car(
    brand: &str,
    model: &str,
    color: &str,
    fuel_type: &str,
    body_type: &str,
    made: &str,
    price: i64,
    seats: i64,
    airbags: i64,
    image: &str,
) -> CatalogEntry {
    CatalogEntry {
        id: 0,
        price,
        color: color.into(),
        fuel_type: fuel_type.into(),
        body_type: body_type.into(),
        trim_level: "Base".into(),
        model: model.into(),
        seat_count: seats,
        brand: brand.into(),
        country_of_origin: made.into(),
        transmission: "Manual".into(),
        airbag_count: airbags,
        mileage: "18 kmpl".into(),
        image_reference: image.into(),
    }
}

/// Seven cars; ids are left at zero for the store to assign.
pub(crate) fn sample_catalog() -> Vec<CatalogEntry> {
    vec![
        car("Honda", "City", "Red", "Petrol", "Sedan", "Japan", 1_200_000, 5, 6, "/var/uploads/abc.jpg"),
        car("Hyundai", "Creta", "White", "Diesel", "SUV", "South Korea", 1_500_000, 5, 6, "creta.jpg"),
        car("Toyota", "Innova", "Silver", "Diesel", "SUV", "Japan", 2_500_000, 7, 7, "innova.jpg"),
        car("Porsche", "911", "Yellow", "Petrol", "Sports", "Germany", 18_000_000, 2, 8, "../../911.jpg"),
        car("Maruti Suzuki", "Swift", "Red", "Petrol", "Hatchback", "India", 650_000, 5, 2, "swift.jpg"),
        car("Tata", "Nexon EV", "Blue", "Electric", "SUV", "India", 1_450_000, 5, 6, "nexon.jpg"),
        car("BMW", "X5", "Black", "Hybrid", "SUV", "Germany", 9_500_000, 5, 8, "x5.jpg"),
    ]
}
