//! Price-band lookup table.

use crate::predicate::{Field, Predicate};

/// A labelled price interval, inclusive at both ends when bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    pub label: &'static str,
    pub min: i64,
    /// `None` means no upper bound.
    pub max: Option<i64>,
}

/// Bands offered by the storefront's price dropdown.
pub const PRICE_BANDS: &[PriceBand] = &[
    PriceBand { label: "3L to 10L", min: 300_000, max: Some(1_000_000) },
    PriceBand { label: "10L to 20L", min: 1_000_000, max: Some(2_000_000) },
    PriceBand { label: "20L to 40L", min: 2_000_000, max: Some(4_000_000) },
    PriceBand { label: "above 50L", min: 5_000_000, max: None },
];

impl PriceBand {
    /// Exact-label lookup.
    pub fn lookup(label: &str) -> Option<&'static PriceBand> {
        PRICE_BANDS.iter().find(|band| band.label == label)
    }

    pub fn contains(&self, price: i64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }

    pub fn predicate(&self) -> Predicate {
        Predicate::Range { field: Field::Price, min: self.min, max: self.max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lakh_band_is_inclusive() {
        let band = PriceBand::lookup("3L to 10L").expect("known band");
        assert!(band.contains(500_000));
        assert!(band.contains(300_000));
        assert!(band.contains(1_000_000));
        assert!(!band.contains(50_000));
        assert!(!band.contains(1_500_000));
    }

    #[test]
    fn top_band_is_open_ended() {
        let band = PriceBand::lookup("above 50L").expect("known band");
        assert!(band.contains(5_000_000));
        assert!(band.contains(i64::MAX));
        assert!(!band.contains(4_999_999));
        assert_eq!(band.max, None);
    }

    #[test]
    fn lookup_is_exact() {
        assert!(PriceBand::lookup("Above 50L").is_none());
        assert!(PriceBand::lookup("40L to 50L").is_none());
        assert!(PriceBand::lookup("").is_none());
    }

    #[test]
    fn bands_do_not_overlap_except_at_shared_edges() {
        for pair in PRICE_BANDS.windows(2) {
            let upper = pair[0].max.expect("only the last band is open");
            assert!(upper <= pair[1].min);
        }
    }
}
