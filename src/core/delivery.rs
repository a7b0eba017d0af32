//! Delivery area directory: flat shipping fees for the Klang Valley zones
//! the shop delivers to.
//!
//! Lookups are total. An id that is not in the directory resolves to a fee
//! of `0` and an empty name, so callers cannot tell "free delivery" from
//! "unknown area" through [`delivery_fee`] alone. Use [`find_area`] when
//! that distinction matters.

use crate::domain::model::DeliveryArea;

const fn area(id: &'static str, name: &'static str, fee: u32) -> DeliveryArea {
    DeliveryArea { id, name, fee }
}

/// Fees are in whole ringgit.
pub static DELIVERY_AREAS: [DeliveryArea; 16] = [
    area("kuala-lumpur", "Kuala Lumpur", 100),
    area("petaling-jaya", "Petaling Jaya", 100),
    area("subang-jaya", "Subang Jaya", 120),
    area("shah-alam", "Shah Alam", 130),
    area("klang", "Klang", 150),
    area("puchong", "Puchong", 120),
    area("cheras", "Cheras", 110),
    area("ampang", "Ampang", 110),
    area("kajang", "Kajang", 130),
    area("seri-kembangan", "Seri Kembangan", 120),
    area("bangi", "Bangi", 150),
    area("putrajaya", "Putrajaya", 150),
    area("cyberjaya", "Cyberjaya", 150),
    area("selayang", "Selayang", 130),
    area("gombak", "Gombak", 130),
    area("rawang", "Rawang", 180),
];

pub fn areas() -> &'static [DeliveryArea] {
    &DELIVERY_AREAS
}

/// Exact, case-sensitive match on the area id.
pub fn find_area(area_id: &str) -> Option<&'static DeliveryArea> {
    let found = DELIVERY_AREAS.iter().find(|area| area.id == area_id);
    if found.is_none() {
        tracing::debug!("No delivery area matches id {:?}", area_id);
    }
    found
}

pub fn delivery_fee(area_id: &str) -> u32 {
    find_area(area_id).map(|area| area.fee).unwrap_or(0)
}

pub fn delivery_area_name(area_id: &str) -> &'static str {
    find_area(area_id).map(|area| area.name).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_areas_resolve_to_their_own_record() {
        for area in areas() {
            assert_eq!(delivery_fee(area.id), area.fee);
            assert_eq!(delivery_area_name(area.id), area.name);
        }
    }

    #[test]
    fn test_ids_are_unique_lowercase_tokens() {
        let mut seen = HashSet::new();
        for area in areas() {
            assert!(seen.insert(area.id), "duplicate area id {}", area.id);
            assert!(area
                .id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '-'));
            assert!(!area.name.is_empty());
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_unmatched_ids_fall_back_to_defaults() {
        for id in ["", " ", "unknown-area", "Kuala-Lumpur", "KLANG", " klang", "klang "] {
            assert_eq!(delivery_fee(id), 0, "fee for {:?}", id);
            assert_eq!(delivery_area_name(id), "", "name for {:?}", id);
            assert!(find_area(id).is_none());
        }
    }

    #[test]
    fn test_find_area_keeps_not_found_distinct() {
        let area = find_area("klang").unwrap();
        assert_eq!(area.fee, 150);
        assert_eq!(find_area("nowhere"), None);
    }
}
