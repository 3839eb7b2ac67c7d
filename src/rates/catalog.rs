//! Known industries and locations with display names.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
}

pub const INDUSTRIES: [CatalogEntry; 8] = [
    CatalogEntry { id: "graphic_design", name: "Graphic Design" },
    CatalogEntry { id: "web_development", name: "Web Development" },
    CatalogEntry { id: "copywriting", name: "Copywriting" },
    CatalogEntry { id: "photography", name: "Photography" },
    CatalogEntry { id: "plumbing", name: "Plumbing" },
    CatalogEntry { id: "electrical", name: "Electrical" },
    CatalogEntry { id: "consulting", name: "Consulting" },
    CatalogEntry { id: "marketing", name: "Marketing" },
];

pub const LOCATIONS: [CatalogEntry; 9] = [
    CatalogEntry { id: "gauteng", name: "Gauteng" },
    CatalogEntry { id: "western_cape", name: "Western Cape" },
    CatalogEntry { id: "kwazulu_natal", name: "KwaZulu-Natal" },
    CatalogEntry { id: "eastern_cape", name: "Eastern Cape" },
    CatalogEntry { id: "free_state", name: "Free State" },
    CatalogEntry { id: "mpumalanga", name: "Mpumalanga" },
    CatalogEntry { id: "limpopo", name: "Limpopo" },
    CatalogEntry { id: "north_west", name: "North West" },
    CatalogEntry { id: "northern_cape", name: "Northern Cape" },
];

pub fn industries() -> &'static [CatalogEntry] {
    &INDUSTRIES
}

pub fn locations() -> &'static [CatalogEntry] {
    &LOCATIONS
}

/// Display name for an industry or location id, if it is in the catalog.
pub fn display_name(id: &str) -> Option<&'static str> {
    INDUSTRIES
        .iter()
        .chain(LOCATIONS.iter())
        .find(|entry| entry.id == id)
        .map(|entry| entry.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{LocationMultipliers, RateTable};

    #[test]
    fn catalog_covers_the_standard_tables() {
        let table = RateTable::default();
        let ids: Vec<&str> = industries().iter().map(|e| e.id).collect();
        for industry in table.industries() {
            assert!(ids.contains(&industry), "{industry} missing from catalog");
        }

        // Catalog ids are already normalized, so lookups by display-case names
        // land on the same multiplier.
        let multipliers = LocationMultipliers::default();
        for entry in locations() {
            let by_name = entry.name.replace([' ', '-'], "_");
            assert_eq!(multipliers.get(entry.id), multipliers.get(&by_name), "{}", entry.id);
        }
    }

    #[test]
    fn display_names_resolve() {
        assert_eq!(display_name("kwazulu_natal"), Some("KwaZulu-Natal"));
        assert_eq!(display_name("web_development"), Some("Web Development"));
        assert_eq!(display_name("nowhere"), None);
    }
}
