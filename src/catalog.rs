use crate::error::{AppError, Result};
use serde::Serialize;

pub type CityId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct City {
    pub id: CityId,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// Polish cities are listed before the rest of the world.
    pub is_domestic: bool,
}

const fn city(id: CityId, name: &'static str, latitude: f64, longitude: f64, is_domestic: bool) -> City {
    City {
        id,
        name,
        latitude,
        longitude,
        is_domestic,
    }
}

pub static CITIES: [City; 16] = [
    city(1, "Warszawa", 52.2297, 21.0122, true),
    city(2, "Kraków", 50.0647, 19.9450, true),
    city(3, "Gdańsk", 54.3520, 18.6466, true),
    city(4, "Wrocław", 51.1079, 17.0385, true),
    city(5, "Poznań", 52.4064, 16.9252, true),
    city(6, "Łódź", 51.7592, 19.4560, true),
    city(7, "Szczecin", 53.4285, 14.5528, true),
    city(8, "Lublin", 51.2465, 22.5684, true),
    city(9, "London", 51.5074, -0.1278, false),
    city(10, "Paris", 48.8566, 2.3522, false),
    city(11, "Berlin", 52.5200, 13.4050, false),
    city(12, "Rome", 41.9028, 12.4964, false),
    city(13, "Madrid", 40.4168, -3.7038, false),
    city(14, "New York", 40.7128, -74.0060, false),
    city(15, "Tokyo", 35.6762, 139.6503, false),
    city(16, "Sydney", -33.8688, 151.2093, false),
];

pub fn all() -> &'static [City] {
    &CITIES
}

pub fn by_id(id: CityId) -> Option<&'static City> {
    CITIES.iter().find(|c| c.id == id)
}

/// Resolve a city by numeric id or case-insensitive name.
pub fn resolve(query: &str) -> Result<&'static City> {
    let query = query.trim();
    if let Ok(id) = query.parse::<CityId>() {
        if let Some(city) = by_id(id) {
            return Ok(city);
        }
    }

    let lowered = query.to_lowercase();
    CITIES
        .iter()
        .find(|c| c.name.to_lowercase() == lowered)
        .ok_or_else(|| AppError::UnknownCity(query.to_string()))
}

/// Cities whose name contains `term`, ignoring case. A blank term matches all.
pub fn search(term: &str) -> Vec<&'static City> {
    let term = term.trim().to_lowercase();
    CITIES
        .iter()
        .filter(|c| term.is_empty() || c.name.to_lowercase().contains(&term))
        .collect()
}

/// Split cities into (domestic, foreign), preserving order.
pub fn partition_domestic<'a>(cities: &[&'a City]) -> (Vec<&'a City>, Vec<&'a City>) {
    cities.iter().copied().partition(|c| c.is_domestic)
}

/// Favorite cities in catalog order. Unknown ids are skipped.
pub fn favorites(ids: &[CityId]) -> Vec<&'static City> {
    CITIES.iter().filter(|c| ids.contains(&c.id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = CITIES.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CITIES.len());
    }

    #[test]
    fn test_resolve_by_id_and_name() {
        assert_eq!(resolve("3").unwrap().name, "Gdańsk");
        assert_eq!(resolve("kraków").unwrap().id, 2);
        assert_eq!(resolve("  New York ").unwrap().id, 14);
        assert!(matches!(resolve("Atlantis"), Err(AppError::UnknownCity(_))));
        assert!(matches!(resolve("999"), Err(AppError::UnknownCity(_))));
    }

    #[test]
    fn test_search_substring_ignores_case() {
        let names: Vec<_> = search("  LON ").iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["London"]);
        let names: Vec<_> = search("AŃ").iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Gdańsk", "Poznań"]);
        assert_eq!(search("").len(), CITIES.len());
        assert!(search("zzz").is_empty());
    }

    #[test]
    fn test_partition_domestic() {
        let all: Vec<_> = search("");
        let (domestic, foreign) = partition_domestic(&all);
        assert_eq!(domestic.len(), 8);
        assert_eq!(foreign.len(), 8);
        assert!(domestic.iter().all(|c| c.is_domestic));
        assert_eq!(foreign[0].name, "London");
    }

    #[test]
    fn test_favorites_in_catalog_order() {
        let names: Vec<_> = favorites(&[14, 1, 999]).iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Warszawa", "New York"]);
    }
}
