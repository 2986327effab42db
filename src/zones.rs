//! Geographic zone resolution for French departments
//!
//! Maps a department name to the ecological zone used to rank species, and
//! decides whether a department is on the coast (which controls whether
//! saltwater spots and species are offered at all).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ecological zone used to prioritize species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoZone {
    Mediterranean,
    AtlanticChannel,
    Guyana,
    Tropical,
    Inland,
}

impl GeoZone {
    /// Returns a human-readable label for the zone.
    pub fn label(&self) -> &'static str {
        match self {
            GeoZone::Mediterranean => "Méditerranée",
            GeoZone::AtlanticChannel => "Atlantique / Manche",
            GeoZone::Guyana => "Guyane",
            GeoZone::Tropical => "Tropical (DROM)",
            GeoZone::Inland => "Intérieur des terres",
        }
    }
}

impl fmt::Display for GeoZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mediterranean coastline departments, Corsica included
const MEDITERRANEAN: &[&str] = &[
    "Pyrénées-Orientales",
    "Aude",
    "Hérault",
    "Gard",
    "Bouches-du-Rhône",
    "Var",
    "Alpes-Maritimes",
    "Haute-Corse",
    "Corse-du-Sud",
];

/// Channel and Atlantic coastline departments, north to south
const ATLANTIC_CHANNEL: &[&str] = &[
    "Nord",
    "Pas-de-Calais",
    "Somme",
    "Seine-Maritime",
    "Calvados",
    "Manche",
    "Ille-et-Vilaine",
    "Côtes-d'Armor",
    "Finistère",
    "Morbihan",
    "Loire-Atlantique",
    "Vendée",
    "Charente-Maritime",
    "Gironde",
    "Landes",
    "Pyrénées-Atlantiques",
];

const GUYANA: &[&str] = &["Guyane"];

/// Overseas departments outside Guyana
const TROPICAL: &[&str] = &["Guadeloupe", "Martinique", "La Réunion", "Mayotte"];

/// Every department with a coastline, overseas territories included
const COASTAL_DEPARTMENTS: &[&[&str]] = &[ATLANTIC_CHANNEL, MEDITERRANEAN, GUYANA, TROPICAL];

/// Resolves the ecological zone for a department.
///
/// Unset or unknown departments resolve to `GeoZone::Inland`.
pub fn zone_for_region(region: Option<&str>) -> GeoZone {
    let Some(region) = region else {
        return GeoZone::Inland;
    };
    if MEDITERRANEAN.contains(&region) {
        GeoZone::Mediterranean
    } else if ATLANTIC_CHANNEL.contains(&region) {
        GeoZone::AtlanticChannel
    } else if GUYANA.contains(&region) {
        GeoZone::Guyana
    } else if TROPICAL.contains(&region) {
        GeoZone::Tropical
    } else {
        GeoZone::Inland
    }
}

/// Returns true when saltwater spots and species should be offered.
///
/// An unset department is treated as coastal so that every option is
/// available before a location is chosen.
pub fn is_coastal(region: Option<&str>) -> bool {
    match region {
        None => true,
        Some(region) => COASTAL_DEPARTMENTS
            .iter()
            .any(|departments| departments.contains(&region)),
    }
}

/// Returns every department name with a coastline.
pub fn coastal_departments() -> impl Iterator<Item = &'static str> {
    COASTAL_DEPARTMENTS.iter().flat_map(|departments| departments.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_region_is_inland_and_coastal() {
        assert_eq!(zone_for_region(None), GeoZone::Inland);
        assert!(is_coastal(None));
    }

    #[test]
    fn test_unknown_region_is_inland_and_not_coastal() {
        assert_eq!(zone_for_region(Some("Cantal")), GeoZone::Inland);
        assert!(!is_coastal(Some("Cantal")));
        assert!(!is_coastal(Some("")));
    }

    #[test]
    fn test_each_list_maps_to_its_zone() {
        assert_eq!(zone_for_region(Some("Hérault")), GeoZone::Mediterranean);
        assert_eq!(zone_for_region(Some("Haute-Corse")), GeoZone::Mediterranean);
        assert_eq!(zone_for_region(Some("Finistère")), GeoZone::AtlanticChannel);
        assert_eq!(zone_for_region(Some("Gironde")), GeoZone::AtlanticChannel);
        assert_eq!(zone_for_region(Some("Guyane")), GeoZone::Guyana);
        assert_eq!(zone_for_region(Some("La Réunion")), GeoZone::Tropical);
    }

    #[test]
    fn test_matching_is_exact() {
        // Department names are matched verbatim, accents included
        assert_eq!(zone_for_region(Some("Finistere")), GeoZone::Inland);
        assert_eq!(zone_for_region(Some("gironde")), GeoZone::Inland);
    }

    #[test]
    fn test_zone_lists_are_disjoint() {
        let lists = [MEDITERRANEAN, ATLANTIC_CHANNEL, GUYANA, TROPICAL];
        for (i, a) in lists.iter().enumerate() {
            for b in lists.iter().skip(i + 1) {
                for name in a.iter() {
                    assert!(!b.contains(name), "{} appears in two zones", name);
                }
            }
        }
    }

    #[test]
    fn test_every_coastal_department_resolves_to_a_maritime_zone() {
        let coastal: Vec<&str> = coastal_departments().collect();
        assert_eq!(coastal.len(), 30);
        for name in coastal {
            assert!(is_coastal(Some(name)));
            assert_ne!(zone_for_region(Some(name)), GeoZone::Inland, "{}", name);
        }
    }
}
