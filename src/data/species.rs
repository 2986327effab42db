//! Static species catalog
//!
//! This module contains the list of every species the assistant knows about,
//! with the zone metadata used to filter and rank them.

use serde::Serialize;

use crate::zones::GeoZone;

/// Habitat of a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitatKind {
    Freshwater,
    Saltwater,
    Migratory,
}

/// A species that can be targeted
///
/// Uses `&'static` fields to allow static initialization of the catalog,
/// in the same way the rest of the reference data is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeciesRecord {
    /// Unique identifier (e.g. "calamar")
    pub id: &'static str,
    /// Display label
    pub label: &'static str,
    pub habitat: HabitatKind,
    /// Zones where this species is a top local suggestion
    pub priority_zones: Option<&'static [GeoZone]>,
    /// If present, the species is only visible in these zones
    pub restricted_to_zones: Option<&'static [GeoZone]>,
}

impl SpeciesRecord {
    /// Returns true when the species is a top suggestion in `zone`.
    pub fn is_priority_in(&self, zone: GeoZone) -> bool {
        self.priority_zones
            .is_some_and(|zones| zones.contains(&zone))
    }

    /// Returns true when the species may be shown in `zone`.
    pub fn is_visible_in(&self, zone: GeoZone) -> bool {
        self.restricted_to_zones
            .map_or(true, |zones| zones.contains(&zone))
    }
}

/// Mainland France
const METROPOLE: &[GeoZone] = &[GeoZone::Inland, GeoZone::AtlanticChannel, GeoZone::Mediterranean];

/// Overseas departments
const OVERSEAS: &[GeoZone] = &[GeoZone::Guyana, GeoZone::Tropical];

/// Cephalopods highlighted first on a coast at night
pub const NOCTURNAL_CEPHALOPODS: &[&str] = &["calamar", "seiche"];

/// Every species in the catalog. The first entry is the first-load target.
pub static SPECIES: [SpeciesRecord; 24] = [
    // Freshwater, mainland
    SpeciesRecord {
        id: "brochet",
        label: "Brochet",
        habitat: HabitatKind::Freshwater,
        priority_zones: Some(&[GeoZone::Inland]),
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "sandre",
        label: "Sandre",
        habitat: HabitatKind::Freshwater,
        priority_zones: Some(&[GeoZone::Inland]),
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "perche",
        label: "Perche",
        habitat: HabitatKind::Freshwater,
        priority_zones: Some(&[GeoZone::Inland]),
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "blackbass",
        label: "Black-Bass",
        habitat: HabitatKind::Freshwater,
        priority_zones: None,
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "silure",
        label: "Silure",
        habitat: HabitatKind::Freshwater,
        priority_zones: None,
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "chevesne",
        label: "Chevesne",
        habitat: HabitatKind::Freshwater,
        priority_zones: Some(&[GeoZone::Inland]),
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "carpe",
        label: "Carpe",
        habitat: HabitatKind::Freshwater,
        priority_zones: None,
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "truite",
        label: "Truite",
        habitat: HabitatKind::Freshwater,
        priority_zones: Some(&[GeoZone::Inland, GeoZone::AtlanticChannel]),
        restricted_to_zones: Some(METROPOLE),
    },
    // Saltwater, mainland
    SpeciesRecord {
        id: "bar",
        label: "Bar (Loup)",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::AtlanticChannel, GeoZone::Mediterranean]),
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "daurade",
        label: "Daurade Royale",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::Mediterranean, GeoZone::AtlanticChannel]),
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "lieu",
        label: "Lieu Jaune",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::AtlanticChannel]),
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "vieille",
        label: "Vieille",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::AtlanticChannel]),
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "maquereau",
        label: "Maquereau",
        habitat: HabitatKind::Saltwater,
        priority_zones: None,
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "barracuda",
        label: "Barracuda",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::Mediterranean]),
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "thon",
        label: "Thon Rouge",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::Mediterranean, GeoZone::AtlanticChannel]),
        restricted_to_zones: Some(METROPOLE),
    },
    // Cephalopods, mainland
    SpeciesRecord {
        id: "calamar",
        label: "Calamar",
        habitat: HabitatKind::Saltwater,
        priority_zones: None,
        restricted_to_zones: Some(METROPOLE),
    },
    SpeciesRecord {
        id: "seiche",
        label: "Seiche",
        habitat: HabitatKind::Saltwater,
        priority_zones: None,
        restricted_to_zones: Some(METROPOLE),
    },
    // Overseas
    SpeciesRecord {
        id: "espadon",
        label: "Espadon",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::Tropical, GeoZone::Guyana]),
        restricted_to_zones: Some(OVERSEAS),
    },
    SpeciesRecord {
        id: "wahoo",
        label: "Thon Wahoo",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::Tropical, GeoZone::Guyana]),
        restricted_to_zones: Some(OVERSEAS),
    },
    SpeciesRecord {
        id: "coryphene",
        label: "Daurade Coryphène",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::Tropical, GeoZone::Guyana]),
        restricted_to_zones: Some(OVERSEAS),
    },
    SpeciesRecord {
        id: "tarpon",
        label: "Tarpon",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::Guyana, GeoZone::Tropical]),
        restricted_to_zones: Some(OVERSEAS),
    },
    SpeciesRecord {
        id: "acoupa",
        label: "Acoupa",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::Guyana]),
        restricted_to_zones: Some(&[GeoZone::Guyana]),
    },
    SpeciesRecord {
        id: "snook",
        label: "Snook",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::Guyana, GeoZone::Tropical]),
        restricted_to_zones: Some(OVERSEAS),
    },
    SpeciesRecord {
        id: "carangue",
        label: "Carangue",
        habitat: HabitatKind::Saltwater,
        priority_zones: Some(&[GeoZone::Tropical, GeoZone::Guyana]),
        restricted_to_zones: Some(OVERSEAS),
    },
];

/// Returns the full catalog.
pub fn all_species() -> &'static [SpeciesRecord] {
    &SPECIES
}

/// Returns the species used as target before anything else is chosen.
pub fn default_species() -> &'static SpeciesRecord {
    &SPECIES[0]
}

/// Get a species by its ID
///
/// Returns `Some(&SpeciesRecord)` if found, `None` otherwise
pub fn get_species_by_id(id: &str) -> Option<&'static SpeciesRecord> {
    SPECIES.iter().find(|species| species.id == id)
}
