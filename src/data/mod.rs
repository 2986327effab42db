//! Core data models for Tacklor
//!
//! This module contains the fishing conditions snapshot, its enumerated
//! fields, the first-load defaults and the partial update type used to
//! mutate a snapshot one field at a time.

pub mod region;
pub mod species;
pub mod weather;

pub use region::{RegionClient, RegionError};
pub use species::{all_species, get_species_by_id, HabitatKind, SpeciesRecord};
pub use weather::{WeatherClient, WeatherError, WeatherReport};

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::solar::Period;

/// Kind of water the angler is fishing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterType {
    River,
    MajorRiver,
    Lake,
    Pond,
    Canal,
    Dam,
    OpenSea,
    Jetty,
    Beach,
    Cliffs,
    Harbour,
    Estuary,
}

impl WaterType {
    /// Returns the freshwater spots, always offered.
    pub fn freshwater() -> &'static [WaterType] {
        &[
            WaterType::River,
            WaterType::MajorRiver,
            WaterType::Lake,
            WaterType::Pond,
            WaterType::Canal,
            WaterType::Dam,
        ]
    }

    /// Returns the saltwater spots, offered only on the coast.
    pub fn saltwater() -> &'static [WaterType] {
        &[
            WaterType::OpenSea,
            WaterType::Jetty,
            WaterType::Beach,
            WaterType::Cliffs,
            WaterType::Harbour,
            WaterType::Estuary,
        ]
    }

    /// Returns the water types that can be picked for a region.
    pub fn available(coastal: bool) -> Vec<WaterType> {
        let mut types = WaterType::freshwater().to_vec();
        if coastal {
            types.extend_from_slice(WaterType::saltwater());
        }
        types
    }

    pub fn is_saltwater(&self) -> bool {
        WaterType::saltwater().contains(self)
    }

    /// Returns true when a current/flow reading is meaningful for this spot.
    pub fn has_current(&self) -> bool {
        self.is_saltwater()
            || matches!(
                self,
                WaterType::River | WaterType::MajorRiver | WaterType::Canal | WaterType::Dam
            )
    }

    pub fn label(&self) -> &'static str {
        match self {
            WaterType::River => "Rivière",
            WaterType::MajorRiver => "Fleuve",
            WaterType::Lake => "Lac",
            WaterType::Pond => "Étang",
            WaterType::Canal => "Canal",
            WaterType::Dam => "Barrage",
            WaterType::OpenSea => "Pleine Mer",
            WaterType::Jetty => "Digue",
            WaterType::Beach => "Plage",
            WaterType::Cliffs => "Falaises",
            WaterType::Harbour => "Port",
            WaterType::Estuary => "Estuaire",
        }
    }

    /// Parses user input into a WaterType.
    ///
    /// Matching is case-insensitive and accepts English and French names.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<WaterType> {
        let water = match s.trim().to_lowercase().as_str() {
            "river" | "riviere" | "rivière" => WaterType::River,
            "major_river" | "fleuve" => WaterType::MajorRiver,
            "lake" | "lac" => WaterType::Lake,
            "pond" | "etang" | "étang" => WaterType::Pond,
            "canal" => WaterType::Canal,
            "dam" | "barrage" => WaterType::Dam,
            "open_sea" | "sea" | "mer" => WaterType::OpenSea,
            "jetty" | "digue" => WaterType::Jetty,
            "beach" | "plage" => WaterType::Beach,
            "cliffs" | "falaises" => WaterType::Cliffs,
            "harbour" | "harbor" | "port" => WaterType::Harbour,
            "estuary" | "estuaire" => WaterType::Estuary,
            _ => return None,
        };
        Some(water)
    }
}

/// Nature of the bottom at the spot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottomType {
    Mud,
    Weed,
    Rock,
    Sand,
    OysterBeds,
}

impl BottomType {
    pub fn label(&self) -> &'static str {
        match self {
            BottomType::Mud => "Vase",
            BottomType::Weed => "Herbiers",
            BottomType::Rock => "Roche",
            BottomType::Sand => "Sable",
            BottomType::OysterBeds => "Parcs Ostréicoles",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<BottomType> {
        let bottom = match s.trim().to_lowercase().as_str() {
            "mud" | "vase" => BottomType::Mud,
            "weed" | "weeds" | "herbiers" => BottomType::Weed,
            "rock" | "roche" => BottomType::Rock,
            "sand" | "sable" => BottomType::Sand,
            "oyster_beds" | "oysters" | "parcs" => BottomType::OysterBeds,
            _ => return None,
        };
        Some(bottom)
    }
}

/// Fishing technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    Lures,
    NaturalBait,
}

impl Technique {
    pub fn label(&self) -> &'static str {
        match self {
            Technique::Lures => "Leurres",
            Technique::NaturalBait => "Appâts Naturels",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Technique> {
        match s.trim().to_lowercase().as_str() {
            "lures" | "lure" | "leurres" => Some(Technique::Lures),
            "natural_bait" | "bait" | "appats" | "appâts" => Some(Technique::NaturalBait),
            _ => None,
        }
    }
}

/// Direction the wind blows from, relative to an angler facing the water
/// (north is straight off the water).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NW")]
    NorthWest,
}

impl WindDirection {
    /// Returns the eight compass points clockwise from north.
    pub fn all() -> &'static [WindDirection] {
        &[
            WindDirection::North,
            WindDirection::NorthEast,
            WindDirection::East,
            WindDirection::SouthEast,
            WindDirection::South,
            WindDirection::SouthWest,
            WindDirection::West,
            WindDirection::NorthWest,
        ]
    }

    /// Maps a bearing in degrees to the nearest compass point.
    ///
    /// Each point covers a 45 degree sector centred on it.
    pub fn from_degrees(degrees: f64) -> WindDirection {
        let normalized = (degrees + 22.5).rem_euclid(360.0);
        let index = (normalized / 45.0).floor() as usize;
        WindDirection::all()[index.min(7)]
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WindDirection::North => "N",
            WindDirection::NorthEast => "NE",
            WindDirection::East => "E",
            WindDirection::SouthEast => "SE",
            WindDirection::South => "S",
            WindDirection::SouthWest => "SW",
            WindDirection::West => "W",
            WindDirection::NorthWest => "NW",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<WindDirection> {
        let input = s.trim().to_uppercase();
        WindDirection::all()
            .iter()
            .copied()
            .find(|dir| dir.abbreviation() == input)
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Level of detail requested from the strategy generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseLevel {
    #[default]
    Beginner,
    Expert,
}

/// Depth range fished, in metres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthRange {
    pub min: u16,
    pub max: u16,
}

/// Errors for user-supplied coordinates
#[derive(Debug, Error, PartialEq)]
pub enum CoordinatesError {
    #[error("Invalid coordinates '{0}': expected LAT,LON")]
    Format(String),

    #[error("Coordinates out of range: lat={lat}, lon={lon}")]
    OutOfRange { lat: f64, lon: f64 },
}

/// Geographic position of the angler
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinatesError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinatesError::OutOfRange { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Parses `"LAT,LON"`, e.g. `"48.39,-4.49"`.
    pub fn parse(s: &str) -> Result<Self, CoordinatesError> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CoordinatesError::Format(s.to_string()))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| CoordinatesError::Format(s.to_string()))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| CoordinatesError::Format(s.to_string()))?;
        Self::new(lat, lon)
    }
}

// First-load defaults

pub const DEFAULT_WEATHER: u8 = 50;
/// 12:00
pub const DEFAULT_TIME: u16 = 720;
pub const DEFAULT_WATER_CLARITY: u8 = 50;
pub const DEFAULT_TECHNIQUE: Technique = Technique::Lures;
/// High tide
pub const DEFAULT_TIDE_LEVEL: u8 = 50;
pub const DEFAULT_WIND: u8 = 20;
pub const DEFAULT_WATER_FLOW: u8 = 30;
pub const DEFAULT_WATER_SURFACE: u8 = 10;
/// Standard sea-level pressure, hPa
pub const DEFAULT_PRESSURE: u16 = 1013;
pub const DEFAULT_DEPTH: DepthRange = DepthRange { min: 0, max: 10 };
pub const DEFAULT_EXPERTISE: ExpertiseLevel = ExpertiseLevel::Beginner;

/// The on-site conditions snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishingConditions {
    pub period: Period,
    /// 0 (storm) to 100 (full sun)
    pub weather: u8,
    /// Minutes from midnight, 0-1439
    pub time: u16,
    /// 0 (muddy) to 100 (crystal clear)
    pub water_clarity: u8,
    pub water_type: Option<WaterType>,
    pub bottom_type: Option<BottomType>,
    /// Catalog id of the target species
    pub target_fish: String,
    pub technique: Technique,
    /// 0 (low) through 50 (high) back to 100 (low)
    pub tide_level: u8,
    /// 0 (calm) to 100 (storm)
    pub wind: u8,
    /// 0 (stagnant) to 100 (strong current)
    pub water_flow: u8,
    pub wind_direction: Option<WindDirection>,
    /// 0 (mirror) to 100 (heavy swell)
    pub water_surface: u8,
    /// Atmospheric pressure, hPa
    pub pressure: u16,
    pub depth: DepthRange,
    /// French department name
    pub region: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub expertise_level: ExpertiseLevel,
}

impl FishingConditions {
    /// Creates a first-load snapshot for the given period.
    pub fn for_period(period: Period) -> Self {
        Self {
            period,
            weather: DEFAULT_WEATHER,
            time: DEFAULT_TIME,
            water_clarity: DEFAULT_WATER_CLARITY,
            water_type: None,
            bottom_type: None,
            target_fish: species::default_species().id.to_string(),
            technique: DEFAULT_TECHNIQUE,
            tide_level: DEFAULT_TIDE_LEVEL,
            wind: DEFAULT_WIND,
            water_flow: DEFAULT_WATER_FLOW,
            wind_direction: None,
            water_surface: DEFAULT_WATER_SURFACE,
            pressure: DEFAULT_PRESSURE,
            depth: DEFAULT_DEPTH,
            region: None,
            coordinates: None,
            expertise_level: DEFAULT_EXPERTISE,
        }
    }
}

impl Default for FishingConditions {
    /// First-load snapshot for the current month.
    fn default() -> Self {
        Self::for_period(Period::current())
    }
}

/// Distinguishes a missing key (leave the field alone) from an explicit
/// `null` (clear the field) when deserializing nullable fields.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A partial change to a [`FishingConditions`] snapshot.
///
/// `None` leaves a field untouched. Nullable fields use `Some(None)` to
/// clear the value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ConditionsUpdate {
    pub period: Option<Period>,
    pub weather: Option<u8>,
    pub time: Option<u16>,
    pub water_clarity: Option<u8>,
    #[serde(deserialize_with = "nullable")]
    pub water_type: Option<Option<WaterType>>,
    #[serde(deserialize_with = "nullable")]
    pub bottom_type: Option<Option<BottomType>>,
    pub target_fish: Option<String>,
    pub technique: Option<Technique>,
    pub tide_level: Option<u8>,
    pub wind: Option<u8>,
    pub water_flow: Option<u8>,
    #[serde(deserialize_with = "nullable")]
    pub wind_direction: Option<Option<WindDirection>>,
    pub water_surface: Option<u8>,
    pub pressure: Option<u16>,
    pub depth: Option<DepthRange>,
    #[serde(deserialize_with = "nullable")]
    pub region: Option<Option<String>>,
    #[serde(deserialize_with = "nullable")]
    pub coordinates: Option<Option<Coordinates>>,
    pub expertise_level: Option<ExpertiseLevel>,
}

impl ConditionsUpdate {
    /// Returns true when the update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == ConditionsUpdate::default()
    }

    /// Layers `other` on top of `self`; fields set in `other` win.
    pub fn merge(mut self, other: ConditionsUpdate) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            period,
            weather,
            time,
            water_clarity,
            water_type,
            bottom_type,
            target_fish,
            technique,
            tide_level,
            wind,
            water_flow,
            wind_direction,
            water_surface,
            pressure,
            depth,
            region,
            coordinates,
            expertise_level
        );
        self
    }

    /// Writes every set field into `conditions`.
    pub fn apply_to(self, conditions: &mut FishingConditions) {
        macro_rules! apply {
            ($($field:ident),*) => {
                $(if let Some(value) = self.$field { conditions.$field = value; })*
            };
        }
        apply!(
            period,
            weather,
            time,
            water_clarity,
            water_type,
            bottom_type,
            target_fish,
            technique,
            tide_level,
            wind,
            water_flow,
            wind_direction,
            water_surface,
            pressure,
            depth,
            region,
            coordinates,
            expertise_level
        );
    }
}
