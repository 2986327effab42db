//! Conditions store
//!
//! Holds the single [`FishingConditions`] snapshot for a session. Every
//! mutation goes through [`ConditionsStore::update`], which validates the
//! change, re-derives everything computed from the snapshot, and enforces
//! the cross-field rules before anyone can read the result:
//!
//! - expert mode is dropped as soon as its prerequisites are missing;
//! - the target species always belongs to the visible recommendations
//!   (unless nothing at all is visible, in which case it is left alone).

use serde::Serialize;
use thiserror::Error;

use crate::data::species::{all_species, get_species_by_id};
use crate::data::{ConditionsUpdate, ExpertiseLevel, FishingConditions, WaterType};
use crate::expert;
use crate::recommend::{recommend, RecommendationContext, Recommendations};
use crate::solar::{self, DayPhase, SolarTimes, MINUTES_PER_DAY};
use crate::zones::{self, GeoZone};

/// Errors returned when a change is refused. A refused change is never
/// partially applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A slider value is outside its range
    #[error("{field} must be at most {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u16,
        max: u16,
    },

    /// Depth range with min above max
    #[error("Invalid depth range: min {min} m is deeper than max {max} m")]
    InvalidDepth { min: u16, max: u16 },

    /// Target species is not in the catalog
    #[error("Unknown species '{0}'")]
    UnknownSpecies(String),

    /// Expert mode requested while its prerequisites are missing
    #[error("Expert mode requires a department, water type, bottom type and wind direction")]
    ExpertLocked,

    /// Strategy requested before the spot is described
    #[error("Select a water type and a bottom type before requesting a strategy")]
    IncompleteForStrategy,
}

/// Read-only values derived from the current snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    pub phase: DayPhase,
    pub day_progress_angle: f32,
    pub is_night: bool,
    pub zone: GeoZone,
    pub coastal: bool,
    pub recommendations: Recommendations<'static>,
    pub can_activate_expert: bool,
    pub water_types: Vec<WaterType>,
}

impl DerivedView {
    /// Derives every read-only value from a snapshot.
    pub fn derive(conditions: &FishingConditions) -> Self {
        let times = SolarTimes::for_period(conditions.period);
        let reading = solar::read(conditions.time, conditions.period);
        let is_night = solar::is_night(conditions.time, times);
        let region = conditions.region.as_deref();
        let zone = zones::zone_for_region(region);
        let coastal = zones::is_coastal(region);

        let recommendations = recommend(
            all_species(),
            RecommendationContext {
                zone,
                coastal,
                night: is_night,
            },
        );

        Self {
            phase: reading.phase,
            day_progress_angle: reading.day_progress_angle,
            is_night,
            zone,
            coastal,
            recommendations,
            can_activate_expert: expert::can_activate_expert(conditions),
            water_types: WaterType::available(coastal),
        }
    }
}

/// Owner of the session's conditions snapshot
#[derive(Debug, Clone)]
pub struct ConditionsStore {
    conditions: FishingConditions,
    derived: DerivedView,
}

impl Default for ConditionsStore {
    fn default() -> Self {
        Self::new(FishingConditions::default())
    }
}

impl ConditionsStore {
    /// Creates a store from an initial snapshot, settling it immediately.
    pub fn new(initial: FishingConditions) -> Self {
        let mut conditions = initial;
        let derived = DerivedView::derive(&conditions);
        settle(&mut conditions, &derived);
        Self {
            conditions,
            derived,
        }
    }

    /// The settled snapshot.
    pub fn conditions(&self) -> &FishingConditions {
        &self.conditions
    }

    /// Values derived from the settled snapshot.
    pub fn derived(&self) -> &DerivedView {
        &self.derived
    }

    /// Applies a partial change and returns the settled snapshot.
    ///
    /// The change is validated first; an invalid change, or an explicit
    /// request for expert mode that the resulting snapshot does not allow,
    /// is refused as a whole and leaves the store untouched.
    pub fn update(&mut self, change: ConditionsUpdate) -> Result<&FishingConditions, StoreError> {
        validate(&change)?;

        let requested_level = change.expertise_level;
        let mut candidate = self.conditions.clone();
        change.apply_to(&mut candidate);

        // Neither expertise nor target species feed the derivations, so the
        // view computed here stays valid after settling.
        let derived = DerivedView::derive(&candidate);

        if let Some(level) = requested_level {
            if !expert::transition_allowed(level, derived.can_activate_expert) {
                tracing::info!("expert mode refused: prerequisites missing");
                return Err(StoreError::ExpertLocked);
            }
        }

        settle(&mut candidate, &derived);
        self.conditions = candidate;
        self.derived = derived;
        Ok(&self.conditions)
    }

    /// Switches between beginner and expert mode.
    pub fn set_expertise(&mut self, level: ExpertiseLevel) -> Result<&FishingConditions, StoreError> {
        self.update(ConditionsUpdate {
            expertise_level: Some(level),
            ..Default::default()
        })
    }

    /// Returns the copy handed to the strategy generator.
    ///
    /// Requires a water type and a bottom type, and forces beginner mode on
    /// the outgoing copy if expert mode is not allowed. The stored snapshot
    /// is never modified.
    pub fn submission_snapshot(&self) -> Result<FishingConditions, StoreError> {
        if self.conditions.water_type.is_none() || self.conditions.bottom_type.is_none() {
            return Err(StoreError::IncompleteForStrategy);
        }
        Ok(expert::coerce_for_submission(&self.conditions))
    }
}

/// Enforces the cross-field rules on a snapshot using its derived view.
fn settle(conditions: &mut FishingConditions, derived: &DerivedView) {
    if expert::enforce(conditions, derived.can_activate_expert) {
        tracing::info!("expert mode downgraded: prerequisites no longer met");
    }

    let recommendations = &derived.recommendations;
    if recommendations.contains(&conditions.target_fish) {
        return;
    }
    if let Some(species) = recommendations.preferred() {
        tracing::info!(
            from = %conditions.target_fish,
            to = species.id,
            "target species no longer visible, reassigned"
        );
        conditions.target_fish = species.id.to_string();
    } else {
        tracing::debug!(target = %conditions.target_fish, "no visible species, target kept");
    }
}

fn validate(change: &ConditionsUpdate) -> Result<(), StoreError> {
    let percentages = [
        ("weather", change.weather),
        ("waterClarity", change.water_clarity),
        ("tideLevel", change.tide_level),
        ("wind", change.wind),
        ("waterFlow", change.water_flow),
        ("waterSurface", change.water_surface),
    ];
    for (field, value) in percentages {
        if let Some(value) = value.filter(|v| *v > 100) {
            return Err(StoreError::OutOfRange {
                field,
                value: value.into(),
                max: 100,
            });
        }
    }

    if let Some(time) = change.time.filter(|t| *t >= MINUTES_PER_DAY) {
        return Err(StoreError::OutOfRange {
            field: "time",
            value: time,
            max: MINUTES_PER_DAY - 1,
        });
    }

    if let Some(depth) = change.depth.filter(|d| d.min > d.max) {
        return Err(StoreError::InvalidDepth {
            min: depth.min,
            max: depth.max,
        });
    }

    if let Some(id) = &change.target_fish {
        if get_species_by_id(id).is_none() {
            return Err(StoreError::UnknownSpecies(id.clone()));
        }
    }

    Ok(())
}
