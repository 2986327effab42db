//! Report rendering
//!
//! Turns the settled snapshot and its derived view into either a plain-text
//! summary for the terminal or a JSON document.

use serde::Serialize;

use crate::data::species::get_species_by_id;
use crate::data::{ExpertiseLevel, FishingConditions};
use crate::labels;
use crate::store::{ConditionsStore, DerivedView};

const UNSET: &str = "Non renseigné";

/// JSON form of the report
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub conditions: &'a FishingConditions,
    pub derived: &'a DerivedView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<&'a str>,
}

impl<'a> Report<'a> {
    pub fn new(store: &'a ConditionsStore) -> Self {
        Self {
            conditions: store.conditions(),
            derived: store.derived(),
            strategy: None,
        }
    }

    pub fn with_strategy(mut self, strategy: Option<&'a str>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Renders the store as a plain-text summary.
pub fn render_text(store: &ConditionsStore) -> String {
    let c = store.conditions();
    let d = store.derived();

    let mut lines = vec![
        "Tacklor, conditions de pêche".to_string(),
        format!(
            "Lieu        : {} ({}{})",
            c.region.as_deref().unwrap_or(UNSET),
            d.zone,
            if d.coastal { ", littoral" } else { "" }
        ),
    ];
    if let Some(coordinates) = c.coordinates {
        lines.push(format!(
            "Position    : {:.4}, {:.4}",
            coordinates.lat, coordinates.lon
        ));
    }
    lines.push(format!(
        "Moment      : {} {} ({}, soleil à {:.0}°)",
        c.period,
        labels::format_time(c.time),
        d.phase.label(),
        d.day_progress_angle
    ));
    lines.push(format!("Météo       : {}", labels::weather_label(c.weather)));
    lines.push(format!(
        "Pression    : {} hPa ({})",
        c.pressure,
        labels::pressure_status(c.pressure)
    ));
    lines.push(format!(
        "Vent        : {}, {}",
        labels::wind_label(c.wind),
        labels::wind_direction_label(c.wind_direction)
    ));
    lines.push(format!(
        "Eau         : {}, fond {}",
        c.water_type.map_or(UNSET, |w| w.label()),
        c.bottom_type.map_or(UNSET, |b| b.label())
    ));
    lines.push(format!(
        "Clarté      : {} / Surface : {}",
        labels::clarity_label(c.water_clarity),
        labels::surface_label(c.water_surface)
    ));
    if c.water_type.is_some_and(|w| w.has_current()) {
        lines.push(format!("Courant     : {}", labels::water_flow_label(c.water_flow)));
    }
    if c.water_type.is_some_and(|w| w.is_saltwater()) {
        lines.push(format!("Marée       : {}", labels::tide_label(c.tide_level)));
    }
    lines.push(format!("Profondeur  : {} à {} m", c.depth.min, c.depth.max));
    lines.push(format!("Technique   : {}", c.technique.label()));
    lines.push(format!(
        "Cible       : {}",
        get_species_by_id(&c.target_fish).map_or(c.target_fish.as_str(), |s| s.label)
    ));
    lines.push(format!(
        "Niveau      : {}{}",
        match c.expertise_level {
            ExpertiseLevel::Beginner => "Débutant",
            ExpertiseLevel::Expert => "Expert",
        },
        if d.can_activate_expert {
            ""
        } else {
            " (mode expert verrouillé)"
        }
    ));

    let sections = [
        ("Poissons nocturnes", &d.recommendations.night_priority),
        ("Espèces locales", &d.recommendations.local_priority),
        ("Autres espèces", &d.recommendations.other),
    ];
    for (title, species) in sections {
        if species.is_empty() {
            continue;
        }
        let names: Vec<&str> = species.iter().map(|s| s.label).collect();
        lines.push(String::new());
        lines.push(format!("{} : {}", title, names.join(", ")));
    }
    if d.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("Aucune espèce disponible pour cette zone.".to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
