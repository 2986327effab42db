//! Species recommendation engine
//!
//! Filters the species catalog down to what makes sense for the current
//! region and splits it into three ranked groups:
//!
//! 1. night suggestions (cephalopods on the coast after dark),
//! 2. local suggestions (species with priority in the current zone),
//! 3. everything else that is still visible.
//!
//! Each group is sorted by display label using accent-insensitive
//! comparison so that "Étang"-style labels sort next to their plain
//! spelling rather than after "Z".

use std::cmp::Ordering;

use serde::Serialize;

use crate::data::species::{HabitatKind, SpeciesRecord, NOCTURNAL_CEPHALOPODS};
use crate::zones::GeoZone;

/// Inputs that drive the recommendation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationContext {
    pub zone: GeoZone,
    /// Whether saltwater species may be offered
    pub coastal: bool,
    /// Whether night-active species should be highlighted
    pub night: bool,
}

/// Three disjoint, individually sorted groups of species
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendations<'a> {
    pub night_priority: Vec<&'a SpeciesRecord>,
    pub local_priority: Vec<&'a SpeciesRecord>,
    pub other: Vec<&'a SpeciesRecord>,
}

impl<'a> Recommendations<'a> {
    /// Iterates over every visible species in ranked order.
    pub fn iter(&self) -> impl Iterator<Item = &'a SpeciesRecord> + '_ {
        self.night_priority
            .iter()
            .chain(self.local_priority.iter())
            .chain(self.other.iter())
            .copied()
    }

    pub fn len(&self) -> usize {
        self.night_priority.len() + self.local_priority.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `id` is one of the visible species.
    pub fn contains(&self, id: &str) -> bool {
        self.iter().any(|species| species.id == id)
    }

    /// Picks the species to fall back on when the current target is no
    /// longer visible: first night suggestion, then first local
    /// suggestion, then the first visible species at all.
    pub fn preferred(&self) -> Option<&'a SpeciesRecord> {
        self.night_priority
            .first()
            .or_else(|| self.local_priority.first())
            .copied()
            .or_else(|| self.iter().next())
    }
}

/// Runs the filter, partition and sort pipeline over `catalog`.
pub fn recommend(catalog: &[SpeciesRecord], context: RecommendationContext) -> Recommendations<'_> {
    let mut recommendations = Recommendations::default();

    let visible = catalog
        .iter()
        .filter(|species| context.coastal || species.habitat != HabitatKind::Saltwater)
        .filter(|species| species.is_visible_in(context.zone));

    for species in visible {
        if context.night && context.coastal && NOCTURNAL_CEPHALOPODS.contains(&species.id) {
            recommendations.night_priority.push(species);
        } else if species.is_priority_in(context.zone) {
            recommendations.local_priority.push(species);
        } else {
            recommendations.other.push(species);
        }
    }

    for group in [
        &mut recommendations.night_priority,
        &mut recommendations.local_priority,
        &mut recommendations.other,
    ] {
        group.sort_by(|a, b| compare_labels(a.label, b.label));
    }

    tracing::debug!(
        zone = ?context.zone,
        coastal = context.coastal,
        night = context.night,
        night_priority = recommendations.night_priority.len(),
        local_priority = recommendations.local_priority.len(),
        other = recommendations.other.len(),
        "recommendations computed"
    );

    recommendations
}

/// Compares two labels the way a French reader expects.
///
/// Accents and case are ignored first; only exact ties on that key are
/// broken by the raw text, which keeps the order total.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    for c in label.chars().flat_map(char::to_lowercase) {
        match c {
            'à' | 'â' | 'ä' | 'á' | 'ã' | 'å' => key.push('a'),
            'ç' => key.push('c'),
            'é' | 'è' | 'ê' | 'ë' => key.push('e'),
            'î' | 'ï' | 'í' | 'ì' => key.push('i'),
            'ô' | 'ö' | 'ó' | 'ò' | 'õ' => key.push('o'),
            'ù' | 'û' | 'ü' | 'ú' => key.push('u'),
            'ÿ' => key.push('y'),
            'œ' => key.push_str("oe"),
            'æ' => key.push_str("ae"),
            other => key.push(other),
        }
    }
    key
}
