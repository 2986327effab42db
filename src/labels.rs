//! Human-readable labels for slider values
//!
//! Every 0-100 slider in the conditions snapshot maps to a short French
//! description. These are used by the text report and in the prompt sent
//! to the strategy generator.

use chrono::{NaiveTime, Timelike};

use crate::data::WindDirection;

pub fn weather_label(value: u8) -> &'static str {
    match value {
        0..=15 => "Orageux",
        16..=31 => "Pluie",
        32..=47 => "Temps gris",
        48..=63 => "Nuageux",
        64..=79 => "Éclaircies",
        _ => "Plein Soleil",
    }
}

pub fn clarity_label(value: u8) -> &'static str {
    match value {
        0..=19 => "Boueuse",
        20..=39 => "Trouble",
        40..=59 => "Teintée",
        60..=79 => "Claire",
        _ => "Cristalline",
    }
}

/// The tide slider runs low (0) to high (50) and back to low (100).
pub fn tide_label(value: u8) -> &'static str {
    match value {
        0..=15 => "Basse mer (étale)",
        16..=44 => "Montante",
        45..=55 => "Pleine mer (étale)",
        56..=84 => "Descendante",
        _ => "Basse mer (étale)",
    }
}

pub fn wind_label(value: u8) -> &'static str {
    match value {
        0..=19 => "Calme plat",
        20..=39 => "Brise légère",
        40..=59 => "Vent modéré",
        60..=79 => "Vent soutenu",
        _ => "Tempête / Rafales",
    }
}

pub fn water_flow_label(value: u8) -> &'static str {
    match value {
        0..=19 => "Nul / Stagnant",
        20..=39 => "Lent / Faible",
        40..=59 => "Moyen",
        60..=79 => "Soutenu",
        _ => "Puissant / Fort",
    }
}

pub fn surface_label(value: u8) -> &'static str {
    match value {
        0..=9 => "Miroir / Calme plat",
        10..=29 => "Petites rides",
        30..=49 => "Vaguelettes / Clapot",
        50..=69 => "Vagues modérées",
        70..=89 => "Houle prononcée",
        _ => "Démontée / Écume",
    }
}

/// Describes the wind relative to an angler facing the water.
pub fn wind_direction_label(direction: Option<WindDirection>) -> &'static str {
    match direction {
        Some(WindDirection::North) => "De face (Venant du large)",
        Some(WindDirection::NorthEast) => "3/4 Face (Gauche)",
        Some(WindDirection::East) => "Latéral (Venant de gauche)",
        Some(WindDirection::SouthEast) => "3/4 Dos (Gauche)",
        Some(WindDirection::South) => "De dos (Venant de terre)",
        Some(WindDirection::SouthWest) => "3/4 Dos (Droite)",
        Some(WindDirection::West) => "Latéral (Venant de droite)",
        Some(WindDirection::NorthWest) => "3/4 Face (Droite)",
        None => "Non renseigné",
    }
}

/// Rough effect of atmospheric pressure (hPa) on fish activity.
pub fn pressure_status(hpa: u16) -> &'static str {
    match hpa {
        0..=1004 => "Basse pression - Poissons potentiellement apathiques ou en profondeur.",
        1005..=1015 => "Pression stable - Conditions normales.",
        _ => "Haute pression - Activité de surface possible.",
    }
}

/// Formats minutes from midnight as `HH:MM`.
pub fn format_time(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parses `HH:MM` into minutes from midnight.
pub fn parse_time(s: &str) -> Option<u16> {
    let time = NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()?;
    u16::try_from(time.hour() * 60 + time.minute()).ok()
}
