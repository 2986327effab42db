//! Solar day-phase classification
//!
//! This module holds the static per-month sunrise/sunset table and the pure
//! functions that classify a minute of the day into a phase (night, dawn,
//! day, dusk), decide whether night-active species should be highlighted,
//! and compute the continuous sun angle used by presentation layers.

use std::fmt;

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

/// Number of minutes in a day; valid times of day are `0..MINUTES_PER_DAY`
pub const MINUTES_PER_DAY: u16 = 1440;

/// Length of the twilight shoulders around sunrise and sunset, in minutes
const TWILIGHT_MINUTES: i32 = 60;

/// Calendar period used to look up approximate sunrise and sunset.
///
/// The serialized form is the French month name, which is also the key
/// used by the solar table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "Janvier")]
    January,
    #[serde(rename = "Février")]
    February,
    #[serde(rename = "Mars")]
    March,
    #[serde(rename = "Avril")]
    April,
    #[serde(rename = "Mai")]
    May,
    #[serde(rename = "Juin")]
    June,
    #[serde(rename = "Juillet")]
    July,
    #[serde(rename = "Août")]
    August,
    #[serde(rename = "Septembre")]
    September,
    #[serde(rename = "Octobre")]
    October,
    #[serde(rename = "Novembre")]
    November,
    #[serde(rename = "Décembre")]
    December,
}

impl Period {
    /// Returns all twelve periods in calendar order.
    pub fn all() -> &'static [Period] {
        &[
            Period::January,
            Period::February,
            Period::March,
            Period::April,
            Period::May,
            Period::June,
            Period::July,
            Period::August,
            Period::September,
            Period::October,
            Period::November,
            Period::December,
        ]
    }

    /// Returns the French month name, which doubles as the solar table key.
    pub fn label(&self) -> &'static str {
        match self {
            Period::January => "Janvier",
            Period::February => "Février",
            Period::March => "Mars",
            Period::April => "Avril",
            Period::May => "Mai",
            Period::June => "Juin",
            Period::July => "Juillet",
            Period::August => "Août",
            Period::September => "Septembre",
            Period::October => "Octobre",
            Period::November => "Novembre",
            Period::December => "Décembre",
        }
    }

    /// Maps a calendar month number (1-12) to a period.
    pub fn from_month(month: u32) -> Option<Period> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        Period::all().get(index).copied()
    }

    /// Returns the period for the current local date.
    pub fn current() -> Period {
        // chrono months are always 1-12
        Period::from_month(Local::now().month()).unwrap_or(Period::January)
    }

    /// Parses user input into a Period.
    ///
    /// Matching is case-insensitive and accepts the French month name (with
    /// or without accents), the English name, or the month number.
    ///
    /// Returns `None` if the input doesn't match any period.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Period> {
        let input = s.trim().to_lowercase();
        if let Ok(month) = input.parse::<u32>() {
            return Period::from_month(month);
        }
        let period = match input.as_str() {
            "janvier" | "january" | "jan" => Period::January,
            "février" | "fevrier" | "february" | "feb" => Period::February,
            "mars" | "march" | "mar" => Period::March,
            "avril" | "april" | "apr" => Period::April,
            "mai" | "may" => Period::May,
            "juin" | "june" | "jun" => Period::June,
            "juillet" | "july" | "jul" => Period::July,
            "août" | "aout" | "august" | "aug" => Period::August,
            "septembre" | "september" | "sep" => Period::September,
            "octobre" | "october" | "oct" => Period::October,
            "novembre" | "november" | "nov" => Period::November,
            "décembre" | "decembre" | "december" | "dec" => Period::December,
            _ => return None,
        };
        Some(period)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Approximate sunrise and sunset for a period, in minutes from midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarTimes {
    pub sunrise: u16,
    pub sunset: u16,
}

/// Window used when a period key is not recognized (06:00-18:00)
pub const FALLBACK_SOLAR_TIMES: SolarTimes = SolarTimes {
    sunrise: 360,
    sunset: 1080,
};

/// Average sunrise and sunset per month for Western Europe
static SOLAR_TABLE: [(Period, SolarTimes); 12] = [
    (Period::January, SolarTimes { sunrise: 8 * 60 + 40, sunset: 17 * 60 + 30 }),
    (Period::February, SolarTimes { sunrise: 8 * 60, sunset: 18 * 60 + 15 }),
    (Period::March, SolarTimes { sunrise: 7 * 60 + 10, sunset: 19 * 60 }),
    (Period::April, SolarTimes { sunrise: 7 * 60, sunset: 20 * 60 + 45 }),
    (Period::May, SolarTimes { sunrise: 6 * 60 + 15, sunset: 21 * 60 + 30 }),
    (Period::June, SolarTimes { sunrise: 5 * 60 + 50, sunset: 22 * 60 }),
    (Period::July, SolarTimes { sunrise: 6 * 60 + 10, sunset: 21 * 60 + 50 }),
    (Period::August, SolarTimes { sunrise: 6 * 60 + 50, sunset: 21 * 60 }),
    (Period::September, SolarTimes { sunrise: 7 * 60 + 30, sunset: 20 * 60 }),
    (Period::October, SolarTimes { sunrise: 8 * 60 + 15, sunset: 18 * 60 + 45 }),
    (Period::November, SolarTimes { sunrise: 8 * 60, sunset: 17 * 60 + 30 }),
    (Period::December, SolarTimes { sunrise: 8 * 60 + 45, sunset: 17 * 60 }),
];

impl SolarTimes {
    /// Looks up the solar times for a period.
    pub fn for_period(period: Period) -> SolarTimes {
        SOLAR_TABLE
            .iter()
            .find(|(p, _)| *p == period)
            .map(|(_, times)| *times)
            .unwrap_or(FALLBACK_SOLAR_TIMES)
    }

    /// Looks up the solar times for a raw period key such as `"Juin"`.
    ///
    /// Unknown keys silently fall back to the 06:00-18:00 window.
    pub fn for_key(key: &str) -> SolarTimes {
        Period::from_str(key)
            .map(SolarTimes::for_period)
            .unwrap_or(FALLBACK_SOLAR_TIMES)
    }

    fn dawn_start(&self) -> i32 {
        i32::from(self.sunrise) - TWILIGHT_MINUTES
    }

    fn dusk_start(&self) -> i32 {
        i32::from(self.sunset) - TWILIGHT_MINUTES
    }

    fn dusk_end(&self) -> i32 {
        i32::from(self.sunset) + TWILIGHT_MINUTES
    }
}

/// Phase of the day derived from the sun position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPhase {
    Night,
    Dawn,
    Day,
    Dusk,
}

impl DayPhase {
    /// Returns a human-readable label for the phase.
    pub fn label(&self) -> &'static str {
        match self {
            DayPhase::Night => "Nuit",
            DayPhase::Dawn => "Aube",
            DayPhase::Day => "Jour",
            DayPhase::Dusk => "Crépuscule",
        }
    }
}

/// Solar-derived reading for a given time of day and period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarReading {
    pub phase: DayPhase,
    /// Sun angle in degrees, 90 at the start of dawn to 270 at the end of dusk
    pub day_progress_angle: f32,
}

/// Classifies a minute of the day into a phase.
///
/// The dusk window runs from one hour before sunset up to and including one
/// hour after sunset.
pub fn day_phase(time: u16, times: SolarTimes) -> DayPhase {
    let t = i32::from(time);
    if t < times.dawn_start() {
        DayPhase::Night
    } else if t < i32::from(times.sunrise) {
        DayPhase::Dawn
    } else if t < times.dusk_start() {
        DayPhase::Day
    } else if t <= times.dusk_end() {
        DayPhase::Dusk
    } else {
        DayPhase::Night
    }
}

/// Returns true when night-active species should be highlighted.
///
/// Stricter than the night phase: it starts only once the full hour of
/// dusk has elapsed, so `sunset + 60` is both dusk and night here.
pub fn is_night(time: u16, times: SolarTimes) -> bool {
    let t = i32::from(time);
    t >= times.dusk_end() || t < i32::from(times.sunrise)
}

/// Computes the sun angle for presentation layers.
///
/// Inside the dawn-to-dusk window the angle moves linearly from 90 to 270
/// degrees. During the hour after dusk it stays at 270, otherwise it rests
/// at 180.
pub fn day_progress_angle(time: u16, times: SolarTimes) -> f32 {
    let t = i32::from(time);
    let (start, end) = (times.dawn_start(), times.dusk_end());
    if t >= start && t <= end {
        let progress = (t - start) as f32 / (end - start) as f32;
        90.0 + progress * 180.0
    } else if t > end && t < end + TWILIGHT_MINUTES {
        270.0
    } else {
        180.0
    }
}

/// Derives the full solar reading for a time of day and period.
pub fn read(time: u16, period: Period) -> SolarReading {
    let times = SolarTimes::for_period(period);
    SolarReading {
        phase: day_phase(time, times),
        day_progress_angle: day_progress_angle(time, times),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solar_table_covers_every_period() {
        for period in Period::all() {
            let times = SolarTimes::for_period(*period);
            assert!(times.sunrise < times.sunset, "{:?}", period);
            assert!(times.sunset < MINUTES_PER_DAY, "{:?}", period);
            assert!(
                SOLAR_TABLE.iter().any(|(p, _)| p == period),
                "{:?} missing from table",
                period
            );
        }
    }

    #[test]
    fn test_june_solar_times() {
        let june = SolarTimes::for_period(Period::June);
        assert_eq!(june.sunrise, 350);
        assert_eq!(june.sunset, 1320);
    }

    #[test]
    fn test_unknown_key_falls_back_to_six_to_six() {
        assert_eq!(SolarTimes::for_key("Brumaire"), FALLBACK_SOLAR_TIMES);
        assert_eq!(SolarTimes::for_key("Juin"), SolarTimes::for_period(Period::June));
    }

    #[test]
    fn test_period_from_str_aliases() {
        assert_eq!(Period::from_str("Juin"), Some(Period::June));
        assert_eq!(Period::from_str("june"), Some(Period::June));
        assert_eq!(Period::from_str("6"), Some(Period::June));
        assert_eq!(Period::from_str("Août"), Some(Period::August));
        assert_eq!(Period::from_str("aout"), Some(Period::August));
        assert_eq!(Period::from_str("DÉCEMBRE"), Some(Period::December));
        assert_eq!(Period::from_str("13"), None);
        assert_eq!(Period::from_str("0"), None);
        assert_eq!(Period::from_str("thermidor"), None);
    }

    #[test]
    fn test_period_serializes_as_french_key() {
        let json = serde_json::to_string(&Period::February).unwrap();
        assert_eq!(json, "\"Février\"");
        let back: Period = serde_json::from_str("\"Juin\"").unwrap();
        assert_eq!(back, Period::June);
    }

    #[test]
    fn test_june_early_morning_is_night() {
        let reading = read(100, Period::June);
        assert_eq!(reading.phase, DayPhase::Night);
        assert!(is_night(100, SolarTimes::for_period(Period::June)));
    }

    #[test]
    fn test_june_midday_is_day() {
        assert_eq!(read(700, Period::June).phase, DayPhase::Day);
    }

    #[test]
    fn test_phase_boundaries() {
        // June: dawn 290..350, day 350..1260, dusk 1260..=1380
        let june = SolarTimes::for_period(Period::June);
        assert_eq!(day_phase(289, june), DayPhase::Night);
        assert_eq!(day_phase(290, june), DayPhase::Dawn);
        assert_eq!(day_phase(349, june), DayPhase::Dawn);
        assert_eq!(day_phase(350, june), DayPhase::Day);
        assert_eq!(day_phase(1259, june), DayPhase::Day);
        assert_eq!(day_phase(1260, june), DayPhase::Dusk);
        assert_eq!(day_phase(1380, june), DayPhase::Dusk);
        assert_eq!(day_phase(1381, june), DayPhase::Night);
    }

    #[test]
    fn test_dusk_end_is_both_dusk_and_night() {
        let june = SolarTimes::for_period(Period::June);
        assert_eq!(day_phase(1380, june), DayPhase::Dusk);
        assert!(is_night(1380, june));
        assert!(!is_night(1379, june));
    }

    #[test]
    fn test_is_night_turns_off_at_sunrise() {
        let june = SolarTimes::for_period(Period::June);
        assert!(is_night(349, june));
        assert!(!is_night(350, june));
    }

    #[test]
    fn test_phases_partition_every_day() {
        for period in Period::all() {
            let times = SolarTimes::for_period(*period);
            let mut previous = day_phase(0, times);
            let mut transitions = Vec::new();
            for time in 1..MINUTES_PER_DAY {
                let phase = day_phase(time, times);
                if phase != previous {
                    transitions.push(phase);
                    previous = phase;
                }
            }
            // night -> dawn -> day -> dusk -> night, each window contiguous
            assert_eq!(
                transitions,
                vec![DayPhase::Dawn, DayPhase::Day, DayPhase::Dusk, DayPhase::Night],
                "{:?}",
                period
            );
        }
    }

    #[test]
    fn test_progress_angle_spans_dawn_to_dusk() {
        let june = SolarTimes::for_period(Period::June);
        assert!((day_progress_angle(290, june) - 90.0).abs() < 0.001);
        assert!((day_progress_angle(1380, june) - 270.0).abs() < 0.001);
        // midpoint of 290..=1380
        assert!((day_progress_angle(835, june) - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_angle_outside_window() {
        // December: dusk ends at 1080
        let december = SolarTimes::for_period(Period::December);
        assert_eq!(day_progress_angle(1100, december), 270.0);
        assert_eq!(day_progress_angle(1140, december), 180.0);
        assert_eq!(day_progress_angle(100, december), 180.0);
    }

    #[test]
    fn test_progress_angle_is_monotonic_in_window() {
        let times = SolarTimes::for_period(Period::March);
        let mut last = 0.0;
        for time in 370..=1200 {
            let angle = day_progress_angle(time, times);
            assert!(angle >= last);
            last = angle;
        }
    }
}
