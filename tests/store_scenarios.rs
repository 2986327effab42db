//! End-to-end checks of the conditions store through its public API

use tacklor::data::{
    BottomType, ConditionsUpdate, ExpertiseLevel, FishingConditions, WaterType, WindDirection,
};
use tacklor::solar::{DayPhase, Period};
use tacklor::store::{ConditionsStore, StoreError};
use tacklor::zones::GeoZone;

fn june_store() -> ConditionsStore {
    ConditionsStore::new(FishingConditions::for_period(Period::June))
}

fn set_time(store: &mut ConditionsStore, time: u16) {
    store
        .update(ConditionsUpdate {
            time: Some(time),
            ..Default::default()
        })
        .unwrap();
}

#[test]
fn test_june_early_morning_is_night() {
    let mut store = june_store();
    set_time(&mut store, 100);
    assert_eq!(store.derived().phase, DayPhase::Night);
    assert!(store.derived().is_night);
}

#[test]
fn test_june_midday_is_day() {
    let mut store = june_store();
    set_time(&mut store, 700);
    assert_eq!(store.derived().phase, DayPhase::Day);
    assert!(!store.derived().is_night);
}

#[test]
fn test_finistere_after_dusk_puts_calamar_first() {
    let mut store = june_store();
    store
        .update(ConditionsUpdate {
            region: Some(Some("Finistère".to_string())),
            time: Some(1400),
            ..Default::default()
        })
        .unwrap();
    let derived = store.derived();
    assert!(derived.coastal);
    assert_eq!(derived.zone, GeoZone::AtlanticChannel);
    assert!(derived
        .recommendations
        .night_priority
        .iter()
        .any(|s| s.id == "calamar"));
}

#[test]
fn test_expert_rejected_without_prerequisites() {
    let mut store = june_store();
    let err = store.set_expertise(ExpertiseLevel::Expert).unwrap_err();
    assert_eq!(err, StoreError::ExpertLocked);
    assert_eq!(store.conditions().expertise_level, ExpertiseLevel::Beginner);
}

#[test]
fn test_clearing_region_downgrades_expert_in_same_update() {
    let mut store = june_store();
    store
        .update(ConditionsUpdate {
            region: Some(Some("Gironde".to_string())),
            water_type: Some(Some(WaterType::Estuary)),
            bottom_type: Some(Some(BottomType::Sand)),
            wind_direction: Some(Some(WindDirection::SouthWest)),
            ..Default::default()
        })
        .unwrap();
    store.set_expertise(ExpertiseLevel::Expert).unwrap();
    assert_eq!(store.conditions().expertise_level, ExpertiseLevel::Expert);

    let settled = store
        .update(ConditionsUpdate {
            region: Some(None),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(settled.expertise_level, ExpertiseLevel::Beginner);
}

#[test]
fn test_dusk_end_is_both_dusk_and_night() {
    let mut store = june_store();
    set_time(&mut store, 1380);
    assert_eq!(store.derived().phase, DayPhase::Dusk);
    assert!(store.derived().is_night);
}

#[test]
fn test_target_always_visible_after_each_update() {
    let mut store = june_store();
    let regions = [
        Some("Guyane"),
        Some("Cantal"),
        Some("Martinique"),
        None,
        Some("Bouches-du-Rhône"),
        Some("Finistère"),
    ];
    for (i, region) in regions.into_iter().enumerate() {
        store
            .update(ConditionsUpdate {
                region: Some(region.map(str::to_string)),
                time: Some(if i % 2 == 0 { 1430 } else { 600 }),
                ..Default::default()
            })
            .unwrap();
        let derived = store.derived();
        assert!(
            derived.recommendations.contains(&store.conditions().target_fish),
            "{:?}: target {} not visible",
            region,
            store.conditions().target_fish
        );
    }
}

#[test]
fn test_preset_json_drives_the_store() {
    let change: ConditionsUpdate = serde_json::from_str(
        r#"{"region": "Var", "waterType": "cliffs", "bottomType": "rock",
            "windDirection": "E", "targetFish": "daurade", "expertiseLevel": "expert"}"#,
    )
    .unwrap();
    let mut store = june_store();
    let settled = store.update(change).unwrap();
    assert_eq!(settled.expertise_level, ExpertiseLevel::Expert);
    assert_eq!(settled.target_fish, "daurade");
    assert_eq!(store.derived().zone, GeoZone::Mediterranean);

    // explicit null clears the field and drops expert mode
    let clear: ConditionsUpdate = serde_json::from_str(r#"{"windDirection": null}"#).unwrap();
    let settled = store.update(clear).unwrap();
    assert_eq!(settled.wind_direction, None);
    assert_eq!(settled.expertise_level, ExpertiseLevel::Beginner);
}
