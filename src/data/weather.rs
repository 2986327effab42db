//! Live weather for the angler's position
//!
//! Fetches current conditions from OpenWeatherMap (when an API key is
//! configured) with Open-Meteo as the fallback, looks up the department in
//! parallel, and maps everything onto the 0-100 scales used by the
//! conditions snapshot.

use chrono::{Datelike, Local, Timelike};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::region::RegionClient;
use super::{ConditionsUpdate, Coordinates, WindDirection};
use crate::solar::Period;

/// Base URL for the OpenWeatherMap current weather API
const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Base URL for the Open-Meteo API
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// City name used when the provider does not return one
const UNNAMED_POSITION: &str = "Position actuelle";

/// Weather snapshot ready to be applied to the conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// 0 (storm) to 100 (full sun)
    pub weather_score: u8,
    /// 0 (calm) to 100 (storm)
    pub wind_score: u8,
    pub wind_direction: WindDirection,
    /// Local minutes from midnight when the report was built
    pub time_of_day: u16,
    pub period: Period,
    pub pressure_hpa: f64,
    /// Department name, if the lookup succeeded
    pub region: Option<String>,
    pub city_name: String,
}

impl WeatherReport {
    /// Converts the report into a conditions change.
    ///
    /// The region is only overwritten when the lookup found one, so a
    /// failed lookup keeps whatever department was already chosen.
    pub fn into_update(self, coordinates: Coordinates) -> ConditionsUpdate {
        ConditionsUpdate {
            weather: Some(self.weather_score),
            wind: Some(self.wind_score),
            wind_direction: Some(Some(self.wind_direction)),
            time: Some(self.time_of_day),
            period: Some(self.period),
            pressure: Some(self.pressure_hpa.round().clamp(0.0, f64::from(u16::MAX)) as u16),
            region: self.region.map(Some),
            coordinates: Some(Some(coordinates)),
            ..Default::default()
        }
    }

    /// Short description of where the report applies.
    pub fn location(&self) -> String {
        match &self.region {
            Some(region) => format!("{} ({})", self.city_name, region),
            None => self.city_name.clone(),
        }
    }
}

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Weather provider returned status {0}")]
    Status(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Every provider failed
    #[error("Weather unavailable (all providers failed): {0}")]
    Unavailable(String),
}

/// Provider-independent reading before the clock and region are attached
#[derive(Debug, Clone, PartialEq)]
struct Observation {
    weather_score: u8,
    wind_score: u8,
    wind_direction: WindDirection,
    pressure_hpa: f64,
    city_name: String,
}

/// Client for fetching weather data for a position
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    openweather_key: Option<String>,
    openweather_url: String,
    open_meteo_url: String,
    region_client: RegionClient,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    /// Create a new WeatherClient using Open-Meteo only
    pub fn new() -> Self {
        let client = Client::new();
        Self {
            region_client: RegionClient::with_client(client.clone()),
            client,
            openweather_key: None,
            openweather_url: OPENWEATHER_BASE_URL.to_string(),
            open_meteo_url: OPEN_METEO_BASE_URL.to_string(),
        }
    }

    /// Use OpenWeatherMap as the primary provider
    pub fn with_openweather_key(mut self, key: impl Into<String>) -> Self {
        self.openweather_key = Some(key.into());
        self
    }

    /// Override provider URLs
    pub fn with_base_urls(
        mut self,
        openweather_url: impl Into<String>,
        open_meteo_url: impl Into<String>,
    ) -> Self {
        self.openweather_url = openweather_url.into();
        self.open_meteo_url = open_meteo_url.into();
        self
    }

    /// Override the department lookup client
    pub fn with_region_client(mut self, region_client: RegionClient) -> Self {
        self.region_client = region_client;
        self
    }

    /// Fetch current weather and department for the given position
    ///
    /// # Returns
    /// * `Ok(WeatherReport)` - Weather mapped onto the conditions scales
    /// * `Err(WeatherError::Unavailable)` - If every provider failed
    pub async fn fetch_local_weather(
        &self,
        coordinates: Coordinates,
    ) -> Result<WeatherReport, WeatherError> {
        let (primary, region) = futures::join!(
            self.fetch_openweather(coordinates),
            self.region_client
                .department_for(coordinates.lat, coordinates.lon)
        );

        let region = region.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "department lookup failed");
            None
        });

        let observation = match primary {
            Ok(Some(observation)) => observation,
            Ok(None) => self.fallback(coordinates).await?,
            Err(e) => {
                tracing::warn!(error = %e, "OpenWeatherMap failed, falling back to Open-Meteo");
                self.fallback(coordinates).await?
            }
        };

        let (time_of_day, period) = local_clock();
        Ok(WeatherReport {
            weather_score: observation.weather_score,
            wind_score: observation.wind_score,
            wind_direction: observation.wind_direction,
            time_of_day,
            period,
            pressure_hpa: observation.pressure_hpa,
            region,
            city_name: observation.city_name,
        })
    }

    async fn fallback(&self, coordinates: Coordinates) -> Result<Observation, WeatherError> {
        self.fetch_open_meteo(coordinates).await.map_err(|e| {
            tracing::error!(error = %e, "all weather providers failed");
            WeatherError::Unavailable(e.to_string())
        })
    }

    /// Returns `Ok(None)` when no OpenWeatherMap key is configured
    async fn fetch_openweather(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<Observation>, WeatherError> {
        let Some(key) = &self.openweather_key else {
            return Ok(None);
        };
        let url = format!(
            "{}?lat={}&lon={}&appid={}&units=metric&lang=fr",
            self.openweather_url, coordinates.lat, coordinates.lon, key
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }
        let text = response.text().await?;
        parse_openweather(&text).map(Some)
    }

    async fn fetch_open_meteo(&self, coordinates: Coordinates) -> Result<Observation, WeatherError> {
        let url = format!(
            "{}?latitude={}&longitude={}&current=surface_pressure,weather_code,wind_speed_10m,wind_direction_10m&wind_speed_unit=ms",
            self.open_meteo_url, coordinates.lat, coordinates.lon
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }
        let text = response.text().await?;
        parse_open_meteo(&text)
    }
}

/// Current local time of day and period
fn local_clock() -> (u16, Period) {
    let now = Local::now();
    let minutes = (now.hour() * 60 + now.minute()) as u16;
    // chrono months are always 1-12
    let period = Period::from_month(now.month()).unwrap_or(Period::January);
    (minutes, period)
}

fn parse_openweather(body: &str) -> Result<Observation, WeatherError> {
    let response: OpenWeatherResponse = serde_json::from_str(body)?;
    let condition = response
        .weather
        .first()
        .ok_or_else(|| WeatherError::MissingField("weather".to_string()))?;

    Ok(Observation {
        weather_score: openweather_condition_to_score(condition.id),
        wind_score: wind_speed_to_score(response.wind.speed),
        wind_direction: WindDirection::from_degrees(response.wind.deg),
        pressure_hpa: response.main.pressure,
        city_name: response
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNNAMED_POSITION.to_string()),
    })
}

fn parse_open_meteo(body: &str) -> Result<Observation, WeatherError> {
    let response: OpenMeteoResponse = serde_json::from_str(body)?;
    let current = response.current;

    Ok(Observation {
        weather_score: wmo_code_to_score(current.weather_code),
        wind_score: wind_speed_to_score(current.wind_speed_10m),
        wind_direction: WindDirection::from_degrees(current.wind_direction_10m),
        pressure_hpa: current.surface_pressure,
        city_name: UNNAMED_POSITION.to_string(),
    })
}

/// Map an OpenWeatherMap condition id to a 0-100 weather score
///
/// Ids are grouped by hundreds: 2xx thunderstorm, 3xx drizzle, 5xx rain,
/// 6xx snow, 7xx atmosphere (fog, haze), 800 clear, 801-804 clouds.
pub fn openweather_condition_to_score(id: u16) -> u8 {
    match id {
        200..=299 => 10,
        300..=399 => 25,
        500..=599 => 20,
        600..=699 => 35,
        700..=799 => 40,
        800 => 95,
        801 => 85,
        802 => 70,
        803 => 60,
        804 => 50,
        _ => 50,
    }
}

/// Map a WMO weather code to a 0-100 weather score
///
/// - 0: Clear sky
/// - 1-3: Mainly clear to overcast
/// - 45, 48: Fog
/// - 51-67: Drizzle and rain
/// - 71-77: Snow
/// - 80-82: Rain showers
/// - 85-99: Snow showers and thunderstorms
pub fn wmo_code_to_score(code: u8) -> u8 {
    match code {
        0 => 95,
        1..=3 => 70,
        4..=48 => 40,
        49..=67 => 25,
        68..=77 => 35,
        78..=82 => 25,
        83..=99 => 10,
        _ => 50,
    }
}

/// Map wind speed in m/s onto 0-100 (20 m/s and above is 100)
pub fn wind_speed_to_score(speed_ms: f64) -> u8 {
    (speed_ms * 5.0).clamp(0.0, 100.0).round() as u8
}

/// OpenWeatherMap response structure
#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    weather: Vec<OpenWeatherCondition>,
    main: OpenWeatherMain,
    wind: OpenWeatherWind,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    id: u16,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

/// Open-Meteo API response structure
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: OpenMeteoCurrent,
}

/// Current weather data from Open-Meteo
#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    surface_pressure: f64,
    weather_code: u8,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
}
