//! Command-line interface parsing for Tacklor
//!
//! Turns the command line (plus an optional JSON preset file) into a
//! [`StartupConfig`]: the initial change applied to a fresh conditions
//! store, and what the binary should do with it afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use crate::data::species::get_species_by_id;
use crate::data::{
    BottomType, ConditionsUpdate, Coordinates, CoordinatesError, DepthRange, ExpertiseLevel,
    Technique, WaterType, WindDirection,
};
use crate::labels;
use crate::solar::Period;
use crate::strategy::DEFAULT_MODEL;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid month: '{0}'. Use a French or English month name, or 1-12")]
    InvalidPeriod(String),

    #[error("Invalid time: '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid water type: '{0}'. Valid types: river, fleuve, lake, pond, canal, dam, sea, jetty, beach, cliffs, harbour, estuary")]
    InvalidWaterType(String),

    #[error("Invalid bottom type: '{0}'. Valid types: mud, weed, rock, sand, oysters")]
    InvalidBottomType(String),

    #[error("Invalid technique: '{0}'. Valid techniques: lures, bait")]
    InvalidTechnique(String),

    #[error("Invalid wind direction: '{0}'. Valid directions: N, NE, E, SE, S, SW, W, NW")]
    InvalidWindDirection(String),

    #[error("Unknown species: '{0}'")]
    InvalidSpecies(String),

    #[error("Invalid depth range: '{0}'. Expected MIN-MAX in metres with MIN <= MAX")]
    InvalidDepth(String),

    #[error(transparent)]
    InvalidCoordinates(#[from] CoordinatesError),

    #[error("Failed to read preset {path}: {source}")]
    PresetRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid preset {path}: {source}")]
    PresetParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Tacklor - fishing conditions and strategy assistant
#[derive(Parser, Debug)]
#[command(name = "tacklor")]
#[command(about = "Describe your fishing spot, get species suggestions and a strategy")]
#[command(version)]
pub struct Cli {
    /// JSON preset file with conditions (camelCase keys), applied before other flags
    #[arg(long, value_name = "FILE")]
    pub preset: Option<PathBuf>,

    /// Month, e.g. "juin", "june" or 6
    #[arg(long, value_name = "MONTH")]
    pub month: Option<String>,

    /// Time of day, HH:MM
    #[arg(long, value_name = "HH:MM")]
    pub time: Option<String>,

    /// Weather, 0 (storm) to 100 (full sun)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub weather: Option<u8>,

    /// Water clarity, 0 (muddy) to 100 (crystal clear)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub clarity: Option<u8>,

    /// Water type, e.g. river, lake, harbour, estuary
    #[arg(long, value_name = "TYPE")]
    pub water: Option<String>,

    /// Bottom type: mud, weed, rock, sand, oysters
    #[arg(long, value_name = "TYPE")]
    pub bottom: Option<String>,

    /// Target species id, e.g. brochet, bar, calamar
    #[arg(long, value_name = "SPECIES")]
    pub fish: Option<String>,

    /// Technique: lures or bait
    #[arg(long)]
    pub technique: Option<String>,

    /// Tide, 0 (low) through 50 (high) back to 100 (low)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub tide: Option<u8>,

    /// Wind strength, 0 (calm) to 100 (storm)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub wind: Option<u8>,

    /// Current, 0 (stagnant) to 100 (strong)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub flow: Option<u8>,

    /// Wind direction relative to you facing the water: N, NE, E, SE, S, SW, W, NW
    #[arg(long, value_name = "DIR")]
    pub wind_dir: Option<String>,

    /// Water surface, 0 (mirror) to 100 (heavy swell)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub surface: Option<u8>,

    /// Atmospheric pressure in hPa
    #[arg(long, value_name = "HPA")]
    pub pressure: Option<u16>,

    /// Depth range in metres, MIN-MAX
    #[arg(long, value_name = "MIN-MAX")]
    pub depth: Option<String>,

    /// French department, e.g. "Finistère"
    #[arg(long, value_name = "DEPARTMENT")]
    pub region: Option<String>,

    /// Fetch live weather and department for a position
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    pub at: Option<String>,

    /// Switch to expert mode (needs department, water, bottom and wind direction)
    #[arg(long)]
    pub expert: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Ask the strategy generator for a fishing strategy
    #[arg(long)]
    pub strategy: bool,

    /// API key for the strategy generator
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used by the strategy generator
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// OpenWeatherMap API key (Open-Meteo is used without one)
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub openweather_key: Option<String>,
}

/// How the report is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings for the strategy request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyConfig {
    pub api_key: Option<String>,
    pub model: String,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Initial change, without the expertise level
    pub update: ConditionsUpdate,
    /// Whether expert mode should be requested once everything else is set
    pub expert: bool,
    /// Position to sync weather for
    pub location: Option<Coordinates>,
    pub output: OutputFormat,
    /// Present when a strategy was requested
    pub strategy: Option<StrategyConfig>,
    pub openweather_key: Option<String>,
}

pub fn parse_period_arg(s: &str) -> Result<Period, CliError> {
    Period::from_str(s).ok_or_else(|| CliError::InvalidPeriod(s.to_string()))
}

pub fn parse_time_arg(s: &str) -> Result<u16, CliError> {
    labels::parse_time(s).ok_or_else(|| CliError::InvalidTime(s.to_string()))
}

pub fn parse_water_arg(s: &str) -> Result<WaterType, CliError> {
    WaterType::from_str(s).ok_or_else(|| CliError::InvalidWaterType(s.to_string()))
}

pub fn parse_bottom_arg(s: &str) -> Result<BottomType, CliError> {
    BottomType::from_str(s).ok_or_else(|| CliError::InvalidBottomType(s.to_string()))
}

pub fn parse_technique_arg(s: &str) -> Result<Technique, CliError> {
    Technique::from_str(s).ok_or_else(|| CliError::InvalidTechnique(s.to_string()))
}

pub fn parse_wind_dir_arg(s: &str) -> Result<WindDirection, CliError> {
    WindDirection::from_str(s).ok_or_else(|| CliError::InvalidWindDirection(s.to_string()))
}

/// Accepts a catalog id, case-insensitively.
pub fn parse_fish_arg(s: &str) -> Result<String, CliError> {
    let id = s.trim().to_lowercase();
    get_species_by_id(&id)
        .map(|species| species.id.to_string())
        .ok_or_else(|| CliError::InvalidSpecies(s.to_string()))
}

/// Parses `MIN-MAX`, e.g. `2-8`.
pub fn parse_depth_arg(s: &str) -> Result<DepthRange, CliError> {
    let invalid = || CliError::InvalidDepth(s.to_string());
    let (min, max) = s.split_once('-').ok_or_else(invalid)?;
    let min: u16 = min.trim().parse().map_err(|_| invalid())?;
    let max: u16 = max.trim().parse().map_err(|_| invalid())?;
    if min > max {
        return Err(invalid());
    }
    Ok(DepthRange { min, max })
}

/// Reads a JSON preset into a conditions change.
pub fn load_preset(path: &Path) -> Result<ConditionsUpdate, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::PresetRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::PresetParse {
        path: path.to_path_buf(),
        source,
    })
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// Flags override preset values field by field. An expertise level in
    /// the preset is lifted out of the change so that it can be requested
    /// last, once every other field is in place.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let preset = match &cli.preset {
            Some(path) => load_preset(path)?,
            None => ConditionsUpdate::default(),
        };

        let flags = ConditionsUpdate {
            period: cli.month.as_deref().map(parse_period_arg).transpose()?,
            time: cli.time.as_deref().map(parse_time_arg).transpose()?,
            weather: cli.weather,
            water_clarity: cli.clarity,
            water_type: cli
                .water
                .as_deref()
                .map(parse_water_arg)
                .transpose()?
                .map(Some),
            bottom_type: cli
                .bottom
                .as_deref()
                .map(parse_bottom_arg)
                .transpose()?
                .map(Some),
            target_fish: cli.fish.as_deref().map(parse_fish_arg).transpose()?,
            technique: cli.technique.as_deref().map(parse_technique_arg).transpose()?,
            tide_level: cli.tide,
            wind: cli.wind,
            water_flow: cli.flow,
            wind_direction: cli
                .wind_dir
                .as_deref()
                .map(parse_wind_dir_arg)
                .transpose()?
                .map(Some),
            water_surface: cli.surface,
            pressure: cli.pressure,
            depth: cli.depth.as_deref().map(parse_depth_arg).transpose()?,
            region: cli.region.clone().map(Some),
            coordinates: None,
            expertise_level: None,
        };

        let mut update = preset.merge(flags);
        let expert = cli.expert || update.expertise_level == Some(ExpertiseLevel::Expert);
        update.expertise_level = None;

        let location = cli.at.as_deref().map(Coordinates::parse).transpose()?;

        Ok(StartupConfig {
            update,
            expert,
            location,
            output: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            strategy: cli.strategy.then(|| StrategyConfig {
                api_key: cli.api_key.clone(),
                model: cli.model.clone(),
            }),
            openweather_key: cli.openweather_key.clone(),
        })
    }
}
