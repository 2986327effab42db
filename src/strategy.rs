//! Strategy generation
//!
//! Sends the settled conditions to a generative model (Gemini
//! `generateContent`) and returns the free-text fishing strategy. The core
//! never interprets or retries the answer.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::species::get_species_by_id;
use crate::data::{ExpertiseLevel, FishingConditions};
use crate::labels;
use crate::store::{ConditionsStore, DerivedView, StoreError};

/// Base URL for the Gemini models API
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Errors that can occur when requesting a strategy
#[derive(Debug, Error)]
pub enum StrategyError {
    /// No API key configured
    #[error("No API key configured (set GEMINI_API_KEY or pass --api-key)")]
    MissingApiKey,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with an error
    #[error("Strategy service error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The model returned no text
    #[error("The strategy service returned an empty answer")]
    EmptyResponse,
}

/// Errors from asking a strategy for the current store
#[derive(Debug, Error)]
pub enum StrategyRequestError {
    /// The snapshot is not ready to be submitted
    #[error(transparent)]
    NotReady(#[from] StoreError),

    #[error(transparent)]
    Strategy(#[from] StrategyError),
}

/// Client for the strategy-generation service
#[derive(Debug, Clone)]
pub struct StrategyClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl StrategyClient {
    /// Create a client for the default model
    pub fn new(api_key: impl Into<String>) -> Result<Self, StrategyError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(StrategyError::MissingApiKey);
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Request a strategy for a snapshot.
    ///
    /// The snapshot must already be the submission copy (see
    /// `ConditionsStore::submission_snapshot`).
    pub async fn generate(
        &self,
        conditions: &FishingConditions,
        derived: &DerivedView,
    ) -> Result<String, StrategyError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(conditions, derived),
                }],
            }],
        };

        tracing::info!(model = %self.model, expertise = ?conditions.expertise_level, "requesting strategy");
        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(StrategyError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }
        parse_strategy(&text)
    }
}

/// Requests a strategy for the store's submission snapshot.
///
/// Checks the snapshot and the key before any request is sent.
pub async fn request_for_store(
    store: &ConditionsStore,
    api_key: Option<&str>,
    model: &str,
) -> Result<String, StrategyRequestError> {
    let snapshot = store.submission_snapshot()?;
    let client = StrategyClient::new(api_key.unwrap_or_default())?.with_model(model);
    Ok(client.generate(&snapshot, store.derived()).await?)
}

/// Builds the prompt sent to the model.
pub fn build_prompt(conditions: &FishingConditions, derived: &DerivedView) -> String {
    let species = get_species_by_id(&conditions.target_fish)
        .map(|s| s.label)
        .unwrap_or(conditions.target_fish.as_str());
    let water = conditions.water_type.map_or("Non renseigné", |w| w.label());
    let bottom = conditions.bottom_type.map_or("Non renseigné", |b| b.label());
    let region = conditions.region.as_deref().unwrap_or("Non renseigné");

    let mut prompt = String::new();
    prompt.push_str("Tu es Tacklor, un guide de pêche expérimenté en France.\n");
    prompt.push_str("Propose une stratégie de pêche concrète pour les conditions suivantes.\n\n");
    prompt.push_str(&format!("- Département : {} (zone {})\n", region, derived.zone));
    prompt.push_str(&format!(
        "- Période : {}, {} ({})\n",
        conditions.period,
        labels::format_time(conditions.time),
        derived.phase.label()
    ));
    prompt.push_str(&format!("- Météo : {}\n", labels::weather_label(conditions.weather)));
    prompt.push_str(&format!(
        "- Pression : {} hPa, {}\n",
        conditions.pressure,
        labels::pressure_status(conditions.pressure)
    ));
    prompt.push_str(&format!(
        "- Vent : {}, {}\n",
        labels::wind_label(conditions.wind),
        labels::wind_direction_label(conditions.wind_direction)
    ));
    prompt.push_str(&format!("- Type d'eau : {}\n", water));
    prompt.push_str(&format!("- Fond : {}\n", bottom));
    prompt.push_str(&format!(
        "- Clarté de l'eau : {}\n",
        labels::clarity_label(conditions.water_clarity)
    ));
    if conditions.water_type.is_some_and(|w| w.has_current()) {
        prompt.push_str(&format!(
            "- Courant : {}\n",
            labels::water_flow_label(conditions.water_flow)
        ));
    }
    if conditions.water_type.is_some_and(|w| w.is_saltwater()) {
        prompt.push_str(&format!("- Marée : {}\n", labels::tide_label(conditions.tide_level)));
    }
    prompt.push_str(&format!(
        "- Surface : {}\n",
        labels::surface_label(conditions.water_surface)
    ));
    prompt.push_str(&format!(
        "- Profondeur : {} à {} m\n",
        conditions.depth.min, conditions.depth.max
    ));
    prompt.push_str(&format!("- Espèce visée : {}\n", species));
    prompt.push_str(&format!("- Technique : {}\n\n", conditions.technique.label()));

    match conditions.expertise_level {
        ExpertiseLevel::Beginner => prompt.push_str(
            "Le pêcheur débute : reste simple, explique le matériel et les gestes essentiels.\n",
        ),
        ExpertiseLevel::Expert => prompt.push_str(
            "Le pêcheur est expérimenté : donne des montages précis, les postes à prospecter, \
             les animations et l'influence du vent et de la marée.\n",
        ),
    }
    prompt
}

fn parse_strategy(body: &str) -> Result<String, StrategyError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(StrategyError::EmptyResponse);
    }
    Ok(text)
}

/// Extracts the message from an API error body, or returns the body as is.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
