//! Hugging Face text-generation backend.
//!
//! Posts the rendered prompt to an inference endpoint and returns the
//! generated continuation. Every failure is reported as an
//! [`EnhanceError`]; nothing here panics or retries.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use copt_core::settings::EnhanceSettings;
use copt_core::{EnhanceError, EnhanceRequest, Enhancer};

use super::dotenv;

/// Longest slice of an error body quoted back in messages.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    temperature: f64,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct Generation {
    generated_text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Many(Vec<Generation>),
    One(Generation),
}

#[derive(Deserialize)]
struct ApiError {
    error: String,
}

pub struct HfEnhancer {
    agent: ureq::Agent,
    settings: EnhanceSettings,
    api_key: Option<String>,
}

impl HfEnhancer {
    pub fn new(settings: &EnhanceSettings, api_key: Option<String>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(settings.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            settings: settings.clone(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Read the API key from the environment variable named in settings,
    /// falling back to a `.env` file in the working directory.
    pub fn from_env(settings: &EnhanceSettings) -> Self {
        let key = dotenv::api_key(&settings.api_key_env, Path::new(dotenv::DOTENV_FILE));
        Self::new(settings, key)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Enhancer for HfEnhancer {
    fn enhance(&self, request: &EnhanceRequest<'_>) -> Result<String, EnhanceError> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(EnhanceError::auth(format!(
                "{} is not set",
                self.settings.api_key_env
            )));
        };

        let prompt = self.settings.render_prompt(request.source, request.rule_based);
        let body = serde_json::to_string(&GenerateRequest {
            inputs: &prompt,
            parameters: GenerateParameters {
                max_new_tokens: self.settings.max_new_tokens,
                temperature: self.settings.temperature,
                return_full_text: false,
            },
        })
        .map_err(|e| EnhanceError::malformed(format!("request encoding: {e}")))?;

        debug!(
            endpoint = %self.settings.endpoint,
            prompt_chars = prompt.chars().count(),
            "enhancement request"
        );
        let response = self
            .agent
            .post(&self.settings.endpoint)
            .header("Authorization", format!("Bearer {key}"))
            .header("Content-Type", "application/json")
            .send(body.as_bytes())
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let text = response
            .into_body()
            .read_to_string()
            .map_err(|e| EnhanceError::network(format!("reading response: {e}")))?;

        check_status(status, retry_after, &text)?;
        parse_generation(&text, &prompt)
    }
}

fn transport_error(e: ureq::Error) -> EnhanceError {
    match e {
        ureq::Error::StatusCode(status) => match check_status(status, None, "") {
            Err(err) => err,
            Ok(()) => EnhanceError::network(format!("unexpected status {status}")),
        },
        ureq::Error::Timeout(t) => {
            warn!(timeout = ?t, "enhancement request timed out");
            EnhanceError::network(format!("request timed out ({t:?})"))
        }
        other => EnhanceError::network(other.to_string()),
    }
}

/// Map a non-success HTTP status onto the error taxonomy.
fn check_status(status: u16, retry_after: Option<u64>, body: &str) -> Result<(), EnhanceError> {
    let detail = || error_detail(body).unwrap_or_else(|| format!("HTTP {status}"));
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(EnhanceError::auth(detail())),
        429 => Err(EnhanceError::RateLimit {
            retry_after_secs: retry_after,
            message: detail(),
        }),
        _ => Err(EnhanceError::network(format!("HTTP {status}: {}", detail()))),
    }
}

fn error_detail(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<ApiError>(body) {
        Ok(e) => Some(e.error),
        Err(_) => Some(body.trim().chars().take(MAX_ERROR_CHARS).collect()),
    }
}

/// Extract the generated text. Some deployments echo the prompt even when
/// asked not to, so a leading copy of it is removed.
fn parse_generation(body: &str, prompt: &str) -> Result<String, EnhanceError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| EnhanceError::malformed(format!("unexpected response body: {e}")))?;
    let generated = match parsed {
        GenerateResponse::One(g) => g.generated_text,
        GenerateResponse::Many(list) => list
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| EnhanceError::malformed("no generations returned"))?,
    };

    let text = generated.strip_prefix(prompt).unwrap_or(generated.as_str()).trim();
    if text.is_empty() {
        return Err(EnhanceError::malformed("empty generated text"));
    }
    Ok(text.to_string())
}
