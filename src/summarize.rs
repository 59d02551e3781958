use log::debug;

use crate::config::{API_KEY_ENV, Config};
use crate::error::{Error, Result};
use crate::models::Model;

const TEMPERATURE: f64 = 0.5;
const MAX_TOKENS: u32 = 4000;

const PROMPT_TEMPLATE: &str = "Tu es un expert en synthèse de contenu vidéo. \
Analyse la transcription suivante et crée un résumé détaillé en français.

TRANSCRIPTION:
{transcript}

INSTRUCTIONS:
1. Crée un résumé DÉTAILLÉ et STRUCTURÉ en français
2. Utilise des bullets points hiérarchiques (• pour les points principaux, - pour les sous-points)
3. Adapte la longueur du résumé à la richesse du contenu (généralement 10-20 points principaux)
4. Pour les vidéos financières/business, inclus:
   - Thèse d'investissement principale
   - Chiffres clés et métriques importantes
   - Forces et faiblesses identifiées
   - Recommandations ou conclusions
5. Pour les autres types de vidéos, structure selon le contenu
6. Sois précis et facile à lire
7. Garde les informations importantes (noms, chiffres, dates)

Réponds UNIQUEMENT avec le résumé en bullets, sans introduction ni conclusion.";

/// Client for an OpenAI-compatible chat completions endpoint
pub struct Summarizer {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl Summarizer {
    pub fn new(config: &Config) -> eyre::Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            api_url: config.api_url().to_string(),
            api_key: config.api_key(),
        })
    }

    /// Summarize transcript text with the given model
    pub async fn summarize(&self, transcript: &str, model: &Model) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| Error::MissingApiKey {
            env_var: API_KEY_ENV.to_string(),
        })?;

        debug!(
            "Summarizing {} chars via {} with model {}",
            transcript.len(),
            self.api_url,
            model.api_id()
        );

        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(&request_body(transcript, model))
            .send()
            .await?;

        if resp.status() != reqwest::StatusCode::OK {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        let json: serde_json::Value = resp.json().await?;
        extract_summary(&json)
    }
}

pub fn build_prompt(transcript: &str) -> String {
    PROMPT_TEMPLATE.replace("{transcript}", transcript)
}

fn request_body(transcript: &str, model: &Model) -> serde_json::Value {
    serde_json::json!({
        "model": model.api_id(),
        "messages": [
            {
                "role": "user",
                "content": build_prompt(transcript)
            }
        ],
        "temperature": TEMPERATURE,
        "max_tokens": MAX_TOKENS
    })
}

fn extract_summary(json: &serde_json::Value) -> Result<String> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
        .map(|t| t.trim().to_string())
        .ok_or(Error::InvalidResponse)
}
