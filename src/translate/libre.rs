//! Blocking client for LibreTranslate-compatible services

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::TranslationSettings;
use crate::error::TranslateError;

use super::Translator;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

/// Translator backed by `POST {endpoint}/translate`
pub struct LibreTranslateClient {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl LibreTranslateClient {
    pub fn new(settings: &TranslationSettings) -> Result<Self, TranslateError> {
        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            client,
            url: format!("{}/translate", settings.endpoint.trim_end_matches('/')),
            api_key: settings.api_key.clone(),
        })
    }

    fn request<'a>(&'a self, text: &'a str, target: &'a str) -> TranslateRequest<'a> {
        TranslateRequest {
            q: text,
            source: "auto",
            target,
            format: "text",
            api_key: self.api_key.as_deref(),
        }
    }
}

impl Translator for LibreTranslateClient {
    fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let response = self
            .client
            .post(&self.url)
            .json(&self.request(text, target))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        parse_response(status.as_u16(), &body)
    }
}

fn parse_response(status: u16, body: &str) -> Result<String, TranslateError> {
    let parsed: Result<TranslateResponse, _> = serde_json::from_str(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|r| r.error)
            .unwrap_or_else(|| body.to_string());
        return Err(TranslateError::Service { status, message });
    }

    let parsed = parsed.map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;
    match (parsed.translated_text, parsed.error) {
        (Some(text), _) => Ok(text),
        (None, Some(error)) => Err(TranslateError::Service {
            status,
            message: error,
        }),
        (None, None) => Err(TranslateError::MalformedResponse(
            "missing translatedText".to_string(),
        )),
    }
}
