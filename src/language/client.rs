//! Google Cloud Translation v3 REST client.
//!
//! One [`CloudTranslateClient`] serves both detection and translation; it
//! implements [`LanguageDetector`] and [`Translator`].  Project, location,
//! base URL and bearer token all come from [`GoogleConfig`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::GoogleConfig;
use crate::language::detector::LanguageDetector;
use crate::language::error::LanguageError;
use crate::language::translator::Translator;

const MIME_TYPE: &str = "text/plain";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectRequest<'a> {
    content: &'a str,
    mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    #[serde(default)]
    languages: Vec<DetectedLanguage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectedLanguage {
    language_code: String,
    #[serde(default)]
    confidence: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    contents: [&'a str; 1],
    mime_type: &'static str,
    target_language_code: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedText {
    translated_text: String,
}

// ---------------------------------------------------------------------------
// CloudTranslateClient
// ---------------------------------------------------------------------------

pub struct CloudTranslateClient {
    client: reqwest::Client,
    parent_url: String,
    access_token: String,
}

impl CloudTranslateClient {
    /// `client` is shared with the other outbound clients and carries the
    /// request timeout.
    pub fn new(client: reqwest::Client, config: &GoogleConfig) -> Self {
        let parent_url = format!(
            "{}/v3/projects/{}/locations/{}",
            config.translate_base_url.trim_end_matches('/'),
            config.project_id,
            config.location
        );
        Self {
            client,
            parent_url,
            access_token: config.access_token.clone(),
        }
    }

    async fn post<B, R>(&self, method: &str, body: &B) -> Result<R, LanguageError>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let url = format!("{}:{method}", self.parent_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LanguageError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| LanguageError::Parse(e.to_string()))
    }
}

#[async_trait]
impl LanguageDetector for CloudTranslateClient {
    async fn detect(&self, text: &str) -> Result<String, LanguageError> {
        let request = DetectRequest {
            content: text,
            mime_type: MIME_TYPE,
        };
        let response: DetectResponse = self.post("detectLanguage", &request).await?;

        let best = response
            .languages
            .into_iter()
            .next()
            .ok_or(LanguageError::EmptyResult)?;
        log::info!(
            "Detected language: {} (confidence: {:.2})",
            best.language_code,
            best.confidence
        );
        Ok(best.language_code)
    }
}

#[async_trait]
impl Translator for CloudTranslateClient {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, LanguageError> {
        let request = TranslateRequest {
            contents: [text],
            mime_type: MIME_TYPE,
            target_language_code: target_language,
        };
        let response: TranslateResponse = self.post("translateText", &request).await?;

        response
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or(LanguageError::EmptyResult)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GoogleConfig {
        GoogleConfig {
            project_id: "triage-project".into(),
            access_token: "token".into(),
            translate_base_url: "https://translation.example/".into(),
            ..GoogleConfig::default()
        }
    }

    #[test]
    fn parent_url_contains_project_and_location() {
        let client = CloudTranslateClient::new(reqwest::Client::new(), &config());
        assert_eq!(
            client.parent_url,
            "https://translation.example/v3/projects/triage-project/locations/global"
        );
    }

    #[test]
    fn translate_request_uses_camel_case_fields() {
        let body = serde_json::to_value(TranslateRequest {
            contents: ["bonjour"],
            mime_type: MIME_TYPE,
            target_language_code: "en",
        })
        .unwrap();

        assert_eq!(body["contents"][0], "bonjour");
        assert_eq!(body["mimeType"], "text/plain");
        assert_eq!(body["targetLanguageCode"], "en");
    }

    #[test]
    fn detect_response_parses_first_language() {
        let json = r#"{"languages":[{"languageCode":"fr","confidence":0.98},{"languageCode":"it","confidence":0.01}]}"#;
        let parsed: DetectResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.languages[0].language_code, "fr");
    }

    #[test]
    fn empty_detect_response_has_no_languages() {
        let parsed: DetectResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.languages.is_empty());
    }

    #[test]
    fn translate_response_parses_text() {
        let json = r#"{"translations":[{"translatedText":"I have a fever","detectedLanguageCode":"fr"}]}"#;
        let parsed: TranslateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.translations[0].translated_text, "I have a fever");
    }

    #[test]
    fn client_is_object_safe_for_both_traits() {
        let client = std::sync::Arc::new(CloudTranslateClient::new(reqwest::Client::new(), &config()));
        let _d: std::sync::Arc<dyn LanguageDetector> = client.clone();
        let _t: std::sync::Arc<dyn Translator> = client;
    }
}
