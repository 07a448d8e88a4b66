//! Dwani speech API client (`/v1/audio/speech`), used for Indic and other
//! non-English voices.  The response body is the raw MP3.

use async_trait::async_trait;
use serde::Serialize;

use crate::config::DwaniConfig;
use crate::speech::synthesizer::{require_audio, SpeechError, SpeechSynthesizer};

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    input: &'a str,
    response_format: &'static str,
}

pub struct DwaniTts {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl DwaniTts {
    pub fn new(client: reqwest::Client, config: &DwaniConfig) -> Self {
        Self {
            client,
            url: format!("{}/v1/audio/speech", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for DwaniTts {
    /// The endpoint infers the voice from the text, so `language` is only
    /// logged.
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SpeechError> {
        log::info!("Using Dwani speech API for language '{language}'");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&SpeechRequest {
                input: text,
                response_format: "mp3",
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Status {
                status: status.as_u16(),
                body,
            });
        }

        require_audio(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_without_double_slash() {
        let config = DwaniConfig {
            base_url: "https://dwani.example/".into(),
            api_key: "k".into(),
        };
        let tts = DwaniTts::new(reqwest::Client::new(), &config);
        assert_eq!(tts.url, "https://dwani.example/v1/audio/speech");
    }

    #[test]
    fn request_asks_for_mp3() {
        let json = serde_json::to_value(SpeechRequest {
            input: "आराम करें",
            response_format: "mp3",
        })
        .unwrap();
        assert_eq!(json["input"], "आराम करें");
        assert_eq!(json["response_format"], "mp3");
    }
}
