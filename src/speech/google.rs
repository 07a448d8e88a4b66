//! Google Cloud Text-to-Speech v1 (`text:synthesize`) client.
//!
//! The voice is fixed by [`SpeechConfig`] rather than derived from the
//! request language; under the routed policy this backend only ever
//! receives English.

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::config::{GoogleConfig, SpeechConfig};
use crate::speech::synthesizer::{require_audio, SpeechError, SpeechSynthesizer};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

pub struct GoogleTts {
    client: reqwest::Client,
    url: String,
    access_token: String,
    language_code: String,
    voice: String,
}

impl GoogleTts {
    pub fn new(client: reqwest::Client, google: &GoogleConfig, speech: &SpeechConfig) -> Self {
        Self {
            client,
            url: format!(
                "{}/v1/text:synthesize",
                google.tts_base_url.trim_end_matches('/')
            ),
            access_token: google.access_token.clone(),
            language_code: speech.google_language_code.clone(),
            voice: speech.google_voice.clone(),
        }
    }

    fn request_body<'a>(&'a self, text: &'a str) -> SynthesizeRequest<'a> {
        SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: &self.language_code,
                name: &self.voice,
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        }
    }
}

/// `audioContent` arrives base64-encoded; decode it back to raw MP3.
fn decode_audio_content(content: &str) -> Result<Vec<u8>, SpeechError> {
    let audio = general_purpose::STANDARD
        .decode(content)
        .map_err(|e| SpeechError::Parse(format!("audioContent is not base64: {e}")))?;
    require_audio(audio)
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, _language: &str) -> Result<Vec<u8>, SpeechError> {
        log::info!("Using Google Cloud TTS ({})", self.voice);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.access_token)
            .json(&self.request_body(text))
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

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::Parse(e.to_string()))?;
        decode_audio_content(&parsed.audio_content)
    }
}
