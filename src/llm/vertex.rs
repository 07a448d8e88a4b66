//! Vertex AI `streamGenerateContent` client.
//!
//! Requests `alt=sse` so the response is a server-sent-events stream of
//! `GenerateContentResponse` JSON objects; each object contributes the
//! concatenation of its first candidate's text parts as one chunk.

use std::collections::VecDeque;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::config::{GenerationConfig, GoogleConfig};
use crate::llm::generator::{ChunkStream, GenerationError, TextGenerator};
use crate::llm::prompt::{safety_settings_off, GenerationParams, SafetySetting};
use crate::llm::sse::SseDecoder;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: &'a GenerationParams,
    safety_settings: &'a [SafetySetting],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
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
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Text carried by one SSE payload; empty for metadata-only chunks.
fn chunk_text(payload: &str) -> Result<String, GenerationError> {
    let chunk: StreamChunk =
        serde_json::from_str(payload).map_err(|e| GenerationError::Parse(e.to_string()))?;

    if let Some(reason) = chunk.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::Blocked(reason));
    }

    Ok(chunk
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default())
}

// ---------------------------------------------------------------------------
// SSE → ChunkStream
// ---------------------------------------------------------------------------

struct SseState {
    bytes: BoxStream<'static, Result<Vec<u8>, reqwest::Error>>,
    decoder: SseDecoder,
    pending: VecDeque<String>,
    done: bool,
}

impl SseState {
    /// Parse payloads into `pending`; stops at the first bad payload.
    fn queue(&mut self, payloads: impl IntoIterator<Item = String>) -> Result<(), GenerationError> {
        for payload in payloads {
            let text = chunk_text(&payload)?;
            if !text.is_empty() {
                self.pending.push_back(text);
            }
        }
        Ok(())
    }
}

fn chunk_stream(bytes: BoxStream<'static, Result<Vec<u8>, reqwest::Error>>) -> ChunkStream {
    let state = SseState {
        bytes,
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        done: false,
    };

    stream::unfold(state, |mut st| async move {
        loop {
            if let Some(text) = st.pending.pop_front() {
                return Some((Ok(text), st));
            }
            if st.done {
                return None;
            }
            match st.bytes.next().await {
                Some(Ok(bytes)) => {
                    let payloads = st.decoder.push(&bytes);
                    if let Err(e) = st.queue(payloads) {
                        st.done = true;
                        st.pending.clear();
                        return Some((Err(e), st));
                    }
                }
                Some(Err(e)) => {
                    st.done = true;
                    return Some((Err(e.into()), st));
                }
                None => {
                    st.done = true;
                    let tail = st.decoder.finish();
                    if let Err(e) = st.queue(tail) {
                        return Some((Err(e), st));
                    }
                }
            }
        }
    })
    .boxed()
}

// ---------------------------------------------------------------------------
// VertexGenerator
// ---------------------------------------------------------------------------

/// Streams triage answers from a Vertex AI publisher model.
pub struct VertexGenerator {
    client: reqwest::Client,
    url: String,
    access_token: String,
    system_instruction: String,
    params: GenerationParams,
    safety: Vec<SafetySetting>,
}

impl VertexGenerator {
    pub fn new(
        client: reqwest::Client,
        google: &GoogleConfig,
        generation: &GenerationConfig,
        system_instruction: impl Into<String>,
    ) -> Self {
        let url = format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:streamGenerateContent?alt=sse",
            google.vertex_base_url.trim_end_matches('/'),
            google.project_id,
            google.location,
            generation.model
        );
        Self {
            client,
            url,
            access_token: google.access_token.clone(),
            system_instruction: system_instruction.into(),
            params: GenerationParams::from_config(generation),
            safety: safety_settings_off(),
        }
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &self.system_instruction,
                }],
            },
            generation_config: &self.params,
            safety_settings: &self.safety,
        }
    }
}

#[async_trait]
impl TextGenerator for VertexGenerator {
    async fn stream(&self, prompt: &str) -> Result<ChunkStream, GenerationError> {
        log::debug!("Generation prompt (English): {prompt}");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.access_token)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status.as_u16(), body));
        }

        let bytes = response
            .bytes_stream()
            .map(|r| r.map(|b| b.to_vec()))
            .boxed();
        Ok(chunk_stream(bytes))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
