//! Data-URI encoding and base64 validation for synthesized audio.

use base64::{engine::general_purpose, Engine as _};

/// MIME type of every synthesized clip (all backends are asked for MP3).
pub const AUDIO_MIME: &str = "audio/mpeg";

/// Encode `audio` as `data:<mime>;base64,<payload>`.
pub fn encode_data_uri(mime: &str, audio: &[u8]) -> String {
    format!("data:{mime};base64,{}", general_purpose::STANDARD.encode(audio))
}

/// Payload after the first comma, or the whole string when there is none.
pub fn strip_data_uri(data: &str) -> &str {
    data.split_once(',').map_or(data, |(_, payload)| payload)
}

/// `true` when the payload of `data` is strict standard-alphabet, padded
/// base64.
pub fn is_valid_base64(data: &str) -> bool {
    general_purpose::STANDARD.decode(strip_data_uri(data)).is_ok()
}
