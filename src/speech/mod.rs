//! Text-to-speech.
//!
//! * [`SpeechSynthesizer`]: async trait returning raw MP3 bytes.
//! * [`GoogleTts`] / [`DwaniTts`]: the two REST backends.
//! * [`LanguageRoutedSynthesizer`] / [`select_backend`]: backend policy.
//! * [`FallbackSynthesizer`]: data-URI output, `None` on any failure.
//! * [`audio`]: data-URI encoding and base64 validation.

pub mod audio;
pub mod dwani;
pub mod google;
pub mod routed;
pub mod synthesizer;

pub use audio::{encode_data_uri, is_valid_base64, strip_data_uri, AUDIO_MIME};
pub use dwani::DwaniTts;
pub use google::GoogleTts;
pub use routed::{select_backend, LanguageRoutedSynthesizer};
pub use synthesizer::{FallbackSynthesizer, SpeechError, SpeechSynthesizer};
