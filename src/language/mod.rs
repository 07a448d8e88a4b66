//! Language detection and translation.
//!
//! * [`LanguageDetector`] / [`Translator`]: async traits for the remote calls.
//! * [`CloudTranslateClient`]: Google Cloud Translation v3 implementation of both.
//! * [`FallbackDetector`]: returns a default tag instead of failing.
//! * [`FallbackTranslator`]: returns the original text, as
//!   [`Translation::Passthrough`], instead of failing.
//! * [`LanguageError`]: error variants for the remote calls.

pub mod client;
pub mod detector;
pub mod error;
pub mod translator;

pub use client::CloudTranslateClient;
pub use detector::{FallbackDetector, LanguageDetector};
pub use error::LanguageError;
pub use translator::{FallbackTranslator, Translation, Translator};
