//! Relay between a speech form and a remote text-to-speech endpoint.
//!
//! The core is usable without the HTTP layer: build a [`tts::SpeechClient`],
//! then call [`tts::Synthesizer::synthesize`] for one request or
//! [`tts::synthesize_long`] for text above the per-call limit.

pub mod api;
pub mod config;
pub mod error;
pub mod pricing;
pub mod text;
pub mod tts;

pub use config::Settings;
pub use error::{AppError, FailureKind, SpeechError, SynthesisError, ValidationError};
