pub mod audio;
pub mod client;
pub mod request;
pub mod voice;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{SpeechError, SynthesisError, ValidationError};
use crate::text;

pub use audio::{concat_mpeg, SynthesizedAudio, MPEG_MIME_TYPE};
pub use client::{SpeechClient, DEFAULT_ENDPOINT};
pub use request::{ApiKey, SynthesisRequest};
pub use voice::{ModelMap, Quality, Voice, VoiceInfo};

pub type SynthesisResult = Result<SynthesizedAudio, SynthesisError>;

/// Anything that can turn one request into audio.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest) -> SynthesisResult;
}

/// Synthesize text of any length by splitting it into word-bounded segments
/// of at most `limit` characters.
///
/// Segments are requested one at a time, in order. The first failure is
/// returned as-is and no further segments are requested.
pub async fn synthesize_long<S>(
    synthesizer: &S,
    credential: &ApiKey,
    text: &str,
    voice: Voice,
    quality: Quality,
    limit: usize,
) -> Result<SynthesizedAudio, SpeechError>
where
    S: Synthesizer + ?Sized,
{
    if credential.is_blank() {
        return Err(ValidationError::EmptyCredential.into());
    }

    let segments = text::split(text, limit)?;
    if segments.is_empty() {
        return Err(ValidationError::EmptyText.into());
    }

    let total = segments.len();
    let mut parts = Vec::with_capacity(total);

    for (i, segment) in segments.into_iter().enumerate() {
        let request = SynthesisRequest::new(credential.clone(), segment, voice, quality, limit)?;
        tracing::debug!(segment = i + 1, total, "Synthesizing segment");

        match synthesizer.synthesize(&request).await {
            Ok(audio) => parts.push(audio),
            Err(e) => {
                tracing::warn!(
                    segment = i + 1,
                    total,
                    kind = e.kind().code(),
                    "Segment failed, aborting"
                );
                return Err(e.into());
            }
        }
    }

    Ok(concat_mpeg(&parts))
}

pub struct SpeechService {
    synthesizer: Arc<dyn Synthesizer>,
    max_chars: usize,
}

impl SpeechService {
    pub fn new(synthesizer: Arc<dyn Synthesizer>, max_chars: usize) -> Self {
        Self {
            synthesizer,
            max_chars,
        }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Single call when the text fits, segmented otherwise.
    pub async fn speak(
        &self,
        credential: ApiKey,
        text: &str,
        voice: Voice,
        quality: Quality,
    ) -> Result<SynthesizedAudio, SpeechError> {
        let text = text.trim();
        let chars = text::char_count(text);
        tracing::info!(%voice, %quality, chars, "Generating speech");

        let audio = if chars <= self.max_chars {
            let request = SynthesisRequest::new(credential, text, voice, quality, self.max_chars)?;
            self.synthesizer.synthesize(&request).await?
        } else {
            synthesize_long(
                self.synthesizer.as_ref(),
                &credential,
                text,
                voice,
                quality,
                self.max_chars,
            )
            .await?
        };

        tracing::info!(bytes = audio.len(), "Speech generated");
        Ok(audio)
    }
}
