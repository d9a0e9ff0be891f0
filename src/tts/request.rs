use std::fmt;

use serde::Deserialize;
use zeroize::Zeroize;

use super::voice::{Quality, Voice};
use crate::error::ValidationError;
use crate::text;

/// Caller's API key, forwarded as a bearer token.
///
/// Never printed: `Debug` is redacted and the buffer is wiped on drop.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// One call's worth of input, checked against the per-call character limit.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    credential: ApiKey,
    text: String,
    voice: Voice,
    quality: Quality,
}

impl SynthesisRequest {
    pub fn new(
        credential: ApiKey,
        text: impl Into<String>,
        voice: Voice,
        quality: Quality,
        max_chars: usize,
    ) -> Result<Self, ValidationError> {
        let text = text.into();

        if credential.is_blank() {
            return Err(ValidationError::EmptyCredential);
        }
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let len = text::char_count(&text);
        if len > max_chars {
            return Err(ValidationError::TextTooLong {
                len,
                limit: max_chars,
            });
        }

        Ok(Self {
            credential,
            text,
            voice,
            quality,
        })
    }

    pub fn credential(&self) -> &ApiKey {
        &self.credential
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn voice(&self) -> Voice {
        self.voice
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }
}
