use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Voices accepted by the speech endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    pub const ALL: [Voice; 6] = [
        Voice::Alloy,
        Voice::Echo,
        Voice::Fable,
        Voice::Onyx,
        Voice::Nova,
        Voice::Shimmer,
    ];

    /// Wire value sent in the request body.
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
            Voice::Onyx => "onyx",
            Voice::Nova => "nova",
            Voice::Shimmer => "shimmer",
        }
    }

    /// Display name, e.g. `Shimmer`.
    pub fn name(&self) -> &'static str {
        match self {
            Voice::Alloy => "Alloy",
            Voice::Echo => "Echo",
            Voice::Fable => "Fable",
            Voice::Onyx => "Onyx",
            Voice::Nova => "Nova",
            Voice::Shimmer => "Shimmer",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Voice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Voice::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// Service level. Each tier maps to its own model and price.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Standard,
    Hd,
}

impl Quality {
    pub const ALL: [Quality; 2] = [Quality::Standard, Quality::Hd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Standard => "standard",
            Quality::Hd => "hd",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Quality::Standard),
            "hd" => Ok(Quality::Hd),
            _ => Err(s.to_string()),
        }
    }
}

/// Model identifier used for each quality tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMap {
    pub standard: String,
    pub hd: String,
}

impl ModelMap {
    pub fn model_for(&self, quality: Quality) -> &str {
        match quality {
            Quality::Standard => &self.standard,
            Quality::Hd => &self.hd,
        }
    }
}

impl Default for ModelMap {
    fn default() -> Self {
        Self {
            standard: "tts-1".to_string(),
            hd: "tts-1-hd".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VoiceInfo {
    pub id: String,
    pub name: String,
}

impl From<Voice> for VoiceInfo {
    fn from(voice: Voice) -> Self {
        Self {
            id: voice.as_str().to_string(),
            name: voice.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_parse_is_case_insensitive() {
        assert_eq!("Nova".parse::<Voice>(), Ok(Voice::Nova));
        assert_eq!("SHIMMER".parse::<Voice>(), Ok(Voice::Shimmer));
        assert!("ballad".parse::<Voice>().is_err());
    }

    #[test]
    fn test_voice_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Voice::Onyx).unwrap(), "\"onyx\"");
        let v: Voice = serde_json::from_str("\"fable\"").unwrap();
        assert_eq!(v, Voice::Fable);
    }

    #[test]
    fn test_quality_parse() {
        assert_eq!("HD".parse::<Quality>(), Ok(Quality::Hd));
        assert_eq!("standard".parse::<Quality>(), Ok(Quality::Standard));
        assert!("ultra".parse::<Quality>().is_err());
    }

    #[test]
    fn test_default_model_map() {
        let models = ModelMap::default();
        assert_eq!(models.model_for(Quality::Standard), "tts-1");
        assert_eq!(models.model_for(Quality::Hd), "tts-1-hd");
    }

    #[test]
    fn test_voice_info_name() {
        let info = VoiceInfo::from(Voice::Echo);
        assert_eq!(info.id, "echo");
        assert_eq!(info.name, "Echo");
    }
}
