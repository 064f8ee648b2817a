use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Game construction settings: starting stack and the `[small, big]` blinds.
///
/// JSON input may spell the blinds key `blindes`.
///
/// ```
/// use holdem_engine::settings::Settings;
///
/// let settings = Settings::from_json(r#"{"chips": 1000, "blindes": [10, 20]}"#).unwrap();
/// assert_eq!(settings.small_blind(), 10);
/// assert_eq!(settings.big_blind(), 20);
/// assert!(Settings::from_json(r#"{"chips": 1000, "blindes": [20, 10]}"#).is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Starting stack of every player
    pub chips: u32,
    /// Small and big blind
    #[serde(alias = "blindes")]
    pub blinds: [u32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chips: 1000,
            blinds: [10, 20],
        }
    }
}

impl Settings {
    pub fn new(chips: u32, small: u32, big: u32) -> Result<Self, ConfigError> {
        let settings = Self {
            chips,
            blinds: [small, big],
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chips == 0 {
            return Err(ConfigError::ZeroChips);
        }
        let [small, big] = self.blinds;
        if small == 0 || big == 0 {
            return Err(ConfigError::NonPositiveBlind { small, big });
        }
        if small >= big {
            return Err(ConfigError::BlindOrder { small, big });
        }
        Ok(())
    }

    pub fn small_blind(&self) -> u32 {
        self.blinds[0]
    }

    pub fn big_blind(&self) -> u32 {
        self.blinds[1]
    }
}
