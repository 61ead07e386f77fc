//! Intro sequence timing and geometry.
//!
//! All values have defaults matching the shipped splash screen and can be
//! overridden from JSON.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Intro sequence constants. Durations are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    // === Timing ===
    /// Branding shown at full opacity before it fades
    pub branding_hold_ms: u64,
    pub branding_fade_ms: u64,
    pub logo_fade_ms: u64,
    /// Pause between logo reveal and docking
    pub hold_ms: u64,
    /// Logo translate, resize and margin shift
    pub dock_ms: u64,
    pub content_fade_ms: u64,

    // === Geometry ===
    /// Logo height while centered
    pub initial_logo_height: f32,
    /// Upper bound of the docked logo height
    pub max_logo_height: f32,
    /// Vertical space kept free for the content panel
    pub reserved_height: f32,
    /// Lower bound of the docked logo height, as a fraction of the viewport
    pub min_logo_fraction: f32,
    /// Estimated content panel height; the logo starts offset by half of it
    pub content_height: f32,
    pub initial_logo_margin: f32,
    pub final_logo_margin: f32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            branding_hold_ms: 1200,
            branding_fade_ms: 600,
            logo_fade_ms: 600,
            hold_ms: 400,
            dock_ms: 600,
            content_fade_ms: 800,

            initial_logo_height: 250.0,
            max_logo_height: 250.0,
            reserved_height: 500.0,
            min_logo_fraction: 0.1,
            content_height: 340.0,
            initial_logo_margin: -60.0,
            final_logo_margin: 20.0,
        }
    }
}

impl IntroConfig {
    /// Parse a (possibly partial) JSON override.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_logo_fraction) {
            return Err(ConfigError::Invalid("min_logo_fraction must be within 0..=1"));
        }
        if self.max_logo_height <= 0.0 {
            return Err(ConfigError::Invalid("max_logo_height must be positive"));
        }
        if self.content_height < 0.0 {
            return Err(ConfigError::Invalid("content_height must not be negative"));
        }
        Ok(())
    }

    /// Total time from first frame to completion.
    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(
            self.branding_hold_ms
                + self.branding_fade_ms
                + self.logo_fade_ms
                + self.hold_ms
                + self.dock_ms.max(self.content_fade_ms),
        )
    }
}

/// Error loading an [`IntroConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Invalid intro config: {}", e),
            Self::Invalid(reason) => write!(f, "Invalid intro config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_total_duration() {
        // 1200 + 600 + 600 + 400 + max(600, 800)
        assert_eq!(
            IntroConfig::default().total_duration(),
            Duration::from_millis(3600)
        );
    }

    #[test]
    fn test_partial_override() {
        let config = IntroConfig::from_json(r#"{"hold_ms": 0, "max_logo_height": 180.0}"#).unwrap();
        assert_eq!(config.hold_ms, 0);
        assert_eq!(config.max_logo_height, 180.0);
        assert_eq!(config.branding_hold_ms, 1200);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            IntroConfig::from_json(r#"{"min_logo_fraction": 2.0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            IntroConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
