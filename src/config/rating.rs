//! Rating system configuration

use crate::error::LadderError;
use crate::types::Rating;
use serde::{Deserialize, Serialize};

/// Tunable constants for the pairwise Elo update rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// K-factor: maximum magnitude of a single pairwise adjustment
    pub k_factor: f64,
    /// D-scale: how strongly a rating gap translates into expected win probability
    pub d_scale: f64,
    /// Starting rating for players with no recorded games
    pub initial_rating: Rating,
    /// Replay only the trailing N games when set
    pub replay_window: Option<usize>,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: 40.0,
            d_scale: 800.0,
            initial_rating: 1500,
            replay_window: None,
        }
    }
}

impl RatingSettings {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.k_factor <= 0.0 {
            return Err(LadderError::Configuration {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if self.d_scale <= 0.0 {
            return Err(LadderError::Configuration {
                message: "D-scale must be positive".to_string(),
            }
            .into());
        }

        if self.replay_window == Some(0) {
            return Err(LadderError::Configuration {
                message: "Replay window must be positive when set".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = RatingSettings::default();
        assert_eq!(settings.k_factor, 40.0);
        assert_eq!(settings.d_scale, 800.0);
        assert_eq!(settings.initial_rating, 1500);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_constants() {
        let mut settings = RatingSettings::default();
        settings.k_factor = 0.0;
        assert!(settings.validate().is_err());

        settings = RatingSettings::default();
        settings.d_scale = -800.0;
        assert!(settings.validate().is_err());

        settings = RatingSettings::default();
        settings.replay_window = Some(0);
        assert!(settings.validate().is_err());
    }
}
