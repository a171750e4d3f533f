//! Battle tuning configuration.
//!
//! Holds the constants that shape battle pacing. Every value has a safe
//! default; an INI file can override any subset of them.
//!
//! # Configuration File Format
//!
//! ```ini
//! [timer]
//! timer_scale = 0.02
//! speed_scale = 0.07
//! chrono_scale = 0.0005
//!
//! [director]
//! delay_ms = 100
//!
//! [battle]
//! popup_ms = 600
//! seed = 42
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::readiness::TimerScales;
use crate::components::textpopup::DEFAULT_POPUP_MS;
use crate::error::{BattleError, Result};

/// Default safe values for startup
const DEFAULT_TIMER_SCALE: f32 = 0.02;
const DEFAULT_SPEED_SCALE: f32 = 0.07;
const DEFAULT_CHRONO_SCALE: f32 = 0.0005;
const DEFAULT_DIRECTOR_DELAY_MS: f32 = 100.0;
const DEFAULT_CONFIG_PATH: &str = "./battle.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BattleConfig {
    /// First multiplicative constant of the readiness rate.
    pub timer_scale: f32,
    /// Second multiplicative constant of the readiness rate.
    pub speed_scale: f32,
    /// Chrono force gained per millisecond per point of time affinity.
    pub chrono_scale: f32,
    /// Minimum time between two scripts starting on a director.
    pub director_delay_ms: f32,
    /// Lifetime of damage popups.
    pub popup_ms: f32,
    /// Seed for the battle RNG; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            timer_scale: DEFAULT_TIMER_SCALE,
            speed_scale: DEFAULT_SPEED_SCALE,
            chrono_scale: DEFAULT_CHRONO_SCALE,
            director_delay_ms: DEFAULT_DIRECTOR_DELAY_MS,
            popup_ms: DEFAULT_POPUP_MS,
            seed: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    pub fn timer_scales(&self) -> TimerScales {
        TimerScales {
            timer_scale: self.timer_scale,
            speed_scale: self.speed_scale,
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| BattleError::Config(format!("Failed to load config file: {}", e)))?;
        self.apply(&config)
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| BattleError::Config(format!("Failed to parse config: {}", e)))?;
        self.apply(&config)
    }

    fn apply(&mut self, config: &Ini) -> Result<()> {
        let float = |section: &str, key: &str| -> Result<Option<f32>> {
            config
                .getfloat(section, key)
                .map(|v| v.map(|v| v as f32))
                .map_err(|e| BattleError::Config(format!("[{}] {}: {}", section, key, e)))
        };

        // [timer] section
        if let Some(v) = float("timer", "timer_scale")? {
            self.timer_scale = v;
        }
        if let Some(v) = float("timer", "speed_scale")? {
            self.speed_scale = v;
        }
        if let Some(v) = float("timer", "chrono_scale")? {
            self.chrono_scale = v;
        }

        // [director] section
        if let Some(v) = float("director", "delay_ms")? {
            self.director_delay_ms = v;
        }

        // [battle] section
        if let Some(v) = float("battle", "popup_ms")? {
            self.popup_ms = v;
        }
        if let Some(seed) = config
            .getuint("battle", "seed")
            .map_err(|e| BattleError::Config(format!("[battle] seed: {}", e)))?
        {
            self.seed = Some(seed);
        }

        info!(
            "Loaded config: timer_scale={}, speed_scale={}, chrono_scale={}, director delay={}ms, popup={}ms, seed={:?}",
            self.timer_scale,
            self.speed_scale,
            self.chrono_scale,
            self.director_delay_ms,
            self.popup_ms,
            self.seed
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<()> {
        let mut config = Ini::new();

        config.set("timer", "timer_scale", Some(self.timer_scale.to_string()));
        config.set("timer", "speed_scale", Some(self.speed_scale.to_string()));
        config.set("timer", "chrono_scale", Some(self.chrono_scale.to_string()));
        config.set("director", "delay_ms", Some(self.director_delay_ms.to_string()));
        config.set("battle", "popup_ms", Some(self.popup_ms.to_string()));
        if let Some(seed) = self.seed {
            config.set("battle", "seed", Some(seed.to_string()));
        }

        config
            .write(&self.config_path)
            .map_err(|e| BattleError::Config(format!("Failed to save config file: {}", e)))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Build the battle RNG from the configured seed.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = BattleConfig::new();
        assert_eq!(config.timer_scale, 0.02);
        assert_eq!(config.speed_scale, 0.07);
        assert_eq!(config.director_delay_ms, 100.0);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut config = BattleConfig::new();
        config
            .load_from_str("[director]\ndelay_ms = 250\n[battle]\nseed = 9\n")
            .unwrap();
        assert_eq!(config.director_delay_ms, 250.0);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.timer_scale, 0.02);
    }

    #[test]
    fn bad_number_is_a_config_error() {
        let mut config = BattleConfig::new();
        let err = config
            .load_from_str("[timer]\ntimer_scale = fast\n")
            .unwrap_err();
        assert!(matches!(err, BattleError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let mut config = BattleConfig::with_path("/nonexistent/chronoforce/battle.ini");
        assert!(matches!(config.load_from_file(), Err(BattleError::Config(_))));
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let config = BattleConfig {
            seed: Some(3),
            ..BattleConfig::new()
        };
        assert_eq!(config.rng().u32(..), config.rng().u32(..));
    }
}
