//! Cave generation parameters and configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CaveError, Result};
use crate::rules::AutomatonRules;

/// Cave density preset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CavePreset {
    /// Wide halls, few pillars
    Open,
    /// Classic 45% noise with five smoothing passes
    #[default]
    Balanced,
    /// Narrow winding tunnels
    Tight,
}

impl CavePreset {
    pub fn all() -> &'static [Self] {
        &[Self::Open, Self::Balanced, Self::Tight]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Open => "Wide halls, few pillars",
            Self::Balanced => "Classic cave layout",
            Self::Tight => "Narrow winding tunnels",
        }
    }
}

impl std::fmt::Display for CavePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Balanced => write!(f, "balanced"),
            Self::Tight => write!(f, "tight"),
        }
    }
}

/// Everything the generator and its harness need to produce a cave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveParams {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,

    /// Chance for each cell to start as wall (values outside 0-1 saturate)
    pub wall_chance: f64,

    /// Automaton generations per attempt
    pub smoothing_steps: usize,

    /// Keep only the largest cavern once smoothing is done
    pub cull: bool,

    /// Passage area an attempt needs to be accepted
    pub min_area: usize,

    /// Restarts allowed before the last attempt is taken as-is
    pub max_attempts: u32,

    /// Transition thresholds
    pub rules: AutomatonRules,

    // Viewer only
    /// Milliseconds between generator ticks
    pub tick_ms: u64,
    /// Pixels per cell
    pub cell_size: usize,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            wall_chance: 0.45,
            smoothing_steps: 5,
            cull: true,
            min_area: 3000,
            max_attempts: 100,
            rules: AutomatonRules::default(),
            tick_ms: 250,
            cell_size: 4,
        }
    }
}

impl CaveParams {
    pub fn from_preset(preset: CavePreset) -> Self {
        match preset {
            CavePreset::Open => Self {
                wall_chance: 0.40,
                smoothing_steps: 4,
                min_area: 4000,
                ..Default::default()
            },
            CavePreset::Balanced => Self::default(),
            CavePreset::Tight => Self {
                wall_chance: 0.48,
                smoothing_steps: 7,
                min_area: 1500,
                ..Default::default()
            },
        }
    }

    /// Read parameters from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaveError::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_attempts == 0 {
            return Err(CaveError::InvalidConfiguration(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.cell_size == 0 {
            return Err(CaveError::InvalidConfiguration(
                "cell_size must be at least 1".to_string(),
            ));
        }
        if self.cell_count().is_none() {
            return Err(CaveError::InvalidConfiguration(format!(
                "grid of {}x{} cells is too large",
                self.width, self.height
            )));
        }
        if self.pixel_size().is_none() {
            return Err(CaveError::InvalidConfiguration(format!(
                "{}x{} grid at {} pixels per cell is too large to display",
                self.width, self.height, self.cell_size
            )));
        }
        if self.wall_chance.is_nan() {
            return Err(CaveError::InvalidConfiguration(
                "wall_chance must be a number".to_string(),
            ));
        }
        self.rules.validate()
    }

    /// Total cells, or `None` if the product overflows.
    pub fn cell_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Viewer window size in pixels, or `None` if the frame buffer would overflow.
    pub fn pixel_size(&self) -> Option<(usize, usize)> {
        let pixel_width = self.width.checked_mul(self.cell_size)?;
        let pixel_height = self.height.checked_mul(self.cell_size)?;
        pixel_width.checked_mul(pixel_height)?;
        Some((pixel_width, pixel_height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = CaveParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.rules, AutomatonRules::default());
        for &preset in CavePreset::all() {
            assert!(CaveParams::from_preset(preset).validate().is_ok(), "{}", preset);
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params = CaveParams::from_json(r#"{ "width": 40, "wall_chance": 0.5 }"#).unwrap();
        assert_eq!(params.width, 40);
        assert_eq!(params.height, 100);
        assert_eq!(params.wall_chance, 0.5);
        assert_eq!(params.smoothing_steps, 5);
    }

    #[test]
    fn test_nested_rules_from_json() {
        let params = CaveParams::from_json(r#"{ "rules": { "passage_collapse": 6 } }"#).unwrap();
        assert_eq!(params.rules.passage_collapse, 6);
        assert_eq!(params.rules.wall_survival, 4);
    }

    #[test]
    fn test_json_round_trip() {
        let params = CaveParams::from_preset(CavePreset::Tight);
        let text = params.to_json().unwrap();
        assert_eq!(CaveParams::from_json(&text).unwrap(), params);
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(matches!(
            CaveParams::from_json(r#"{ "width": 0 }"#),
            Err(CaveError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            CaveParams::from_json(r#"{ "max_attempts": 0 }"#),
            Err(CaveError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            CaveParams::from_json(r#"{ "rules": { "wall_survival": 12 } }"#),
            Err(CaveError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            CaveParams::from_json("not json"),
            Err(CaveError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        #[cfg(target_pointer_width = "64")]
        assert!(matches!(
            CaveParams::from_json(r#"{ "width": 8589934592, "height": 8589934592 }"#),
            Err(CaveError::InvalidConfiguration(_))
        ));

        // fits as cells, but not once every cell is drawn 4x4
        let side = 1usize << (usize::BITS / 2 - 1);
        let params = CaveParams {
            width: side,
            height: side,
            ..Default::default()
        };
        assert!(params.cell_count().is_some());
        assert!(params.pixel_size().is_none());
        assert!(matches!(
            params.validate(),
            Err(CaveError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_pixel_size() {
        let params = CaveParams {
            width: 30,
            height: 20,
            cell_size: 3,
            ..Default::default()
        };
        assert_eq!(params.cell_count(), Some(600));
        assert_eq!(params.pixel_size(), Some((90, 60)));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CaveParams::load("/nonexistent/cave.json"),
            Err(CaveError::ConfigIo(_))
        ));
    }
}
