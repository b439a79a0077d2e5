// src/config.rs
//
// Run-level solver parameters. Keys match the run configuration files of the surrounding
// simulation, e.g.
//
//   {
//     "window-width-steps": 41,
//     "window-width-step-size": 0.05,
//     "xi-step": 0.05,
//     "field-solver-subtraction-trick": 1.0,
//     "field-solver-variant-A": false,
//     "field-solver-transform": "fft"
//   }
//
// Missing keys take their defaults.

use std::fs::{self, File};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::grid::Grid2D;
use crate::transform::TransformKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSolverConfig {
    /// Grid side n (nodes per transverse direction, walls included).
    #[serde(rename = "window-width-steps")]
    pub window_width_steps: usize,

    /// Transverse grid spacing h.
    #[serde(rename = "window-width-step-size")]
    pub grid_step_size: f64,

    /// Longitudinal slice spacing Δξ.
    #[serde(rename = "xi-step")]
    pub xi_step_size: f64,

    #[serde(rename = "field-solver-subtraction-trick")]
    pub trick: f64,

    #[serde(rename = "field-solver-variant-A")]
    pub variant_a: bool,

    #[serde(rename = "field-solver-transform")]
    pub transform: TransformKind,
}

impl Default for FieldSolverConfig {
    fn default() -> Self {
        Self {
            window_width_steps: 41,
            grid_step_size: 0.05,
            xi_step_size: 0.05,
            trick: 1.0,
            variant_a: false,
            transform: TransformKind::Fft,
        }
    }
}

impl FieldSolverConfig {
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.window_width_steps < 3 {
            return Err(ConfigError::GridTooSmall {
                n: self.window_width_steps,
            });
        }
        for (name, value) in [
            ("window-width-step-size", self.grid_step_size),
            ("xi-step", self.xi_step_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveStep { name, value });
            }
        }
        // A negative shift can cancel an eigenvalue of −∇² and make the mixed solve singular.
        if !(self.trick.is_finite() && self.trick >= 0.0) {
            return Err(ConfigError::InvalidTrick(self.trick));
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid2D {
        Grid2D::new(self.window_width_steps, self.grid_step_size)
    }

    /// Write the config as pretty JSON to `<out_dir>/config.json`.
    pub fn write_to_dir(&self, out_dir: &Path) -> ConfigResult<()> {
        fs::create_dir_all(out_dir)?;
        let file = File::create(out_dir.join("config.json"))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
