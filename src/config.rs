//! Run configuration read from a JSON input descriptor.
//!
//! Required keys mirror the model's input file: `nx`, `ny`, `xlen`,
//! `ylen`, `bc_x`, `bc_y`, `initData`, `outFile`. Optional keys select
//! the scheme (`ord`, `ngll`, `nAder`, `timeAvg`, `doWeno`) and the run
//! length (`cfl`, `simLength`, `outFreq`); gravity defaults per profile
//! and may be overridden with `grav`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Configuration failure, fatal at initialisation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read input descriptor {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input descriptor: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("key `nx`/`ny`: grid extents must be positive")]
    EmptyGrid,

    #[error("key `xlen`/`ylen`: domain lengths must be positive, got {xlen} x {ylen}")]
    BadExtent { xlen: f64, ylen: f64 },

    #[error("key `ord`: stencil width must be an odd positive integer, got {0}")]
    EvenOrder(usize),

    #[error("key `ngll`: need 2 <= ngll <= ord, got ngll = {ngll} with ord = {ord}")]
    BadNgll { ngll: usize, ord: usize },

    #[error("key `nAder`: need at least one temporal Taylor coefficient")]
    BadNAder,

    #[error("key `cfl`: must lie in (0, 1], got {0}")]
    BadCfl(f64),

    #[error("key `initData`: profile `{profile}` requires ny == 1, got ny = {ny}")]
    ProfileNeeds1d { profile: InitProfile, ny: usize },

    #[error("key `initData`: profile `{profile}` requires ny > 1")]
    ProfileNeeds2d { profile: InitProfile },
}

/// Boundary treatment per direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// Mirror halos; normal velocity forced to zero.
    Wall,
    /// Wrap halos around the domain.
    Periodic,
    /// Zero-gradient extrapolation.
    Open,
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryKind::Wall => write!(f, "wall"),
            BoundaryKind::Periodic => write!(f, "periodic"),
            BoundaryKind::Open => write!(f, "open"),
        }
    }
}

/// Catalogue of analytic initial profiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum InitProfile {
    /// Square dam break on flat bathymetry, unit-scaled gravity.
    #[serde(rename = "dam")]
    Dam,
    /// 1-D lake at rest with a cosine bump and a surface perturbation.
    #[serde(rename = "lake_at_rest_pert_1d")]
    LakeAtRestPert1d,
    /// 1-D dam break over a rectangular obstacle.
    #[serde(rename = "dam_rect_1d")]
    DamRect1d,
    /// 2-D lake at rest with a Gaussian seamount and a surface strip.
    #[serde(rename = "lake_at_rest_pert_2d")]
    LakeAtRestPert2d,
}

impl InitProfile {
    /// Gravitational constant used with this profile.
    pub fn gravity(self) -> f64 {
        match self {
            InitProfile::Dam => 1.0,
            _ => 9.81,
        }
    }

    /// Profiles defined only on a single row of cells.
    pub fn requires_1d(self) -> bool {
        matches!(
            self,
            InitProfile::LakeAtRestPert1d | InitProfile::DamRect1d
        )
    }

    /// Profiles that need a genuine second dimension.
    pub fn requires_2d(self) -> bool {
        matches!(self, InitProfile::LakeAtRestPert2d)
    }
}

impl fmt::Display for InitProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InitProfile::Dam => "dam",
            InitProfile::LakeAtRestPert1d => "lake_at_rest_pert_1d",
            InitProfile::DamRect1d => "dam_rect_1d",
            InitProfile::LakeAtRestPert2d => "lake_at_rest_pert_2d",
        };
        write!(f, "{}", name)
    }
}

fn default_ord() -> usize {
    5
}

fn default_cfl() -> f64 {
    0.5
}

fn default_sim_length() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

/// Parsed input descriptor.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    pub nx: usize,
    pub ny: usize,
    pub xlen: f64,
    pub ylen: f64,
    pub bc_x: BoundaryKind,
    pub bc_y: BoundaryKind,
    #[serde(rename = "initData")]
    pub init_data: InitProfile,
    #[serde(rename = "outFile")]
    pub out_file: PathBuf,

    /// Reconstruction stencil width (odd).
    #[serde(default = "default_ord")]
    pub ord: usize,
    /// GLL points per cell; defaults to (ord+1)/2.
    #[serde(default)]
    ngll: Option<usize>,
    /// Temporal Taylor coefficients; defaults to ngll.
    #[serde(rename = "nAder", default)]
    n_ader: Option<usize>,
    /// Time-average the Taylor series over the step.
    #[serde(rename = "timeAvg", default = "default_true")]
    pub time_avg: bool,
    /// WENO limiting on the reconstruction.
    #[serde(rename = "doWeno", default = "default_true")]
    pub do_weno: bool,

    #[serde(default = "default_cfl")]
    pub cfl: f64,
    #[serde(rename = "simLength", default = "default_sim_length")]
    pub sim_length: f64,
    /// Output interval in simulation time; zero or absent writes only
    /// the initial and final frames.
    #[serde(rename = "outFreq", default)]
    pub out_freq: f64,

    /// Gravity override; defaults per profile.
    #[serde(default)]
    grav: Option<f64>,
}

impl SolverConfig {
    /// Load and validate a JSON input descriptor.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON string.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// GLL points per cell.
    pub fn ngll(&self) -> usize {
        self.ngll.unwrap_or((self.ord + 1) / 2)
    }

    /// Temporal Taylor coefficients.
    pub fn n_ader(&self) -> usize {
        self.n_ader.unwrap_or_else(|| self.ngll())
    }

    /// Gravitational constant for this run.
    pub fn gravity(&self) -> f64 {
        self.grav.unwrap_or_else(|| self.init_data.gravity())
    }

    /// Check every enumerated and numeric constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nx == 0 || self.ny == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.xlen <= 0.0 || self.ylen <= 0.0 {
            return Err(ConfigError::BadExtent {
                xlen: self.xlen,
                ylen: self.ylen,
            });
        }
        if self.ord % 2 == 0 || self.ord == 0 {
            return Err(ConfigError::EvenOrder(self.ord));
        }
        let ngll = self.ngll();
        if !(2..=self.ord).contains(&ngll) && self.ord != 1 {
            return Err(ConfigError::BadNgll {
                ngll,
                ord: self.ord,
            });
        }
        if self.n_ader() == 0 {
            return Err(ConfigError::BadNAder);
        }
        if !(self.cfl > 0.0 && self.cfl <= 1.0) {
            return Err(ConfigError::BadCfl(self.cfl));
        }
        if self.init_data.requires_1d() && self.ny != 1 {
            return Err(ConfigError::ProfileNeeds1d {
                profile: self.init_data,
                ny: self.ny,
            });
        }
        if self.init_data.requires_2d() && self.ny == 1 {
            return Err(ConfigError::ProfileNeeds2d {
                profile: self.init_data,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_json() -> serde_json::Value {
        serde_json::json!({
            "nx": 200,
            "ny": 1,
            "xlen": 1000.0,
            "ylen": 5.0,
            "bc_x": "open",
            "bc_y": "open",
            "initData": "dam_rect_1d",
            "outFile": "out/dam"
        })
    }

    #[test]
    fn parses_minimal_descriptor_with_defaults() {
        let config = SolverConfig::from_json(&base_json().to_string()).unwrap();
        assert_eq!(config.ord, 5);
        assert_eq!(config.ngll(), 3);
        assert_eq!(config.n_ader(), 3);
        assert!(config.time_avg);
        assert!(config.do_weno);
        assert!((config.gravity() - 9.81).abs() < 1e-14);
        assert_eq!(config.bc_x, BoundaryKind::Open);
    }

    #[test]
    fn dam_profile_uses_unit_gravity() {
        let mut json = base_json();
        json["initData"] = "dam".into();
        json["ny"] = 100.into();
        let config = SolverConfig::from_json(&json.to_string()).unwrap();
        assert!((config.gravity() - 1.0).abs() < 1e-14);
    }

    #[test]
    fn missing_key_names_the_key() {
        let mut json = base_json();
        json.as_object_mut().unwrap().remove("xlen");
        let err = SolverConfig::from_json(&json.to_string()).unwrap_err();
        assert!(err.to_string().contains("xlen"), "got: {}", err);
    }

    #[test]
    fn unknown_boundary_kind_is_rejected() {
        let mut json = base_json();
        json["bc_x"] = "slippery".into();
        assert!(SolverConfig::from_json(&json.to_string()).is_err());
    }

    #[test]
    fn one_dimensional_profile_rejects_2d_grid() {
        let mut json = base_json();
        json["ny"] = 8.into();
        let err = SolverConfig::from_json(&json.to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNeeds1d { .. }));
    }

    #[test]
    fn two_dimensional_profile_rejects_single_row() {
        let mut json = base_json();
        json["initData"] = "lake_at_rest_pert_2d".into();
        let err = SolverConfig::from_json(&json.to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNeeds2d { .. }));
    }

    #[test]
    fn even_order_is_rejected() {
        let mut json = base_json();
        json["ord"] = 4.into();
        let err = SolverConfig::from_json(&json.to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::EvenOrder(4)));
    }
}
