//! Run parameters for the line and circle pipelines.
//!
//! Defaults match the command-line tools; a JSON file may override any subset
//! of fields, and explicit CLI flags override the file.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fs;
use std::path::Path;

use crate::error::{HoughError, ensure_positive_step};

const EDGE_THRESHOLD: f32 = 50.0;
const MIN_VOTES: u32 = 50;
const LINE_PEAKS: usize = 5;
const CIRCLE_PEAKS: usize = 3;

/// Parameters for line detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub edge_threshold: f32,
    pub theta_res_deg: f64,
    pub rho_res: f64,
    pub k: usize,
    pub min_votes: u32,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            edge_threshold: EDGE_THRESHOLD,
            theta_res_deg: 1.0,
            rho_res: 1.0,
            k: LINE_PEAKS,
            min_votes: MIN_VOTES,
        }
    }
}

impl LineConfig {
    pub fn validate(&self) -> Result<(), HoughError> {
        ensure_finite_threshold(self.edge_threshold)?;
        ensure_positive_step("theta_res_deg", self.theta_res_deg)?;
        ensure_positive_step("rho_res", self.rho_res)
    }
}

/// Parameters for fixed-radius circle detection.
///
/// `radius` has no meaningful default; zero means "unset" and fails validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleConfig {
    pub edge_threshold: f32,
    pub radius: i32,
    pub k: usize,
    pub min_votes: u32,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            edge_threshold: EDGE_THRESHOLD,
            radius: 0,
            k: CIRCLE_PEAKS,
            min_votes: MIN_VOTES,
        }
    }
}

impl CircleConfig {
    pub fn with_radius(radius: i32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), HoughError> {
        ensure_finite_threshold(self.edge_threshold)?;
        if self.radius <= 0 {
            return Err(HoughError::invalid(
                "radius",
                format!("must be > 0, got {}", self.radius),
            ));
        }
        Ok(())
    }
}

fn ensure_finite_threshold(threshold: f32) -> Result<(), HoughError> {
    if !threshold.is_finite() {
        return Err(HoughError::invalid(
            "edge_threshold",
            format!("must be finite, got {threshold}"),
        ));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Load a JSON config file; missing fields take their defaults.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: LineConfig = serde_json::from_str(r#"{ "k": 2, "rho_res": 0.5 }"#).unwrap();
        assert_eq!(cfg.k, 2);
        assert_eq!(cfg.rho_res, 0.5);
        assert_eq!(cfg.theta_res_deg, 1.0);
        assert_eq!(cfg.min_votes, 50);
        assert_eq!(cfg.edge_threshold, 50.0);
    }

    #[test]
    fn circle_config_requires_a_radius() {
        let err = CircleConfig::default().validate().unwrap_err();
        assert!(matches!(
            err,
            HoughError::InvalidInput {
                parameter: "radius",
                ..
            }
        ));
        assert!(CircleConfig::with_radius(60).validate().is_ok());
    }

    #[test]
    fn line_config_rejects_bad_values() {
        let bad_theta = LineConfig {
            theta_res_deg: 0.0,
            ..LineConfig::default()
        };
        assert!(bad_theta.validate().is_err());
        let bad_threshold = LineConfig {
            edge_threshold: f32::NAN,
            ..LineConfig::default()
        };
        assert!(matches!(
            bad_threshold.validate(),
            Err(HoughError::InvalidInput {
                parameter: "edge_threshold",
                ..
            })
        ));
    }

    #[test]
    fn load_config_reports_the_path() {
        let path = Path::new("definitely/not/here.json");
        let err = load_config::<LineConfig>(path).unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.json"));
    }
}
