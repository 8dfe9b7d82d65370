//! YAML run parameters (`parameters.yaml`).
//!
//! Layout:
//! ```yaml
//! settings:
//!   START_POINT: [45.07, 7.68]
//!   TARGET_DISTANCE_KM: 5.0
//!   TOLERANCE: 0.1
//!   NUM_ATTEMPTS: 1000
//!   MAX_PERCENTAGE_OF_DUPLICATE_NODES: 0.75
//!   DISCARD_SIMILARITY_THRESHOLD: 0.8
//! paths:
//!   RESULTS_PATH: data/results
//! ```

use anyhow::{bail, Context, Result};
use loopfinder::similarity::validate_similarity_threshold;
use loopfinder::{Coordinate, EdgeWeight, LoopSearchCfg};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Parameters {
    pub settings: Settings,
    pub paths: Paths,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Settings {
    /// `[lat, lon]` in degrees.
    pub start_point: [f64; 2],
    pub target_distance_km: f64,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_attempts")]
    pub num_attempts: usize,
    #[serde(default = "default_duplicates")]
    pub max_percentage_of_duplicate_nodes: f64,
    /// Absent, null, or 0 disables the similarity filter.
    #[serde(default)]
    pub discard_similarity_threshold: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Paths {
    pub results_path: PathBuf,
}

fn default_tolerance() -> f64 {
    0.1
}

fn default_attempts() -> usize {
    1000
}

fn default_duplicates() -> f64 {
    0.75
}

impl Parameters {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn start_point(&self) -> Coordinate {
        let [lat, lon] = self.settings.start_point;
        Coordinate::new(lat, lon)
    }

    pub fn override_start(&mut self, lat: f64, lon: f64) {
        self.settings.start_point = [lat, lon];
    }

    pub fn search_cfg(&self) -> LoopSearchCfg {
        LoopSearchCfg {
            target_km: self.settings.target_distance_km,
            attempts: self.settings.num_attempts,
            tolerance: self.settings.tolerance,
            max_duplicate_ratio: self.settings.max_percentage_of_duplicate_nodes,
            weight: EdgeWeight::Length,
        }
    }

    pub fn similarity_threshold(&self) -> Option<f64> {
        self.settings
            .discard_similarity_threshold
            .filter(|&t| t != 0.0)
    }

    /// Check every parameter before any graph work starts.
    pub fn validate(&self) -> Result<()> {
        let [lat, lon] = self.settings.start_point;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            bail!("start point ({lat}, {lon}) is not a valid coordinate");
        }
        self.search_cfg().validate()?;
        if let Some(t) = self.similarity_threshold() {
            validate_similarity_threshold(t)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
settings:
  START_POINT: [45.07, 7.68]
  TARGET_DISTANCE_KM: 5.0
  TOLERANCE: 0.2
  NUM_ATTEMPTS: 300
  MAX_PERCENTAGE_OF_DUPLICATE_NODES: 0.6
  DISCARD_SIMILARITY_THRESHOLD: 0.8
paths:
  RESULTS_PATH: data/results
"#;

    #[test]
    fn parses_full_file() {
        let p = Parameters::from_yaml_str(FULL).unwrap();
        assert_eq!(p.start_point(), Coordinate::new(45.07, 7.68));
        let cfg = p.search_cfg();
        assert_eq!(cfg.target_km, 5.0);
        assert_eq!(cfg.attempts, 300);
        assert_eq!(cfg.tolerance, 0.2);
        assert_eq!(cfg.max_duplicate_ratio, 0.6);
        assert_eq!(p.similarity_threshold(), Some(0.8));
        assert_eq!(p.paths.results_path, PathBuf::from("data/results"));
        p.validate().unwrap();
    }

    #[test]
    fn defaults_and_disabled_filter() {
        let text = r#"
settings:
  START_POINT: [0.0, 0.0]
  TARGET_DISTANCE_KM: 3.0
  DISCARD_SIMILARITY_THRESHOLD: 0.0
paths:
  RESULTS_PATH: out
"#;
        let p = Parameters::from_yaml_str(text).unwrap();
        assert_eq!(p.settings.tolerance, 0.1);
        assert_eq!(p.settings.num_attempts, 1000);
        assert_eq!(p.similarity_threshold(), None);
        p.validate().unwrap();
    }

    #[test]
    fn rejects_bad_values() {
        let mut p = Parameters::from_yaml_str(FULL).unwrap();
        p.settings.tolerance = 0.0;
        assert!(p.validate().is_err());

        let mut p = Parameters::from_yaml_str(FULL).unwrap();
        p.settings.discard_similarity_threshold = Some(1.0);
        assert!(p.validate().is_err());

        let mut p = Parameters::from_yaml_str(FULL).unwrap();
        p.override_start(95.0, 0.0);
        assert!(p.validate().is_err());
    }

    #[test]
    fn missing_file_has_context() {
        let err = Parameters::load("/definitely/not/here.yaml").unwrap_err();
        assert!(format!("{err:#}").contains("reading /definitely/not/here.yaml"));
    }
}
