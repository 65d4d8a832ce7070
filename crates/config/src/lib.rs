//! State-vector case catalogs: YAML lists, single TOML files, or directories of TOML files.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use shape_core::constants::{EARTH_MU_KM3_S2, EARTH_MU_M3_S2};
use thiserror::Error;

/// Length unit shared by a case's position, velocity and `mu`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Km,
    M,
}

impl LengthUnit {
    pub fn label(self) -> &'static str {
        match self {
            LengthUnit::Km => "km",
            LengthUnit::M => "m",
        }
    }
}

/// One state vector to evaluate, as written in a catalog file.
#[derive(Debug, Deserialize, Clone)]
pub struct CaseConfig {
    pub name: String,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    #[serde(default)]
    pub mu: Option<f64>,
    #[serde(default)]
    pub central_body: Option<String>,
    #[serde(default)]
    pub units: LengthUnit,
}

impl CaseConfig {
    /// Explicit `mu` wins; otherwise the central body preset in the case's units.
    pub fn gravitational_parameter(&self) -> Result<f64, ConfigError> {
        if let Some(mu) = self.mu {
            return Ok(mu);
        }
        let body = self
            .central_body
            .as_deref()
            .ok_or_else(|| ConfigError::MissingMu(self.name.clone()))?;
        match (body.to_ascii_uppercase().as_str(), self.units) {
            ("EARTH", LengthUnit::Km) => Ok(EARTH_MU_KM3_S2),
            ("EARTH", LengthUnit::M) => Ok(EARTH_MU_M3_S2),
            _ => Err(ConfigError::UnknownBody(body.to_string())),
        }
    }
}

/// Errors that can occur while loading case catalogs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("case '{0}' has neither `mu` nor `central_body`")]
    MissingMu(String),
    #[error("no gravitational parameter preset for central body '{0}'")]
    UnknownBody(String),
}

/// Load state-vector cases from a YAML file, a TOML file, or a directory of TOML files.
pub fn load_cases<P: AsRef<Path>>(path: P) -> Result<Vec<CaseConfig>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const YAML: &str = r#"
- name: leo-km
  position: [1000.0, 5000.0, 7000.0]
  velocity: [3.0, 4.0, 5.0]
  central_body: earth
- name: leo-m
  position: [1000000.0, 5000000.0, 7000000.0]
  velocity: [3000.0, 4000.0, 5000.0]
  mu: 3.986004418e14
  units: m
"#;

    #[test]
    fn yaml_catalog_loads_all_cases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.yaml");
        fs::write(&path, YAML).unwrap();

        let cases = load_cases(&path).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].units, LengthUnit::Km);
        assert_eq!(cases[0].gravitational_parameter().unwrap(), EARTH_MU_KM3_S2);
        assert_eq!(cases[1].units, LengthUnit::M);
        assert_eq!(cases[1].gravitational_parameter().unwrap(), 3.986004418e14);
    }

    #[test]
    fn toml_directory_is_read_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("b.toml"),
            "name = \"second\"\nposition = [7000.0, 0.0, 0.0]\nvelocity = [0.0, 7.5, 0.0]\ncentral_body = \"Earth\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("a.toml"),
            "name = \"first\"\nposition = [7000.0, 0.0, 0.0]\nvelocity = [0.0, 7.5, 0.0]\nmu = 1.0\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let cases = load_cases(dir.path()).unwrap();
        let names: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(cases[1].gravitational_parameter().unwrap(), EARTH_MU_KM3_S2);
    }

    #[test]
    fn unresolvable_mu_is_an_error() {
        let case = CaseConfig {
            name: "bare".into(),
            position: [1.0, 0.0, 0.0],
            velocity: [0.0, 1.0, 0.0],
            mu: None,
            central_body: None,
            units: LengthUnit::Km,
        };
        assert!(matches!(
            case.gravitational_parameter(),
            Err(ConfigError::MissingMu(name)) if name == "bare"
        ));

        let mars = CaseConfig {
            central_body: Some("MARS".into()),
            ..case
        };
        assert!(matches!(
            mars.gravitational_parameter(),
            Err(ConfigError::UnknownBody(body)) if body == "MARS"
        ));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "- name: x\n  position: not-a-vector\n").unwrap();
        assert!(matches!(load_cases(&path), Err(ConfigError::Parse(_))));
    }
}
