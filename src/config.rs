use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, sim::ProcessSpec};

/// Parameters for one run. Parsing only; the engine validates on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub quantum: i64,
    pub processes: Vec<ProcessSpec>,
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            quantum: 2,
            processes: vec![
                ProcessSpec::new("P1", 0, 3).with_priority(1),
                ProcessSpec::new("P2", 5, 2).with_priority(1),
                ProcessSpec::new("P3", 8, 4).with_priority(1),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_json_with_optional_priority() {
        let config = SimConfig::from_json(
            r#"{
                "quantum": 3,
                "processes": [
                    { "id": "A", "arrival": 0, "burst": 4, "priority": 2 },
                    { "id": "B", "arrival": 1, "burst": 2 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.quantum, 3);
        assert_eq!(
            config.processes,
            vec![
                ProcessSpec::new("A", 0, 4).with_priority(2),
                ProcessSpec::new("B", 1, 2),
            ]
        );
    }

    #[test]
    fn parsing_does_not_validate() {
        // Rejected later by the engine, not here
        let config = SimConfig::from_json(
            r#"{ "quantum": 0, "processes": [{ "id": "A", "arrival": -1, "burst": 0 }] }"#,
        )
        .unwrap();
        assert_eq!(config.quantum, 0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            SimConfig::from_json("{ \"quantum\": "),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&SimConfig::default()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert_eq!(SimConfig::load(file.path()).unwrap(), SimConfig::default());
        assert!(matches!(
            SimConfig::load(file.path().with_extension("missing")),
            Err(ConfigError::Io(_))
        ));
    }
}
