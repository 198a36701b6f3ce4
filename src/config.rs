use crate::{
    alphabet::Alphabet,
    gel::{MigrationConfig, MigrationModel},
    gel_render::{AsciiGel, GelCanvas},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for one digest run. Every field falls back to its default when it
/// is missing from the JSON file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub alphabet: Alphabet,
    pub migration: MigrationConfig,
    pub ascii: AsciiGel,
    pub canvas: GelCanvas,
}

impl DigestConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let ret: Self = serde_json::from_str(text).context("Could not parse digest config JSON")?;
        ret.validate()?;
        Ok(ret)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file '{}'", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    pub fn migration_model(&self) -> Result<MigrationModel> {
        Ok(MigrationModel::new(self.migration.clone())?)
    }

    fn validate(&self) -> Result<()> {
        self.migration_model()?;
        self.ascii.validate()?;
        if self.alphabet.symbols().is_empty() {
            anyhow::bail!("Alphabet has no symbols");
        }
        if let Some(symbol) = self.alphabet.first_non_ascii() {
            anyhow::bail!("Alphabet symbol '{symbol}' is not ASCII");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DigestConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DigestConfig::default());
        assert_eq!(config.migration.epsilon, 1e-9);
        assert_eq!(config.alphabet, Alphabet::dna());
    }

    #[test]
    fn test_partial_override() {
        let config = DigestConfig::from_json_str(
            r#"{"migration":{"single_fragment_coordinate":0.1},"ascii":{"width":80}}"#,
        )
        .unwrap();
        assert_eq!(config.migration.single_fragment_coordinate, 0.1);
        assert_eq!(config.migration.epsilon, 1e-9);
        assert_eq!(config.ascii.width, 80);
        assert_eq!(config.ascii.margin, AsciiGel::default().margin);
    }

    #[test]
    fn test_rejects_bad_epsilon() {
        assert!(DigestConfig::from_json_str(r#"{"migration":{"epsilon":-1.0}}"#).is_err());
    }

    #[test]
    fn test_rejects_non_ascii_alphabet() {
        let err =
            DigestConfig::from_json_str(r#"{"alphabet":{"complements":[["Ā","T"],["C","G"]]}}"#)
                .unwrap_err();
        assert!(err.to_string().contains("not ASCII"));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"canvas":{{"width":800.0}}}}"#).unwrap();
        let config = DigestConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.canvas.width, 800.0);
    }
}
