use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::Subject;

const DATA_FILE_NAME: &str = "timetable_data.json";

fn default_subject_total() -> u32 {
    25
}

/// Which denominator the per-subject percentages divide by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalsMode {
    /// Fixed per-subject totals from this config; overall uses the plan's
    /// actual slot count.
    #[default]
    Configured,
    /// Every denominator is the number of slots the plan actually contains.
    Scheduled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default)]
    pub totals: TotalsMode,
    #[serde(default = "default_subject_total")]
    pub api_total: u32,
    #[serde(default = "default_subject_total")]
    pub statistics_total: u32,
    #[serde(default = "default_subject_total")]
    pub llm_total: u32,
}

impl ProgressConfig {
    pub fn configured_total(&self, subject: Subject) -> u32 {
        match subject {
            Subject::Api => self.api_total,
            Subject::Statistics => self.statistics_total,
            Subject::Llm => self.llm_total,
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            totals: TotalsMode::default(),
            api_total: default_subject_total(),
            statistics_total: default_subject_total(),
            llm_total: default_subject_total(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the default location under the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "studyplan")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// `--data-file` wins over `[storage] data_file`, which wins over the
    /// default under the data directory.
    pub fn data_file(&self, cli_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(path) = cli_override.or(self.storage.data_file.as_ref()) {
            return Ok(path.clone());
        }
        Ok(Self::data_dir()?.join(DATA_FILE_NAME))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Serializing config")
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.to_toml()?).with_context(|| format!("Writing {:?}", path))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.progress.totals, TotalsMode::Configured);
        assert_eq!(config.progress.configured_total(Subject::Llm), 25);
        assert!(config.storage.data_file.is_none());
    }

    #[test]
    fn partial_progress_section() {
        let config = AppConfig::from_toml(
            r#"
            [progress]
            totals = "scheduled"
            api_total = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.progress.totals, TotalsMode::Scheduled);
        assert_eq!(config.progress.api_total, 30);
        assert_eq!(config.progress.statistics_total, 25);
    }

    #[test]
    fn unknown_totals_mode_is_rejected() {
        assert!(AppConfig::from_toml("[progress]\ntotals = \"average\"").is_err());
    }

    #[test]
    fn cli_override_wins() {
        let config = AppConfig::from_toml("[storage]\ndata_file = \"/tmp/a.json\"").unwrap();
        let cli = PathBuf::from("/tmp/b.json");
        assert_eq!(config.data_file(Some(&cli)).unwrap(), cli);
        assert_eq!(config.data_file(None).unwrap(), PathBuf::from("/tmp/a.json"));
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig::default();
        let parsed = AppConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.progress.totals, config.progress.totals);
        assert_eq!(parsed.progress.api_total, 25);
    }
}
