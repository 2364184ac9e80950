//! AskDesk configuration system.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskDeskConfig {
    /// Institute name woven into fixed replies.
    #[serde(default = "default_institute_name")]
    pub institute_name: String,
    /// One-line description used as the fallback AI context when no dataset
    /// entry matches the query.
    #[serde(default = "default_institute_description")]
    pub institute_description: String,
    /// Domain synonym table applied by the query normalizer. Keys are
    /// replaced whole-word by their values, one left-to-right pass.
    #[serde(default = "default_synonyms")]
    pub synonyms: BTreeMap<String, String>,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

fn default_institute_name() -> String {
    "Abhinav Academy".into()
}
fn default_institute_description() -> String {
    "Abhinav Academy is an educational institute in Gadhinglaj, Maharashtra, \
     offering coaching for competitive exams like JEE, NEET, and MHT-CET."
        .into()
}
fn default_synonyms() -> BTreeMap<String, String> {
    [("campus", "contact"), ("institute", "contact"), ("facility", "contact")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for AskDeskConfig {
    fn default() -> Self {
        Self {
            institute_name: default_institute_name(),
            institute_description: default_institute_description(),
            synonyms: default_synonyms(),
            dataset: DatasetConfig::default(),
            search: SearchConfig::default(),
            llm: LlmConfig::default(),
            feedback: FeedbackConfig::default(),
        }
    }
}

impl AskDeskConfig {
    /// Load config from the default path (~/.askdesk/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::AskDeskError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::AskDeskError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::AskDeskError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the AskDesk home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".askdesk")
    }
}

/// Dataset source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// HTTP endpoint the dataset is fetched from on startup. Empty = none.
    #[serde(default)]
    pub url: String,
    /// Local JSON file to load instead of (or before) the URL. Empty = none.
    #[serde(default)]
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            path: String::new(),
        }
    }
}

/// Fuzzy search tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Score cutoff for answer resolution. Scores run 0.0 (exact) to 1.0;
    /// a hit counts when its score is at or below the threshold.
    #[serde(default = "default_strict_threshold")]
    pub strict_threshold: f64,
    /// Looser cutoff used only for suggestions — recall over precision.
    #[serde(default = "default_lenient_threshold")]
    pub lenient_threshold: f64,
    /// How many top fuzzy hits make it into an answer.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Suggestion list length.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

fn default_strict_threshold() -> f64 {
    0.3
}
fn default_lenient_threshold() -> f64 {
    0.5
}
fn default_max_results() -> usize {
    2
}
fn default_max_suggestions() -> usize {
    3
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strict_threshold: default_strict_threshold(),
            lenient_threshold: default_lenient_threshold(),
            max_results: default_max_results(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

/// Generative fallback provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// When false, no-match queries get the fixed apology instead of an AI
    /// call (the flat-FAQ behavior).
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Hard cap on the external call; expiry degrades to the apology.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    800
}
fn default_timeout_secs() -> u64 {
    15
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Feedback / unresolved-question sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    /// SQLite path. Empty = ~/.askdesk/feedback.db.
    #[serde(default)]
    pub db_path: String,
}

fn bool_true() -> bool {
    true
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            db_path: String::new(),
        }
    }
}

impl FeedbackConfig {
    pub fn resolved_db_path(&self) -> PathBuf {
        if self.db_path.is_empty() {
            AskDeskConfig::home_dir().join("feedback.db")
        } else {
            PathBuf::from(&self.db_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AskDeskConfig::default();
        assert_eq!(config.institute_name, "Abhinav Academy");
        assert!((config.search.strict_threshold - 0.3).abs() < 1e-9);
        assert!((config.search.lenient_threshold - 0.5).abs() < 1e-9);
        assert!(!config.llm.enabled);
        assert_eq!(config.synonyms.get("campus").map(String::as_str), Some("contact"));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            institute_name = "Test Institute"

            [search]
            strict_threshold = 0.25
            max_results = 1

            [llm]
            enabled = true
            model = "llama3.2"
        "#;

        let config: AskDeskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.institute_name, "Test Institute");
        assert!((config.search.strict_threshold - 0.25).abs() < 1e-9);
        assert_eq!(config.search.max_results, 1);
        assert!(config.llm.enabled);
        assert_eq!(config.llm.model, "llama3.2");
        // Untouched sections keep their defaults.
        assert_eq!(config.search.max_suggestions, 3);
        assert_eq!(config.llm.timeout_secs, 15);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: AskDeskConfig = toml::from_str("").unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.search.max_results, 2);
        assert_eq!(config.synonyms.len(), 3);
    }

    #[test]
    fn test_home_dir() {
        let home = AskDeskConfig::home_dir();
        assert!(home.to_string_lossy().contains("askdesk"));
    }
}
