use crate::core::catalog::DEFAULT_CATALOG_FILE;
use crate::core::usage_store::DEFAULT_USAGE_FILE;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub usage: UsageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: String,
    /// Log catalog issues (duplicate ids, tier/prefix mismatches, answer counts) on load.
    #[serde(default = "default_true")]
    pub validate: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            validate: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageConfig {
    #[serde(default = "default_usage_path")]
    pub path: String,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            path: default_usage_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    /// `compact` or `json`.
    pub format: Option<String>,
}

fn default_catalog_path() -> String {
    DEFAULT_CATALOG_FILE.to_string()
}

fn default_usage_path() -> String {
    DEFAULT_USAGE_FILE.to_string()
}

fn default_true() -> bool {
    true
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TrackerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TrackerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TrackerError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("catalog.path", &self.catalog.path)?;
        validate_path("usage.path", &self.usage.path)?;

        if let Some(format) = &self.logging.format {
            validate_one_of("logging.format", format, &["compact", "json"])?;
        }
        if let Some(level) = &self.logging.level {
            validate_non_empty_string("logging.level", level)?;
            validate_one_of(
                "logging.level",
                &level.to_ascii_lowercase(),
                &["trace", "debug", "info", "warn", "error"],
            )?;
        }

        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format.as_deref() == Some("json")
    }

    /// Lowercased `logging.level`, if set.
    pub fn log_level(&self) -> Option<String> {
        self.logging.level.as_deref().map(str::to_ascii_lowercase)
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog.path
    }

    fn usage_path(&self) -> &str {
        &self.usage.path
    }

    fn validate_catalog(&self) -> bool {
        self.catalog.validate
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[catalog]
path = "data/questions.json"
validate = false

[usage]
path = "saves/usage.json"

[logging]
level = "debug"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.catalog_path(), "data/questions.json");
        assert_eq!(config.usage_path(), "saves/usage.json");
        assert!(!config.validate_catalog());
        assert!(config.json_logs());
        assert_eq!(config.log_level().as_deref(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.catalog_path(), "BeMillionaireQuestions.json");
        assert_eq!(config.usage_path(), "SaveFile.json");
        assert!(config.validate_catalog());
        assert!(!config.json_logs());
        assert!(config.log_level().is_none());
    }

    #[test]
    fn test_log_level_is_passed_through() {
        let config = TomlConfig::from_toml_str(
            r#"
[logging]
level = "WARN"
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.log_level().as_deref(), Some("warn"));

        let config = TomlConfig::from_toml_str(
            r#"
[logging]
level = "  "
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QUESTION_TRACKER_TEST_SAVE_DIR", "/tmp/saves");

        let toml_content = r#"
[usage]
path = "${QUESTION_TRACKER_TEST_SAVE_DIR}/SaveFile.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.usage.path, "/tmp/saves/SaveFile.json");

        std::env::remove_var("QUESTION_TRACKER_TEST_SAVE_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[usage]
path = ""
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[logging]
format = "xml"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[catalog]\npath = \"file-test.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.catalog.path, "file-test.json");
    }
}
