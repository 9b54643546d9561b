pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::catalog::DEFAULT_CATALOG_FILE;
#[cfg(feature = "cli")]
use crate::core::usage_store::DEFAULT_USAGE_FILE;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_range, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "question-tracker")]
#[command(about = "Tracks which quiz questions are still eligible for play")]
pub struct CliConfig {
    /// Question catalog (JSON)
    #[arg(long, default_value = DEFAULT_CATALOG_FILE)]
    pub catalog: String,

    /// Usage file, rewritten after every change
    #[arg(long, default_value = DEFAULT_USAGE_FILE)]
    pub usage: String,

    /// TOML configuration file; overrides --catalog and --usage
    #[arg(long)]
    pub config: Option<String>,

    /// Skip catalog checks on load
    #[arg(long)]
    pub no_validate: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show unused questions per tier and the total used
    Status,
    /// Print whether a question has been used
    IsUsed { id: String },
    /// Mark a question as used
    Mark { id: String },
    /// Reset one tier, or everything when no tier is given
    Reset {
        #[arg(long)]
        tier: Option<u8>,
    },
    /// Pick the next unused question in a tier and mark it used
    Next {
        #[arg(long)]
        tier: u8,
    },
    /// Check the catalog and exit non-zero on issues
    Validate,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog
    }

    fn usage_path(&self) -> &str {
        &self.usage
    }

    fn validate_catalog(&self) -> bool {
        !self.no_validate
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        use crate::core::tier::{MAX_TIER, MIN_TIER};

        validate_path("catalog", &self.catalog)?;
        validate_path("usage", &self.usage)?;
        match &self.command {
            Command::Reset { tier: Some(tier) } | Command::Next { tier } => {
                validate_range("tier", *tier, MIN_TIER, MAX_TIER)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let config = CliConfig::parse_from(["question-tracker", "status"]);

        assert_eq!(config.catalog_path(), "BeMillionaireQuestions.json");
        assert_eq!(config.usage_path(), "SaveFile.json");
        assert!(config.validate_catalog());
        assert!(matches!(config.command, Command::Status));
    }

    #[test]
    fn test_tier_range_is_checked() {
        let config = CliConfig::parse_from(["question-tracker", "next", "--tier", "16"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["question-tracker", "reset", "--tier", "3"]);
        assert!(config.validate().is_ok());

        let config = CliConfig::parse_from(["question-tracker", "reset"]);
        assert!(config.validate().is_ok());
    }
}
