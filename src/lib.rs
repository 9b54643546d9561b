pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::{LocalStorage, MemoryStorage};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::catalog::{load_questions, load_questions_from};
pub use crate::core::shared::SharedUsageStore;
pub use crate::core::tier::{tier_of, tier_prefix};
pub use crate::core::usage_store::{StatusReport, UsageStore};
pub use crate::domain::model::{Answer, Question, UsageMap};
pub use crate::utils::error::{Result, TrackerError};
