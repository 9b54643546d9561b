use clap::Parser;
use question_tracker::core::catalog::{load_checked, pick_next_question, try_load_questions};
use question_tracker::core::{ConfigProvider, Storage};
use question_tracker::utils::error::ErrorSeverity;
use question_tracker::utils::logger;
use question_tracker::utils::validation::{validate_catalog, Validate};
use question_tracker::{CliConfig, Command, LocalStorage, Question, TomlConfig, TrackerError, UsageStore};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let toml = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        toml.as_ref()
            .and_then(|t| t.log_level())
            .unwrap_or_else(|| logger::DEFAULT_LEVEL.to_string())
    };
    if cli.json_logs || toml.as_ref().is_some_and(|t| t.json_logs()) {
        logger::init_json_logger(&level);
    } else {
        logger::init_cli_logger(&level);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let validation = match &toml {
        Some(config) => config.validate().and_then(|_| cli.validate()),
        None => cli.validate(),
    };
    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let provider: &dyn ConfigProvider = match &toml {
        Some(config) => config,
        None => &cli,
    };

    if let Err(e) = run(&cli.command, provider, LocalStorage::working_dir()) {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn check_catalog<S: Storage>(storage: &S, path: &str) -> Result<(), TrackerError> {
    let questions = try_load_questions(storage, path)?;
    let issues = validate_catalog(&questions);
    if issues.is_empty() {
        println!("✅ {} question(s), no issues", questions.len());
        return Ok(());
    }
    for issue in &issues {
        println!("⚠️  {}", issue);
    }
    Err(TrackerError::CatalogValidationError {
        issues: issues.iter().map(|i| i.to_string()).collect(),
    })
}

// The store writes through on open and on every mutation; write failures are
// logged there and never turn into an exit code.
fn run<S: Storage + Clone>(
    command: &Command,
    provider: &dyn ConfigProvider,
    storage: S,
) -> Result<(), TrackerError> {
    let open = || -> (Vec<Question>, UsageStore<S>) {
        let questions = load_checked(&storage, provider.catalog_path(), provider.validate_catalog());
        let store = UsageStore::from_questions(storage.clone(), provider.usage_path(), &questions);
        (questions, store)
    };

    match command {
        Command::Validate => check_catalog(&storage, provider.catalog_path())?,
        Command::Status => println!("{}", open().1.status()),
        Command::IsUsed { id } => println!("{}", open().1.is_used(id)),
        Command::Mark { id } => {
            open().1.mark_used(id);
            println!("Marked {} as used", id);
        }
        Command::Reset { tier: Some(tier) } => {
            open().1.reset_tier(*tier);
            println!("Tier {} reset", tier);
        }
        Command::Reset { tier: None } => {
            open().1.reset_all();
            println!("All questions reset");
        }
        Command::Next { tier } => {
            let (questions, mut store) = open();
            match pick_next_question(&questions, &mut store, *tier) {
                Some(question) => {
                    store.mark_used(&question.id);
                    println!("[{}] {}", question.id, question.question_text);
                    for (letter, answer) in ('A'..='Z').zip(&question.answers) {
                        println!("  {}: {}", letter, answer.text);
                    }
                }
                None => println!("No questions in tier {}", tier),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use question_tracker::{MemoryStorage, UsageMap};

    const CATALOG: &str = r#"{"questions": [
        {"id": "T02-1", "tier": 2, "questionText": "Two?",
         "answers": [{"text": "a", "correct": true}, {"text": "b", "correct": false}]}
    ]}"#;

    fn provider() -> TomlConfig {
        let mut config = TomlConfig::default();
        config.catalog.path = "q.json".to_string();
        config.usage.path = "usage.json".to_string();
        config
    }

    fn saved(storage: &MemoryStorage) -> UsageMap {
        serde_json::from_slice(&storage.get_file("usage.json").unwrap()).unwrap()
    }

    #[test]
    fn test_mark_with_failing_writes_still_succeeds() {
        let storage = MemoryStorage::new().with_file("q.json", CATALOG);
        storage.set_fail_writes(true);

        let result = run(&Command::Mark { id: "T02-1".to_string() }, &provider(), storage.clone());

        assert!(result.is_ok());
        assert!(storage.get_file("usage.json").is_none());
    }

    #[test]
    fn test_validate_does_not_touch_usage_file() {
        let storage = MemoryStorage::new().with_file(
            "q.json",
            r#"{"questions": [{"id": "T02-1", "tier": 3, "questionText": "?", "answers": []}]}"#,
        );

        let result = run(&Command::Validate, &provider(), storage.clone());

        assert!(matches!(result, Err(TrackerError::CatalogValidationError { .. })));
        assert!(storage.get_file("usage.json").is_none());
    }

    #[test]
    fn test_next_recovers_when_only_retired_ids_are_unused() {
        let storage = MemoryStorage::new()
            .with_file("q.json", CATALOG)
            .with_file("usage.json", r#"{"T02-1": true, "T02-retired": false}"#);

        run(&Command::Next { tier: 2 }, &provider(), storage.clone()).unwrap();

        assert_eq!(saved(&storage).get("T02-1"), Some(&true));
    }
}
