use crate::adapters::LocalStorage;
use crate::core::tier::in_tier;
use crate::core::usage_store::UsageStore;
use crate::domain::model::{Question, QuestionCatalog};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::validate_catalog;

pub const DEFAULT_CATALOG_FILE: &str = "BeMillionaireQuestions.json";

/// Reads and parses the catalog, keeping source order.
pub fn try_load_questions<S: Storage + ?Sized>(storage: &S, path: &str) -> Result<Vec<Question>> {
    let unavailable = |reason: String| TrackerError::CatalogUnavailable {
        path: path.to_string(),
        reason,
    };

    if !storage.exists(path) {
        return Err(unavailable("file not found".to_string()));
    }

    let bytes = storage.read_file(path).map_err(|e| unavailable(e.to_string()))?;
    let catalog: QuestionCatalog =
        serde_json::from_slice(&bytes).map_err(|e| unavailable(e.to_string()))?;

    Ok(catalog.questions)
}

/// Like [`try_load_questions`] but a failure yields an empty catalog.
pub fn load_questions_from<S: Storage + ?Sized>(storage: &S, path: &str) -> Vec<Question> {
    match try_load_questions(storage, path) {
        Ok(questions) => {
            tracing::debug!("Loaded {} question(s) from {}", questions.len(), path);
            questions
        }
        Err(e) => {
            tracing::error!("{}; continuing with zero questions", e);
            Vec::new()
        }
    }
}

/// Loads `BeMillionaireQuestions.json` from the working directory.
pub fn load_questions() -> Vec<Question> {
    load_questions_from(&LocalStorage::working_dir(), DEFAULT_CATALOG_FILE)
}

/// Loads the catalog and, when `validate` is set, logs every catalog issue as
/// a warning. Questions with issues are still returned.
pub fn load_checked<S: Storage + ?Sized>(storage: &S, path: &str, validate: bool) -> Vec<Question> {
    let questions = load_questions_from(storage, path);
    if validate {
        let issues = validate_catalog(&questions);
        for issue in &issues {
            tracing::warn!("Catalog issue: {}", issue);
        }
        if !issues.is_empty() {
            tracing::warn!("{} catalog issue(s) found in {}", issues.len(), path);
        }
    }
    questions
}

/// Unused catalog questions in `tier`, in catalog order.
pub fn eligible_questions<'a, S: Storage>(
    questions: &'a [Question],
    store: &UsageStore<S>,
    tier: u8,
) -> Vec<&'a Question> {
    questions
        .iter()
        .filter(|q| in_tier(&q.id, tier) && !store.is_used(&q.id))
        .collect()
}

pub fn next_question<'a, S: Storage>(
    questions: &'a [Question],
    store: &UsageStore<S>,
    tier: u8,
) -> Option<&'a Question> {
    questions
        .iter()
        .find(|q| in_tier(&q.id, tier) && !store.is_used(&q.id))
}

/// Next unused question in `tier`. When every catalog question in the tier has
/// been used the tier is reset first, even if ids no longer in the catalog
/// still count as unused in the store.
pub fn pick_next_question<'a, S: Storage>(
    questions: &'a [Question],
    store: &mut UsageStore<S>,
    tier: u8,
) -> Option<&'a Question> {
    if let Some(question) = next_question(questions, store, tier) {
        return Some(question);
    }
    if !questions.iter().any(|q| in_tier(&q.id, tier)) {
        return None;
    }
    tracing::info!("Tier {} has no unused catalog question, resetting", tier);
    store.reset_tier(tier);
    next_question(questions, store, tier)
}
