use crate::core::tier::{tier_of, MAX_TIER, MIN_TIER};
use crate::domain::model::Question;
use crate::utils::error::{Result, TrackerError};
use std::collections::HashSet;
use std::fmt;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TrackerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// A problem found in the question catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    DuplicateId { id: String },
    TierOutOfRange { id: String, tier: i32 },
    /// The id prefix is missing or names a different tier than the `tier` field.
    TierPrefixMismatch { id: String, tier: i32, prefix_tier: Option<u8> },
    TooFewAnswers { id: String, count: usize },
    CorrectAnswerCount { id: String, count: usize },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::DuplicateId { id } => write!(f, "{}: duplicate id", id),
            CatalogIssue::TierOutOfRange { id, tier } => write!(
                f,
                "{}: tier {} outside {}..={}",
                id, tier, MIN_TIER, MAX_TIER
            ),
            CatalogIssue::TierPrefixMismatch {
                id,
                tier,
                prefix_tier: Some(prefix_tier),
            } => write!(f, "{}: tier {} but id prefix says {}", id, tier, prefix_tier),
            CatalogIssue::TierPrefixMismatch { id, tier, prefix_tier: None } => write!(
                f,
                "{}: tier {} but id has no T<NN> prefix",
                id, tier
            ),
            CatalogIssue::TooFewAnswers { id, count } => {
                write!(f, "{}: {} answer(s), at least 2 required", id, count)
            }
            CatalogIssue::CorrectAnswerCount { id, count } => {
                write!(f, "{}: {} correct answers, expected exactly 1", id, count)
            }
        }
    }
}

/// Checks the catalog conventions the usage store relies on. Returns every
/// issue found, in catalog order; an empty vector means the catalog is clean.
pub fn validate_catalog(questions: &[Question]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for q in questions {
        if !seen.insert(q.id.as_str()) {
            issues.push(CatalogIssue::DuplicateId { id: q.id.clone() });
        }

        if q.tier < i32::from(MIN_TIER) || q.tier > i32::from(MAX_TIER) {
            issues.push(CatalogIssue::TierOutOfRange {
                id: q.id.clone(),
                tier: q.tier,
            });
        }

        let prefix_tier = tier_of(&q.id);
        if prefix_tier.map(i32::from) != Some(q.tier) {
            issues.push(CatalogIssue::TierPrefixMismatch {
                id: q.id.clone(),
                tier: q.tier,
                prefix_tier,
            });
        }

        if q.answers.len() < 2 {
            issues.push(CatalogIssue::TooFewAnswers {
                id: q.id.clone(),
                count: q.answers.len(),
            });
        }

        let correct = q.answers.iter().filter(|a| a.correct).count();
        if correct != 1 {
            issues.push(CatalogIssue::CorrectAnswerCount {
                id: q.id.clone(),
                count: correct,
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Answer;

    fn question(id: &str, tier: i32, correct: &[bool]) -> Question {
        Question {
            id: id.to_string(),
            tier,
            question_text: format!("Question {}", id),
            answers: correct
                .iter()
                .enumerate()
                .map(|(i, &c)| Answer {
                    text: format!("Answer {}", i),
                    correct: c,
                })
                .collect(),
        }
    }

    #[test]
    fn test_clean_catalog_has_no_issues() {
        let questions = vec![
            question("T01-1", 1, &[true, false, false, false]),
            question("T15-1", 15, &[false, true]),
        ];
        assert!(validate_catalog(&questions).is_empty());
    }

    #[test]
    fn test_reports_each_problem() {
        let questions = vec![
            question("T01-1", 1, &[true, false]),
            question("T01-1", 1, &[true, false]),
            question("T03-1", 4, &[true, false]),
            question("Q1", 16, &[true]),
            question("T02-1", 2, &[true, true]),
        ];

        let issues = validate_catalog(&questions);

        assert!(issues.contains(&CatalogIssue::DuplicateId { id: "T01-1".to_string() }));
        assert!(issues.contains(&CatalogIssue::TierPrefixMismatch {
            id: "T03-1".to_string(),
            tier: 4,
            prefix_tier: Some(3),
        }));
        assert!(issues.contains(&CatalogIssue::TierOutOfRange { id: "Q1".to_string(), tier: 16 }));
        assert!(issues.contains(&CatalogIssue::TierPrefixMismatch {
            id: "Q1".to_string(),
            tier: 16,
            prefix_tier: None,
        }));
        assert!(issues.contains(&CatalogIssue::TooFewAnswers { id: "Q1".to_string(), count: 1 }));
        assert!(issues.contains(&CatalogIssue::CorrectAnswerCount {
            id: "T02-1".to_string(),
            count: 2,
        }));
        assert_eq!(issues.len(), 6);
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("tier", 3u8, 1, 15).is_ok());
        assert!(validate_range("tier", 0u8, 1, 15).is_err());
        assert!(validate_range("tier", 16u8, 1, 15).is_err());
    }

    #[test]
    fn test_out_of_range_tiers_are_reported() {
        let questions = vec![
            question("T16-1", 300, &[true, false]),
            question("T01-9", -1, &[true, false]),
        ];

        let issues = validate_catalog(&questions);

        assert!(issues.contains(&CatalogIssue::TierOutOfRange { id: "T16-1".to_string(), tier: 300 }));
        assert!(issues.contains(&CatalogIssue::TierOutOfRange { id: "T01-9".to_string(), tier: -1 }));
        assert!(issues.contains(&CatalogIssue::TierPrefixMismatch {
            id: "T01-9".to_string(),
            tier: -1,
            prefix_tier: Some(1),
        }));
    }

    #[test]
    fn test_validate_non_empty_string_and_one_of() {
        assert!(validate_non_empty_string("logging.level", "info").is_ok());
        assert!(validate_non_empty_string("logging.level", "   ").is_err());
        assert!(validate_one_of("logging.format", "json", &["compact", "json"]).is_ok());
        assert!(validate_one_of("logging.format", "xml", &["compact", "json"]).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("usage.path", "SaveFile.json").is_ok());
        assert!(validate_path("usage.path", "").is_err());
    }
}
