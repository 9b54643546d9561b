use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// `T<NN><suffix>`, e.g. `T02-003`. The prefix is what ties the id to its tier.
    pub id: String,
    pub tier: i32,
    pub question_text: String,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.correct)
    }
}

/// Root of the catalog document: `{"questions": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionCatalog {
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Question id to used flag, kept in insertion order so the saved file is stable.
pub type UsageMap = IndexMap<String, bool>;
