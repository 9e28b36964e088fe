//! Questionnaire and survey response shapes

use serde::{Deserialize, Serialize};

/// Unique questionnaire identifier (database serial)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionnaireId(pub i64);

impl std::fmt::Display for QuestionnaireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for QuestionnaireId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Unique survey response identifier (database serial)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponseId(pub i64);

impl std::fmt::Display for ResponseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ResponseId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A single question inside a questionnaire
///
/// Multiple-choice questions carry their choices in `options`; free-form
/// questions set `free` and leave `options` empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt shown to the respondent
    pub text: String,
    /// Available choices for a multiple-choice question
    pub options: Vec<String>,
    /// Whether the answer is free-form text
    pub free: bool,
    /// Index of the pre-selected choice, when one applies
    #[serde(default)]
    pub option: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_deserializes_without_preselected_option() {
        let q: Question = serde_json::from_str(
            r#"{"text": "Coffee or tea?", "options": ["coffee", "tea"], "free": false}"#,
        )
        .unwrap();
        assert_eq!(q.option, None);
        assert_eq!(q.options.len(), 2);
    }

    #[test]
    fn test_question_roundtrip() {
        let q = Question {
            text: "Anything else?".to_string(),
            options: vec![],
            free: true,
            option: None,
        };
        let json = serde_json::to_string(&q).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(q, back);
    }
}
