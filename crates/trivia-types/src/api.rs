use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Question;

/// Category id → label. Serialized as a JSON object keyed by the id.
pub type CategoryMap = BTreeMap<i64, String>;

/// An integer field that clients send either as a JSON number or as a
/// numeric string (`1` and `"1"` are both accepted).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LenientInt {
    Int(i64),
    Text(String),
}

impl LenientInt {
    /// `None` for empty or non-numeric text.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

// -- Categories --

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
    pub total_categories: usize,
}

// -- Questions --

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
}

/// Every field is optional on the wire so that a missing field is reported
/// as unprocessable rather than as a malformed body.
#[derive(Debug, Default, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<LenientInt>,
    pub difficulty: Option<LenientInt>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateQuestionResponse {
    pub success: bool,
    pub created: Question,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteQuestionResponse {
    pub success: bool,
    pub deleted: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub current_category: String,
    pub total_questions: usize,
}

// -- Quizzes --

/// The client also sends the category's `type`, which is ignored.
#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    pub id: LenientInt,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizRequest {
    pub quiz_category: Option<QuizCategory>,
    pub previous_questions: Option<Vec<i64>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
}
