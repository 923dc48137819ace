mod categories;
mod questions;
mod quizzes;

use serde::Serialize;

use crate::db::{queries::categories::CategoryMap, Question};

use super::error::ApiError;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

pub type ApiResponse<T> = Result<T, ApiError>;

/// Body shared by every endpoint that returns a list of questions.
#[derive(Serialize)]
struct QuestionList {
    success: bool,
    questions: Vec<Question>,
    total_questions: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<CategoryMap>,
    current_category: Option<String>,
}

impl QuestionList {
    fn unscoped(questions: Vec<Question>) -> Self {
        QuestionList {
            success: true,
            total_questions: questions.len() as i64,
            questions,
            categories: None,
            current_category: None,
        }
    }
}
