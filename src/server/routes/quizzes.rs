use std::collections::HashSet;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    quiz,
    server::{app::AppState, deserializers::LooseI64, error::ApiError},
    telemetry::{quiz_category_label, QUIZ_QUESTIONS_SERVED},
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizCategory {
    #[serde(default)]
    id: Option<LooseI64>,
}

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Vec<i64>,
    #[serde(default)]
    quiz_category: Option<QuizCategory>,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Option<Question>,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<Json<QuizQuestion>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected quiz body: {rejection}");
        ApiError::Unprocessable
    })?;
    let category = quiz::category_filter(
        request
            .quiz_category
            .and_then(|c| c.id)
            .map(|LooseI64(id)| id),
    );

    let candidates = match category {
        Some(id) => questions::get_questions_for_category(&pool, id).await,
        None => questions::get_all_questions(&pool).await,
    }
    .map_err(ApiError::unprocessable)?;

    let previous: HashSet<i64> = request.previous_questions.into_iter().collect();
    let question = quiz::pick_next(candidates, &previous, &mut rand::thread_rng());

    match &question {
        Some(q) => {
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[quiz_category_label(category).as_str()])
                .inc();
            tracing::debug!(id = q.id, served = previous.len(), "Quiz question picked");
        }
        None => tracing::debug!(served = previous.len(), "Quiz pool exhausted"),
    }

    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
