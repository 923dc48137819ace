use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_category_map, questions},
        NewQuestion,
    },
    server::{app::AppState, deserializers::LooseI64, error::ApiError},
};

use super::{ApiResponse, QuestionList};

const QUESTIONS_PER_PAGE: i64 = 10;

const REQUIRED_FIELDS: [&str; 4] = ["question", "answer", "category", "difficulty"];

#[derive(Deserialize)]
struct PageQuery {
    page: Option<String>,
}

// presence is checked on the raw object first, the types only here
#[derive(Deserialize)]
struct QuestionFields {
    question: String,
    answer: String,
    category: LooseI64,
    difficulty: LooseI64,
}

impl From<QuestionFields> for NewQuestion {
    fn from(fields: QuestionFields) -> Self {
        NewQuestion {
            question: fields.question,
            answer: fields.answer,
            category: fields.category.0,
            difficulty: fields.difficulty.0,
        }
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
    total_questions: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

/// Unparseable pages fall back to the first one, pages below 1 are clamped to it.
fn page_number(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(1)
        .max(1)
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<Json<QuestionList>> {
    let page = page_number(
        query
            .as_ref()
            .ok()
            .and_then(|Query(q)| q.page.as_deref()),
    );
    let offset = (page - 1).saturating_mul(QUESTIONS_PER_PAGE);

    let questions = questions::get_questions_page(&pool, QUESTIONS_PER_PAGE, offset).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let total_questions = questions::count_questions(&pool).await?;
    let categories = get_category_map(&pool).await?;

    Ok(Json(QuestionList {
        success: true,
        questions,
        total_questions,
        categories: Some(categories),
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResponse<(StatusCode, Json<Created>)> {
    let Json(fields) = payload.map_err(|rejection| {
        tracing::debug!("Rejected question body: {rejection}");
        ApiError::BadRequest
    })?;
    if !REQUIRED_FIELDS.iter().all(|field| fields.contains_key(*field)) {
        return Err(ApiError::BadRequest);
    }

    let new_question: NewQuestion = serde_json::from_value::<QuestionFields>(Value::Object(fields))
        .map_err(|e| {
            tracing::warn!("Question fields do not fit the store: {e}");
            ApiError::Unprocessable
        })?
        .into();

    let created = questions::create_question(&pool, &new_question)
        .await
        .map_err(ApiError::unprocessable)?;
    let total_questions = questions::count_questions(&pool)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::info!(id = created, "Question created");

    Ok((
        StatusCode::CREATED,
        Json(Created {
            success: true,
            created,
            total_questions,
        }),
    ))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<Deleted>> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;

    questions::get_question_by_id(&pool, id).await?;
    questions::delete_question(&pool, id)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::info!(id, "Question deleted");

    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    payload: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<Json<QuestionList>> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!("Rejected search body: {rejection}");
        ApiError::BadRequest
    })?;
    let term = body
        .search_term
        .filter(|term| !term.is_empty())
        .ok_or(ApiError::BadRequest)?;

    let questions = questions::search_questions(&pool, &term).await?;
    Ok(Json(QuestionList::unscoped(questions)))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
