use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::{
        categories::{get_category, get_category_map, CategoryMap},
        questions::get_questions_for_category,
    },
    server::{app::AppState, error::ApiError},
};

use super::{ApiResponse, QuestionList};

#[derive(Serialize)]
struct CategoryListing {
    success: bool,
    categories: CategoryMap,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoryListing>> {
    let categories = get_category_map(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoryListing {
        success: true,
        categories,
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<QuestionList>> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;

    let questions = get_questions_for_category(&pool, id).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    let category = get_category(&pool, id).await?;

    Ok(Json(QuestionList {
        current_category: Some(category.kind),
        ..QuestionList::unscoped(questions)
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
