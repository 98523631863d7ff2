use axum::Json;
use axum::extract::{Query, State};

use trivia_types::api::{CategoriesResponse, CategoryMap, CategoryQuestionsResponse};
use trivia_types::models::Question;

use crate::error::ApiError;
use crate::extract::IdPath;
use crate::pagination::{PageQuery, paginate};
use crate::{AppState, with_db};

pub(crate) fn category_map(rows: Vec<trivia_db::models::CategoryRow>) -> CategoryMap {
    rows.into_iter().map(|c| (c.id, c.kind)).collect()
}

/// GET /categories
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let rows = with_db(&state, |db| db.list_categories()).await?;
    let categories = category_map(rows);

    Ok(Json(CategoriesResponse {
        success: true,
        total_categories: categories.len(),
        categories,
    }))
}

/// GET /categories/{id}/questions: every question in the category, one page at a time.
pub async fn get_category_questions(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    Query(query): Query<PageQuery>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let (category, questions) = with_db(&state, move |db| {
        let Some(category) = db.get_category(id)? else {
            return Ok(None);
        };
        let questions = db.questions_in_category(id)?;
        Ok(Some((category, questions)))
    })
    .await?
    .ok_or(ApiError::NotFound)?;

    let total_questions = questions.len();
    let page: Vec<Question> = paginate(&questions, query.page())
        .iter()
        .cloned()
        .map(Question::from)
        .collect();

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: page,
        current_category: category.kind,
        total_questions,
    }))
}
