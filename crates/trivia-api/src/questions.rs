use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use tracing::info;

use trivia_db::models::NewQuestion;
use trivia_types::api::{
    CreateQuestionRequest, CreateQuestionResponse, DeleteQuestionResponse, QuestionsResponse,
    SearchRequest, SearchResponse,
};
use trivia_types::models::Question;

use crate::categories::category_map;
use crate::error::ApiError;
use crate::extract::IdPath;
use crate::pagination::{PageQuery, paginate};
use crate::{AppState, with_db};

fn page_of(rows: &[trivia_db::models::QuestionRow], page: i64) -> Vec<Question> {
    paginate(rows, page).iter().cloned().map(Question::from).collect()
}

/// GET /questions?page=N
pub async fn get_questions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let (rows, categories) = with_db(&state, |db| {
        Ok((db.list_questions()?, db.list_categories()?))
    })
    .await?;

    let questions = page_of(&rows, query.page());
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsResponse {
        success: true,
        questions,
        total_questions: rows.len(),
        categories: category_map(categories),
    }))
}

/// DELETE /questions/{id}
///
/// Store failures are reported as 422, not 500.
pub async fn delete_question(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<DeleteQuestionResponse>, ApiError> {
    let deleted = with_db(&state, move |db| db.delete_question(id))
        .await
        .map_err(ApiError::unprocessable)?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    info!("Deleted question {}", id);
    Ok(Json(DeleteQuestionResponse {
        success: true,
        deleted: id,
    }))
}

/// Every field present and non-empty; category and difficulty numeric.
fn validate(req: CreateQuestionRequest) -> Result<NewQuestion, ApiError> {
    let text = |field: Option<String>, name: &str| {
        field
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::unprocessable(format!("{} is required", name)))
    };

    let question = text(req.question, "question")?;
    let answer = text(req.answer, "answer")?;
    let category = req
        .category
        .as_ref()
        .and_then(|c| c.as_i64())
        .ok_or_else(|| ApiError::unprocessable("category must be an integer"))?;
    let difficulty = req
        .difficulty
        .as_ref()
        .and_then(|d| d.as_i64())
        .ok_or_else(|| ApiError::unprocessable("difficulty must be an integer"))?;

    Ok(NewQuestion {
        question,
        answer,
        category,
        difficulty,
    })
}

/// POST /questions
///
/// A malformed body, a missing field and a failed insert all come back as 422.
pub async fn create_question(
    State(state): State<AppState>,
    body: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<Json<CreateQuestionResponse>, ApiError> {
    let Json(req) = body.map_err(ApiError::unprocessable)?;
    let new = validate(req)?;

    let row = with_db(&state, move |db| db.insert_question(&new))
        .await
        .map_err(ApiError::unprocessable)?;

    info!("Created question {}", row.id);
    Ok(Json(CreateQuestionResponse {
        success: true,
        created: row.into(),
    }))
}

/// POST /questions/search
///
/// No match at all is a 404, as is a page past the last match.
/// `total_questions` counts the questions on the returned page.
pub async fn search_questions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let term = req
        .search_term
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("searchTerm is required".into()))?;

    let rows = with_db(&state, move |db| db.search_questions(&term)).await?;
    let questions = page_of(&rows, query.page());
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(SearchResponse {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn first_page_has_ten_questions() {
        let app = app();
        let (status, body) = send(&app, "GET", "/questions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["total_questions"], 19);
        assert_eq!(body["questions"].as_array().unwrap().len(), 10);
        assert_eq!(body["categories"].as_object().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn last_page_is_partial() {
        let app = app();
        let (status, body) = send(&app, "GET", "/questions?page=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["questions"].as_array().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn page_beyond_last_is_404() {
        let app = app();
        let (status, body) = send(&app, "GET", "/questions?page=100", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 404);
    }

    #[tokio::test]
    async fn delete_removes_question_for_good() {
        let app = app();
        let (status, body) = send(&app, "DELETE", "/questions/5", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["deleted"], 5);

        let (status, body) = send(&app, "DELETE", "/questions/5", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], 404);

        let (_, body) = send(&app, "GET", "/questions", None).await;
        assert_eq!(body["total_questions"], 18);
    }

    #[tokio::test]
    async fn create_question_then_find_it() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/questions",
            Some(json!({
                "question": "Which sport is popular in India?",
                "answer": "Cricket",
                "category": "6",
                "difficulty": 1,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let created = &body["created"];
        assert_eq!(created["answer"], "Cricket");
        assert_eq!(created["category"], 6);
        assert_eq!(created["difficulty"], 1);

        let (_, found) = send(
            &app,
            "POST",
            "/questions/search",
            Some(json!({ "searchTerm": "popular in india" })),
        )
        .await;
        assert_eq!(found["questions"][0], *created);
    }

    #[tokio::test]
    async fn create_with_empty_category_is_422() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/questions",
            Some(json!({
                "question": "Which sport is popular in India?",
                "answer": "Cricket",
                "category": "",
                "difficulty": 1,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], 422);
        assert_eq!(body["message"], "Unable to process. Invalid input...");
    }

    #[tokio::test]
    async fn create_without_difficulty_is_422() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/questions",
            Some(json!({
                "question": "Which sport is popular in India?",
                "answer": "Cricket",
                "category": "6",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/questions/search",
            Some(json!({ "searchTerm": "africa" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_questions"], 1);
        assert_eq!(body["questions"][0]["question"], "What is the largest lake in Africa?");
    }

    #[tokio::test]
    async fn search_without_match_is_404() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/questions/search",
            Some(json!({ "searchTerm": "Jam" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Resource not found.");
    }

    #[tokio::test]
    async fn search_without_term_is_400() {
        let app = app();
        let (status, body) = send(&app, "POST", "/questions/search", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Bad request");
    }
}
