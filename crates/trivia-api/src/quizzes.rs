use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use rand::seq::IndexedRandom;

use trivia_types::api::{QuizRequest, QuizResponse};
use trivia_types::models::Question;

use crate::error::ApiError;
use crate::{AppState, with_db};

/// Quiz category id meaning "every category".
pub const ALL_CATEGORIES: i64 = 0;

/// POST /quizzes
///
/// Picks uniformly at random among the questions of the chosen category
/// that are not in `previous_questions`. `question` is `null` once none remain.
pub async fn play_quiz(
    State(state): State<AppState>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(req) = body.map_err(ApiError::unprocessable)?;

    let category = req
        .quiz_category
        .ok_or_else(|| ApiError::unprocessable("quiz_category is required"))?;
    let previous = req
        .previous_questions
        .ok_or_else(|| ApiError::unprocessable("previous_questions is required"))?;
    let category_id = category
        .id
        .as_i64()
        .ok_or_else(|| ApiError::unprocessable("quiz_category.id must be an integer"))?;

    let filter = (category_id != ALL_CATEGORIES).then_some(category_id);
    let candidates = with_db(&state, move |db| db.quiz_candidates(filter, &previous)).await?;

    let question = candidates
        .choose(&mut rand::rng())
        .cloned()
        .map(Question::from);

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn returns_unseen_question_from_category() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/quizzes",
            Some(json!({
                "previous_questions": [2, 4],
                "quiz_category": { "id": 5, "type": "Entertainment" },
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["question"]["id"], 6);
        assert_eq!(body["question"]["category"], 5);
    }

    #[tokio::test]
    async fn all_categories_never_repeats() {
        let app = app();
        let mut previous: Vec<i64> = Vec::new();

        for _ in 0..19 {
            let (status, body) = send(
                &app,
                "POST",
                "/quizzes",
                Some(json!({
                    "previous_questions": previous,
                    "quiz_category": { "id": 0, "type": "click" },
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            let id = body["question"]["id"].as_i64().unwrap();
            assert!(!previous.contains(&id));
            previous.push(id);
        }

        let (_, body) = send(
            &app,
            "POST",
            "/quizzes",
            Some(json!({
                "previous_questions": previous,
                "quiz_category": { "id": 0 },
            })),
        )
        .await;
        assert_eq!(body["success"], true);
        assert!(body["question"].is_null());
    }

    #[tokio::test]
    async fn missing_fields_are_422() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/quizzes",
            Some(json!({ "previous_questions": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], 422);

        let (status, _) = send(
            &app,
            "POST",
            "/quizzes",
            Some(json!({ "quiz_category": { "id": 1 } })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
