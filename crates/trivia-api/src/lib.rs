//! JSON API for the trivia quiz: categories, paginated questions, search
//! and quiz play.

pub mod categories;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod questions;
pub mod quizzes;

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{delete, get, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use trivia_db::Database;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/categories", get(categories::get_categories))
        .route("/categories/{id}/questions", get(categories::get_category_questions))
        .route("/questions", get(questions::get_questions).post(questions::create_question))
        .route("/questions/search", post(questions::search_questions))
        .route("/questions/{id}", delete(questions::delete_question))
        .route("/quizzes", post(quizzes::play_quiz))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Run blocking DB work off the async runtime.
pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> anyhow::Result<T>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            anyhow::anyhow!("blocking task failed: {}", e)
        })?
}


#[cfg(test)]
mod tests {
    use super::test_support::{app, send};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn unknown_route_is_404_envelope() {
        let app = app();
        let (status, body) = send(&app, "GET", "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 404);
    }

    #[tokio::test]
    async fn wrong_method_is_405_envelope() {
        let app = app();
        let (status, body) = send(&app, "PATCH", "/questions", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], 405);
    }

    #[tokio::test]
    async fn cors_preflight_allows_any_origin() {
        use axum::body::Body;
        use axum::http::{Request, header};
        use tower::ServiceExt;

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/questions")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        let list = |name: header::HeaderName| -> Vec<String> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_ascii_lowercase())
                .collect()
        };

        assert_eq!(list(header::ACCESS_CONTROL_ALLOW_ORIGIN), vec!["*"]);
        let methods = list(header::ACCESS_CONTROL_ALLOW_METHODS);
        for method in ["get", "put", "post", "delete", "options"] {
            assert!(methods.iter().any(|m| m == method), "{} not allowed", method);
        }
        let headers_allowed = list(header::ACCESS_CONTROL_ALLOW_HEADERS);
        for name in ["content-type", "authorization"] {
            assert!(headers_allowed.iter().any(|h| h == name), "{} not allowed", name);
        }
    }

    #[tokio::test]
    async fn non_integer_id_is_404() {
        let app = app();
        let (status, _) = send(&app, "DELETE", "/questions/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
