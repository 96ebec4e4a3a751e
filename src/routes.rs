// src/routes.rs

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{chat, docs, practice, subject, year},
    state::AppState,
    utils::role::{ROLE_HEADER, admin_middleware, role_middleware},
};

/// Base path of one practice set.
const PRACTICE: &str = "/{subject_id}/years/{year}/types/{question_type}";

/// Assembles the main application router.
///
/// * Splits every area into public and admin-only routes.
/// * Applies global middleware (Role, Trace, CORS).
/// * Injects global state (in-memory catalog, chats, config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
        HeaderValue::from_static("http://localhost:5173"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(ROLE_HEADER),
        ]);

    let public_routes = Router::new()
        .route("/", get(subject::list_subjects))
        .route("/options", get(subject::subject_options))
        .route("/{subject_id}/years", get(year::list_years))
        .route(
            "/{subject_id}/years/{year}/types",
            get(year::list_question_types),
        )
        .route(PRACTICE, get(practice::get_page))
        .route(
            &format!("{PRACTICE}/selection"),
            put(practice::select_question),
        )
        .route(
            &format!("{PRACTICE}/questions"),
            get(practice::list_questions),
        )
        .route(
            &format!("{PRACTICE}/questions/{{question_id}}"),
            get(practice::get_question),
        )
        .route(&format!("{PRACTICE}/view"), post(practice::view_current))
        .route(
            &format!("{PRACTICE}/questions/{{question_id}}/chat"),
            get(chat::get_chat).post(chat::post_message),
        );

    // Admin-only: add/remove affordances.
    let admin_routes = Router::new()
        .route("/", post(subject::create_subject))
        .route("/{subject_id}", delete(subject::delete_subject))
        .route("/{subject_id}/years", post(year::create_year))
        .route("/{subject_id}/years/{year}", delete(year::delete_year))
        .route(
            &format!("{PRACTICE}/questions"),
            post(practice::create_question),
        )
        .route(
            &format!("{PRACTICE}/questions/{{question_id}}"),
            delete(practice::delete_question),
        )
        .route_layer(middleware::from_fn(admin_middleware));

    Router::new()
        .nest("/api/subjects", public_routes.merge(admin_routes))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        // Global Middleware (applied from outside in)
        .layer(middleware::from_fn(role_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    fn app() -> Router {
        create_router(AppState::new(Config::default()))
    }

    #[tokio::test]
    async fn test_admin_route_forbidden_for_students() {
        let response = app()
            .oneshot(
                Request::delete("/api/subjects/maths")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_route_allowed_with_role_header() {
        let response = app()
            .oneshot(
                Request::delete("/api/subjects/maths")
                    .header(ROLE_HEADER, "admin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_public_and_admin_methods_share_a_path() {
        let response = app()
            .oneshot(
                Request::get("/api/subjects/physics/years/2023/types/essay/questions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = app()
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
