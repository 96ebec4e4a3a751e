// src/handlers/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::handlers::{chat, practice, subject, year};

/// OpenAPI description of every public route.
#[derive(OpenApi)]
#[openapi(
    paths(
        subject::list_subjects,
        subject::subject_options,
        subject::create_subject,
        subject::delete_subject,
        year::list_years,
        year::create_year,
        year::delete_year,
        year::list_question_types,
        practice::get_page,
        practice::select_question,
        practice::list_questions,
        practice::get_question,
        practice::create_question,
        practice::delete_question,
        practice::view_current,
        chat::get_chat,
        chat::post_message,
    ),
    tags(
        (name = "subjects", description = "Home page subjects"),
        (name = "years", description = "Years and question types of a subject"),
        (name = "practice", description = "Question sets, selection and rendering"),
        (name = "chat", description = "Simulated AI tutor")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
