// src/handlers/subject.rs

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::subject::{CreateSubjectRequest, Subject, SubjectOptions},
    state::{SharedCatalog, SharedChats},
    utils::extract::{AppJson, AppPath},
};

/// Lists all subjects for the home page.
#[utoipa::path(
    get,
    path = "/api/subjects",
    tag = "subjects",
    responses((status = 200, description = "All subjects", body = [Subject]))
)]
pub async fn list_subjects(
    State(catalog): State<SharedCatalog>,
) -> Result<impl IntoResponse, AppError> {
    let subjects = catalog.read().await.subjects().to_vec();
    Ok(Json(subjects))
}

/// Icons and colors the add-subject form can choose from.
#[utoipa::path(
    get,
    path = "/api/subjects/options",
    tag = "subjects",
    responses((status = 200, description = "Selectable tokens", body = SubjectOptions))
)]
pub async fn subject_options() -> Json<SubjectOptions> {
    Json(SubjectOptions::all())
}

/// Creates a subject. The id is derived from the name.
/// Admin only.
#[utoipa::path(
    post,
    path = "/api/subjects",
    tag = "subjects",
    request_body = CreateSubjectRequest,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 400, description = "Blank name or unknown icon/color"),
        (status = 403, description = "Not in admin mode")
    )
)]
pub async fn create_subject(
    State(catalog): State<SharedCatalog>,
    AppJson(payload): AppJson<CreateSubjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let subject = payload.into_subject();
    let created = catalog.write().await.add_subject(subject).clone();

    Ok((StatusCode::CREATED, Json(created)))
}

/// Deletes a subject together with its years, practice sets and chats.
/// Admin only.
#[utoipa::path(
    delete,
    path = "/api/subjects/{subject_id}",
    tag = "subjects",
    params(("subject_id" = String, Path, description = "Subject slug")),
    responses(
        (status = 204, description = "Subject removed"),
        (status = 404, description = "Unknown subject")
    )
)]
pub async fn delete_subject(
    State(catalog): State<SharedCatalog>,
    State(chats): State<SharedChats>,
    AppPath(subject_id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    catalog.write().await.remove_subject(&subject_id)?;
    chats
        .write()
        .await
        .clear_where(|key| key.subject_id == subject_id);

    Ok(StatusCode::NO_CONTENT)
}
