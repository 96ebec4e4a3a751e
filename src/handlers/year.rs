// src/handlers/year.rs

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppError,
    models::question::QuestionTypeCard,
    state::{SharedCatalog, SharedChats},
    utils::extract::{AppJson, AppPath},
};

/// DTO for the add-year form.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateYearRequest {
    #[validate(custom(function = validate_year))]
    pub year: String,
}

/// Years are 1 to 4 ASCII digits, e.g. "2025".
fn validate_year(year: &str) -> Result<(), validator::ValidationError> {
    let year = year.trim();
    if year.is_empty() || year.len() > 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(validator::ValidationError::new("invalid_year"));
    }
    Ok(())
}

/// Lists a subject's years, newest first once edited.
#[utoipa::path(
    get,
    path = "/api/subjects/{subject_id}/years",
    tag = "years",
    params(("subject_id" = String, Path, description = "Subject slug")),
    responses(
        (status = 200, description = "Years of the subject", body = [String]),
        (status = 404, description = "Unknown subject")
    )
)]
pub async fn list_years(
    State(catalog): State<SharedCatalog>,
    AppPath(subject_id): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let years = catalog.read().await.years(&subject_id)?;
    Ok(Json(years))
}

/// Adds a year to a subject and returns the re-sorted list.
/// Admin only.
#[utoipa::path(
    post,
    path = "/api/subjects/{subject_id}/years",
    tag = "years",
    params(("subject_id" = String, Path, description = "Subject slug")),
    request_body = CreateYearRequest,
    responses(
        (status = 201, description = "Year added", body = [String]),
        (status = 400, description = "Not a year"),
        (status = 409, description = "Year already listed")
    )
)]
pub async fn create_year(
    State(catalog): State<SharedCatalog>,
    AppPath(subject_id): AppPath<String>,
    AppJson(payload): AppJson<CreateYearRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let years = catalog
        .write()
        .await
        .add_year(&subject_id, payload.year.trim())?;

    Ok((StatusCode::CREATED, Json(years)))
}

/// Removes a year and every practice set opened under it.
/// Admin only.
#[utoipa::path(
    delete,
    path = "/api/subjects/{subject_id}/years/{year}",
    tag = "years",
    params(
        ("subject_id" = String, Path, description = "Subject slug"),
        ("year" = String, Path, description = "Year to remove")
    ),
    responses(
        (status = 200, description = "Remaining years", body = [String]),
        (status = 404, description = "Unknown subject or year")
    )
)]
pub async fn delete_year(
    State(catalog): State<SharedCatalog>,
    State(chats): State<SharedChats>,
    AppPath((subject_id, year)): AppPath<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let years = catalog.write().await.remove_year(&subject_id, &year)?;
    chats
        .write()
        .await
        .clear_where(|key| key.subject_id == subject_id && key.year == year);

    Ok(Json(years))
}

/// Question-type cards for a subject and year.
#[utoipa::path(
    get,
    path = "/api/subjects/{subject_id}/years/{year}/types",
    tag = "years",
    params(
        ("subject_id" = String, Path, description = "Subject slug"),
        ("year" = String, Path, description = "Exam year")
    ),
    responses(
        (status = 200, description = "Offered question types", body = [QuestionTypeCard]),
        (status = 404, description = "Unknown subject or year")
    )
)]
pub async fn list_question_types(
    State(catalog): State<SharedCatalog>,
    AppPath((subject_id, year)): AppPath<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let catalog = catalog.read().await;

    if !catalog.years(&subject_id)?.contains(&year) {
        return Err(AppError::NotFound(format!(
            "Year {} not found for '{}'",
            year, subject_id
        )));
    }

    let cards: Vec<QuestionTypeCard> = catalog
        .question_types(&subject_id)?
        .iter()
        .map(|t| t.card())
        .collect();

    Ok(Json(cards))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_year() {
        assert!(validate_year("2025").is_ok());
        assert!(validate_year(" 1999 ").is_ok());
        assert!(validate_year("").is_err());
        assert!(validate_year("20x5").is_err());
        assert!(validate_year("20251").is_err());
    }
}
