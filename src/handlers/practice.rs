// src/handlers/practice.rs

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        answer::ViewRequest,
        question::{CreateQuestionRequest, Question, QuestionType},
        view::{PracticePage, QuestionView, SidebarView},
    },
    state::{SharedCatalog, SharedChats},
    store::{PracticeKey, QuestionSet},
    utils::{
        extract::{AppJson, AppPath},
        role::Role,
    },
};

/// Path of a single question inside a practice set.
#[derive(Debug, Deserialize)]
pub struct QuestionPath {
    pub subject_id: String,
    pub year: String,
    pub question_type: QuestionType,
    pub question_id: String,
}

impl QuestionPath {
    pub fn key(&self) -> PracticeKey {
        PracticeKey {
            subject_id: self.subject_id.clone(),
            year: self.year.clone(),
            question_type: self.question_type,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectRequest {
    pub index: usize,
}

/// Renders sidebar plus the selected question with nothing answered or revealed.
fn build_page(key: &PracticeKey, set: &QuestionSet, role: Role) -> Result<PracticePage, AppError> {
    let current = match set.current() {
        Some(question) => Some(QuestionView::render(
            question,
            set.current_index(),
            role,
            &ViewRequest::default(),
        )?),
        None => None,
    };

    Ok(PracticePage {
        subject_id: key.subject_id.clone(),
        year: key.year.clone(),
        question_type: key.question_type,
        total: set.len(),
        sidebar: SidebarView::build(set.questions(), set.current_index(), role),
        current,
    })
}

/// Opens a practice set. The first visit generates its mock questions.
#[utoipa::path(
    get,
    path = "/api/subjects/{subject_id}/years/{year}/types/{question_type}",
    tag = "practice",
    params(
        ("subject_id" = String, Path, description = "Subject slug"),
        ("year" = String, Path, description = "Exam year"),
        ("question_type" = QuestionType, Path, description = "mcq, structured or essay")
    ),
    responses(
        (status = 200, description = "Practice page", body = PracticePage),
        (status = 404, description = "Unknown subject, year or type")
    )
)]
pub async fn get_page(
    State(catalog): State<SharedCatalog>,
    Extension(role): Extension<Role>,
    AppPath(key): AppPath<PracticeKey>,
) -> Result<impl IntoResponse, AppError> {
    let mut catalog = catalog.write().await;
    let set = catalog.set_mut(&key)?;
    Ok(Json(build_page(&key, set, role)?))
}

/// Moves the sidebar selection.
#[utoipa::path(
    put,
    path = "/api/subjects/{subject_id}/years/{year}/types/{question_type}/selection",
    tag = "practice",
    params(
        ("subject_id" = String, Path, description = "Subject slug"),
        ("year" = String, Path, description = "Exam year"),
        ("question_type" = QuestionType, Path, description = "mcq, structured or essay")
    ),
    request_body = SelectRequest,
    responses(
        (status = 200, description = "Updated page", body = PracticePage),
        (status = 400, description = "Index out of range")
    )
)]
pub async fn select_question(
    State(catalog): State<SharedCatalog>,
    Extension(role): Extension<Role>,
    AppPath(key): AppPath<PracticeKey>,
    AppJson(payload): AppJson<SelectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut catalog = catalog.write().await;
    let set = catalog.set_mut(&key)?;
    set.select(payload.index)?;
    Ok(Json(build_page(&key, set, role)?))
}

/// Raw questions of the set, answers included.
#[utoipa::path(
    get,
    path = "/api/subjects/{subject_id}/years/{year}/types/{question_type}/questions",
    tag = "practice",
    params(
        ("subject_id" = String, Path, description = "Subject slug"),
        ("year" = String, Path, description = "Exam year"),
        ("question_type" = QuestionType, Path, description = "mcq, structured or essay")
    ),
    responses((status = 200, description = "Questions in order", body = [Question]))
)]
pub async fn list_questions(
    State(catalog): State<SharedCatalog>,
    AppPath(key): AppPath<PracticeKey>,
) -> Result<impl IntoResponse, AppError> {
    let mut catalog = catalog.write().await;
    let questions = catalog.set_mut(&key)?.questions().to_vec();
    Ok(Json(questions))
}

#[utoipa::path(
    get,
    path = "/api/subjects/{subject_id}/years/{year}/types/{question_type}/questions/{question_id}",
    tag = "practice",
    params(
        ("subject_id" = String, Path, description = "Subject slug"),
        ("year" = String, Path, description = "Exam year"),
        ("question_type" = QuestionType, Path, description = "mcq, structured or essay"),
        ("question_id" = String, Path, description = "e.g. mcq-q3")
    ),
    responses(
        (status = 200, description = "The question", body = Question),
        (status = 404, description = "No such question")
    )
)]
pub async fn get_question(
    State(catalog): State<SharedCatalog>,
    AppPath(path): AppPath<QuestionPath>,
) -> Result<impl IntoResponse, AppError> {
    let mut catalog = catalog.write().await;
    let question = catalog
        .set_mut(&path.key())?
        .get(&path.question_id)
        .cloned()
        .ok_or(AppError::NotFound(format!(
            "Question '{}' not found",
            path.question_id
        )))?;
    Ok(Json(question))
}

/// Appends a question from the add form. Number and id are assigned by the set.
/// Admin only.
#[utoipa::path(
    post,
    path = "/api/subjects/{subject_id}/years/{year}/types/{question_type}/questions",
    tag = "practice",
    params(
        ("subject_id" = String, Path, description = "Subject slug"),
        ("year" = String, Path, description = "Exam year"),
        ("question_type" = QuestionType, Path, description = "mcq, structured or essay")
    ),
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question appended", body = Question),
        (status = 400, description = "Blank text or explanation, or malformed fields")
    )
)]
pub async fn create_question(
    State(catalog): State<SharedCatalog>,
    AppPath(key): AppPath<PracticeKey>,
    AppJson(payload): AppJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut catalog = catalog.write().await;
    let set = catalog.set_mut(&key)?;
    let created = set.add(payload, &key.subject_id, &key.year)?.clone();

    tracing::info!(
        "Added {} to {} {} ({} questions)",
        created.id,
        key.subject_id,
        key.year,
        set.len()
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// Deletes a question and renumbers the rest. Chats of the set are reset
/// because question ids shift.
/// Admin only.
#[utoipa::path(
    delete,
    path = "/api/subjects/{subject_id}/years/{year}/types/{question_type}/questions/{question_id}",
    tag = "practice",
    params(
        ("subject_id" = String, Path, description = "Subject slug"),
        ("year" = String, Path, description = "Exam year"),
        ("question_type" = QuestionType, Path, description = "mcq, structured or essay"),
        ("question_id" = String, Path, description = "e.g. mcq-q3")
    ),
    responses(
        (status = 200, description = "Updated page", body = PracticePage),
        (status = 404, description = "No such question")
    )
)]
pub async fn delete_question(
    State(catalog): State<SharedCatalog>,
    State(chats): State<SharedChats>,
    Extension(role): Extension<Role>,
    AppPath(path): AppPath<QuestionPath>,
) -> Result<impl IntoResponse, AppError> {
    let key = path.key();
    let mut catalog = catalog.write().await;
    let set = catalog.set_mut(&key)?;
    let removed = set.delete(&path.question_id)?;

    tracing::info!(
        "Deleted {} from {} {} ({} left)",
        removed.id,
        key.subject_id,
        key.year,
        set.len()
    );

    chats.write().await.clear_set(&key);

    Ok(Json(build_page(&key, set, role)?))
}

/// Renders the selected question with the caller's in-progress answer and toggles.
/// The answer is not stored.
#[utoipa::path(
    post,
    path = "/api/subjects/{subject_id}/years/{year}/types/{question_type}/view",
    tag = "practice",
    params(
        ("subject_id" = String, Path, description = "Subject slug"),
        ("year" = String, Path, description = "Exam year"),
        ("question_type" = QuestionType, Path, description = "mcq, structured or essay")
    ),
    request_body = ViewRequest,
    responses(
        (status = 200, description = "Rendered question", body = QuestionView),
        (status = 400, description = "Answer does not fit the question"),
        (status = 404, description = "No questions available")
    )
)]
pub async fn view_current(
    State(catalog): State<SharedCatalog>,
    Extension(role): Extension<Role>,
    AppPath(key): AppPath<PracticeKey>,
    AppJson(payload): AppJson<ViewRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut catalog = catalog.write().await;
    let set = catalog.set_mut(&key)?;
    let question = set
        .current()
        .ok_or(AppError::NotFound("No questions available".to_string()))?;

    let view = QuestionView::render(question, set.current_index(), role, &payload)?;
    Ok(Json(view))
}
