// src/handlers/chat.rs

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    handlers::practice::QuestionPath,
    models::chat::{ChatMessage, SendMessageRequest, Sender, TUTOR_REPLY},
    state::{SharedCatalog, SharedChats},
    store::Catalog,
    utils::{
        extract::{AppJson, AppPath},
        html::clean_text,
    },
};

/// Fails with 404 unless the question exists in its practice set. Callers keep
/// the catalog guard while touching the chat so the question cannot move.
fn ensure_question(catalog: &mut Catalog, path: &QuestionPath) -> Result<(), AppError> {
    if catalog.set_mut(&path.key())?.get(&path.question_id).is_none() {
        return Err(AppError::NotFound(format!(
            "Question '{}' not found",
            path.question_id
        )));
    }
    Ok(())
}

/// Tutor conversation for a question.
#[utoipa::path(
    get,
    path = "/api/subjects/{subject_id}/years/{year}/types/{question_type}/questions/{question_id}/chat",
    tag = "chat",
    params(
        ("subject_id" = String, Path, description = "Subject slug"),
        ("year" = String, Path, description = "Exam year"),
        ("question_type" = crate::models::question::QuestionType, Path, description = "mcq, structured or essay"),
        ("question_id" = String, Path, description = "e.g. mcq-q3")
    ),
    responses(
        (status = 200, description = "Messages, oldest first", body = [ChatMessage]),
        (status = 404, description = "No such question")
    )
)]
pub async fn get_chat(
    State(catalog): State<SharedCatalog>,
    State(chats): State<SharedChats>,
    AppPath(path): AppPath<QuestionPath>,
) -> Result<impl IntoResponse, AppError> {
    let mut catalog = catalog.write().await;
    ensure_question(&mut catalog, &path)?;

    let messages = chats
        .write()
        .await
        .messages(&path.key(), &path.question_id);
    Ok(Json(messages))
}

/// Posts a user message. The tutor's canned reply is appended after the
/// configured delay by a background task.
#[utoipa::path(
    post,
    path = "/api/subjects/{subject_id}/years/{year}/types/{question_type}/questions/{question_id}/chat",
    tag = "chat",
    params(
        ("subject_id" = String, Path, description = "Subject slug"),
        ("year" = String, Path, description = "Exam year"),
        ("question_type" = crate::models::question::QuestionType, Path, description = "mcq, structured or essay"),
        ("question_id" = String, Path, description = "e.g. mcq-q3")
    ),
    request_body = SendMessageRequest,
    responses(
        (status = 202, description = "Message accepted, reply pending", body = ChatMessage),
        (status = 400, description = "Blank message"),
        (status = 404, description = "No such question")
    )
)]
pub async fn post_message(
    State(catalog): State<SharedCatalog>,
    State(chats): State<SharedChats>,
    State(config): State<Config>,
    AppPath(path): AppPath<QuestionPath>,
    AppJson(payload): AppJson<SendMessageRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut catalog = catalog.write().await;
    ensure_question(&mut catalog, &path)?;

    let key = path.key();
    let (thread, message) = chats.write().await.post(
        &key,
        &path.question_id,
        Sender::User,
        clean_text(&payload.text),
    );
    drop(catalog);

    // The reply is dropped if the chat was cleared in the meantime.
    let delay = config.ai_reply_delay;
    let question_id = path.question_id;
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let reply = chats.write().await.reply(
            &key,
            &question_id,
            thread,
            Sender::Ai,
            TUTOR_REPLY.to_string(),
        );
        match reply {
            Some(_) => tracing::debug!("Tutor replied on {}", question_id),
            None => tracing::debug!("Dropped tutor reply for cleared chat {}", question_id),
        }
    });

    Ok((StatusCode::ACCEPTED, Json(message)))
}
