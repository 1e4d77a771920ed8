use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::response::{Html, Redirect};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;

use crate::application::ports::LlmClient;
use crate::domain::{Conversation, DisplaySegment, MessageRole, PhotoCatalog, SessionId};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::ChatPageError;

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub user_input: String,
}

#[derive(Template)]
#[template(path = "chat.html")]
struct ChatPage<'a> {
    response: Vec<DisplaySegment<'a>>,
    history: Vec<HistoryEntry<'a>>,
}

struct HistoryEntry<'a> {
    role: &'static str,
    is_system: bool,
    segments: Vec<DisplaySegment<'a>>,
}

fn render_page(
    photos: &PhotoCatalog,
    reply: Option<&str>,
    conversation: &Conversation,
) -> Result<Html<String>, ChatPageError> {
    let history = conversation
        .messages
        .iter()
        .map(|message| HistoryEntry {
            role: message.role.as_str(),
            is_system: message.role == MessageRole::System,
            segments: photos.segments(&message.content),
        })
        .collect();

    let page = ChatPage {
        response: reply.map(|r| photos.segments(r)).unwrap_or_default(),
        history,
    };

    Ok(Html(page.render()?))
}

// Handlers hand the jar back on the error path too, so a freshly minted
// session cookie reaches the browser even when the page fails.

#[tracing::instrument(skip(state, jar))]
pub async fn chat_page_handler<L>(
    State(state): State<AppState<L>>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Result<Html<String>, ChatPageError>)
where
    L: LlmClient + 'static,
{
    let (jar, session_id) = state.session_cookie.resolve(jar);
    (jar, show_history(&state, session_id).await)
}

async fn show_history<L: LlmClient>(
    state: &AppState<L>,
    session_id: SessionId,
) -> Result<Html<String>, ChatPageError> {
    let conversation = state.chat_service.history(session_id).await?;
    render_page(state.chat_service.photos(), None, &conversation)
}

#[tracing::instrument(skip(state, jar, form))]
pub async fn chat_turn_handler<L>(
    State(state): State<AppState<L>>,
    jar: SignedCookieJar,
    Form(form): Form<ChatForm>,
) -> (SignedCookieJar, Result<Html<String>, ChatPageError>)
where
    L: LlmClient + 'static,
{
    let (jar, session_id) = state.session_cookie.resolve(jar);

    tracing::debug!(
        session_id = %session_id,
        prompt = %sanitize_prompt(&form.user_input),
        "Processing chat message"
    );

    (jar, process_turn(&state, session_id, &form.user_input).await)
}

async fn process_turn<L: LlmClient>(
    state: &AppState<L>,
    session_id: SessionId,
    user_input: &str,
) -> Result<Html<String>, ChatPageError> {
    let outcome = state.chat_service.handle_turn(session_id, user_input).await?;

    render_page(
        state.chat_service.photos(),
        outcome.reply.as_deref(),
        &outcome.conversation,
    )
}

#[tracing::instrument(skip(state, jar))]
pub async fn reset_handler<L>(
    State(state): State<AppState<L>>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Result<Redirect, ChatPageError>)
where
    L: LlmClient + 'static,
{
    let (jar, session_id) = state.session_cookie.resolve(jar);
    let redirect = state
        .chat_service
        .reset(session_id)
        .await
        .map(|()| Redirect::to("/"))
        .map_err(ChatPageError::from);
    (jar, redirect)
}
