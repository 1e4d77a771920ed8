use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::application::ports::LlmClient;
use crate::application::services::ChatService;
use crate::presentation::session::SessionCookie;

pub struct AppState<L>
where
    L: LlmClient,
{
    pub chat_service: Arc<ChatService<L>>,
    pub cookie_key: Key,
    pub session_cookie: SessionCookie,
}

impl<L> Clone for AppState<L>
where
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            chat_service: Arc::clone(&self.chat_service),
            cookie_key: self.cookie_key.clone(),
            session_cookie: self.session_cookie.clone(),
        }
    }
}

impl<L> FromRef<AppState<L>> for Key
where
    L: LlmClient,
{
    fn from_ref(state: &AppState<L>) -> Self {
        state.cookie_key.clone()
    }
}
