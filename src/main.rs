use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use chatterbox::application::ports::ConversationStore;
use chatterbox::application::services::ChatService;
use chatterbox::domain::PhotoCatalog;
use chatterbox::infrastructure::llm::create_chat_completions_client;
use chatterbox::infrastructure::observability::{TracingConfig, init_tracing};
use chatterbox::infrastructure::persistence::InMemoryConversationStore;
use chatterbox::presentation::{
    AppState, Environment, SessionCookie, Settings, create_router, signing_key,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig::from_settings(environment, &settings.logging),
        settings.server.port,
    );

    let llm_client = Arc::new(
        create_chat_completions_client(&settings.llm)
            .context("Failed to configure completion client")?,
    );
    tracing::info!(
        model = %llm_client.model(),
        url = %llm_client.url(),
        "Completion client ready"
    );

    let store: Arc<dyn ConversationStore> = Arc::new(InMemoryConversationStore::new(
        settings.chat.system_prompt.clone(),
        settings.session.idle_timeout(),
    ));
    let photos = Arc::new(PhotoCatalog::new(&settings.photos));
    tracing::info!(photos = photos.len(), "Photo catalog loaded");

    let chat_service = Arc::new(ChatService::new(llm_client, store, photos));

    let state = AppState {
        chat_service,
        cookie_key: signing_key(settings.session.secret.as_deref()),
        session_cookie: SessionCookie::from_settings(&settings.session),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
