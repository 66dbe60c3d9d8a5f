use anyhow::Context;
use policyqa::{
    api, auth, config, document,
    generation::GeminiClient,
    logging,
    pipeline::{PipelineSettings, QaService},
};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::init_config();
    logging::init_tracing();
    let config = config::get_config();

    let store = document::DocumentStoreClient::new()
        .context("Failed to build document store client")?;
    let generation = Arc::new(
        GeminiClient::new(
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
        )
        .context("Failed to build generation client")?,
    );
    let service = Arc::new(QaService::new(
        store,
        generation,
        PipelineSettings::from_config(),
    ));
    let user_store = Arc::new(auth::UserStore::new());
    let app = api::create_router(service, user_store);

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.server_port))
        .await
        .context("Failed to bind listener")?;
    tracing::info!("Listening on http://0.0.0.0:{}", config.server_port);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
