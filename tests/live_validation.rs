use std::{env, sync::Once};

use policyqa::{
    config,
    document::{DocumentStoreClient, extract_text},
    generation::{GeminiClient, GenerationClient},
};

static INIT: Once = Once::new();

fn set_default_env(key: &str, value: &str) {
    let needs_value = env::var(key).map(|v| v.trim().is_empty()).unwrap_or(true);
    if needs_value {
        // SAFETY: Tests run serially via Once and we intentionally mutate process env.
        unsafe {
            env::set_var(key, value);
        }
    }
}

fn init_config_once() {
    INIT.call_once(|| {
        set_default_env("JWT_SECRET", "live-validation-secret");
        config::init_config();
    });
}

#[tokio::test]
#[ignore = "Requires live Gemini API"]
async fn live_gemini_generation_roundtrip() {
    init_config_once();
    let config = config::get_config();
    let client = GeminiClient::new(
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        config.gemini_api_key.clone(),
    )
    .expect("generation client");

    let text = client
        .generate("Reply with the single word PONG.".into())
        .await
        .expect("failed to reach the live generation backend");
    assert!(!text.trim().is_empty(), "expected a non-empty response");
}

#[tokio::test]
#[ignore = "Requires live document store"]
async fn live_document_fetch_and_extract() {
    init_config_once();
    let address = env::var("POLICYQA_LIVE_DOC_URL")
        .expect("POLICYQA_LIVE_DOC_URL must point at a policy document");
    let store = DocumentStoreClient::new().expect("store client");

    let blob = store.fetch(&address).await.expect("document fetch failed");
    let text = extract_text(blob).await.expect("text extraction failed");
    assert!(!text.trim().is_empty(), "expected extractable text");
}
