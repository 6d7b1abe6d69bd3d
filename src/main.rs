use std::sync::Arc;

use tokio::net::TcpListener;

use vocara::application::ports::{
    GenerationClient, SessionStore, SpeechSynthesizer, TranscriptionEngine,
};
use vocara::application::services::AgentService;
use vocara::infrastructure::llm::GeminiClient;
use vocara::infrastructure::observability::{TracingConfig, init_tracing};
use vocara::infrastructure::session::InMemorySessionStore;
use vocara::infrastructure::stt::AssemblyAiEngine;
use vocara::infrastructure::tts::MurfSynthesizer;
use vocara::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    init_tracing(TracingConfig::default(), settings.server.port);

    let transcriber: Option<Arc<dyn TranscriptionEngine>> =
        settings.transcription.api_key.clone().map(|key| {
            Arc::new(AssemblyAiEngine::new(
                key,
                settings.transcription.base_url.clone(),
            )) as Arc<dyn TranscriptionEngine>
        });
    if transcriber.is_none() {
        tracing::warn!("ASSEMBLYAI_API_KEY not set, transcription disabled");
    }

    let generator: Option<Arc<dyn GenerationClient>> =
        settings.generation.api_key.clone().map(|key| {
            Arc::new(GeminiClient::new(
                key,
                settings.generation.model.clone(),
                settings.generation.base_url.clone(),
            )) as Arc<dyn GenerationClient>
        });
    if generator.is_none() {
        tracing::warn!("GEMINI_API_KEY not set, generation will use fallback text");
    }

    let synthesizer: Option<Arc<dyn SpeechSynthesizer>> =
        settings.synthesis.api_key.clone().map(|key| {
            Arc::new(MurfSynthesizer::new(key, settings.synthesis.base_url.clone()))
                as Arc<dyn SpeechSynthesizer>
        });
    if synthesizer.is_none() {
        tracing::warn!("MURF_API_KEY not set, synthesis disabled");
    }

    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    let agent_service = Arc::new(AgentService::new(
        transcriber.clone(),
        generator.clone(),
        synthesizer.clone(),
        sessions,
        settings.synthesis.voice_id.clone(),
    ));

    tokio::fs::create_dir_all(&settings.uploads.dir).await?;

    let state = AppState {
        agent_service,
        transcriber,
        generator,
        synthesizer,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
