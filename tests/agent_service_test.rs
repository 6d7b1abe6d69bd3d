use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use vocara::application::ports::{
    GenerationClient, GenerationError, SessionStore, SpeechSynthesizer, SynthesisError,
    TranscriptionEngine, TranscriptionError,
};
use vocara::application::services::{
    AgentService, CONNECT_FALLBACK, SYSTEM_INSTRUCTION, TurnReply,
};
use vocara::domain::SessionId;
use vocara::infrastructure::session::InMemorySessionStore;

const TEST_VOICE: &str = "en-IN-alia";

struct FixedTranscriber {
    text: &'static str,
}

#[async_trait]
impl TranscriptionEngine for FixedTranscriber {
    async fn transcribe(&self, _audio_data: &[u8]) -> Result<String, TranscriptionError> {
        Ok(self.text.to_string())
    }
}

/// Records every prompt it is asked to complete.
struct CapturingGenerator {
    prompts: Mutex<Vec<String>>,
    reply: &'static str,
}

impl CapturingGenerator {
    fn new(reply: &'static str) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            reply,
        }
    }
}

#[async_trait]
impl GenerationClient for CapturingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().await.push(prompt.to_string());
        Ok(self.reply.to_string())
    }
}

struct FixedSynthesizer {
    url: &'static str,
}

#[async_trait]
impl SpeechSynthesizer for FixedSynthesizer {
    async fn synthesize(&self, _text: &str, _voice_id: &str) -> Result<String, SynthesisError> {
        Ok(self.url.to_string())
    }

    async fn synthesize_raw(
        &self,
        _text: &str,
        _voice_id: &str,
    ) -> Result<serde_json::Value, SynthesisError> {
        Ok(serde_json::json!({ "audioFile": self.url }))
    }

    async fn list_voices(&self) -> Result<serde_json::Value, SynthesisError> {
        Ok(serde_json::json!([]))
    }
}

fn service_with(
    transcriber: Option<Arc<dyn TranscriptionEngine>>,
    generator: Option<Arc<dyn GenerationClient>>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
) -> (AgentService, Arc<InMemorySessionStore>) {
    let sessions = Arc::new(InMemorySessionStore::new());
    let service = AgentService::new(
        transcriber,
        generator,
        synthesizer,
        Arc::clone(&sessions) as Arc<dyn SessionStore>,
        TEST_VOICE.to_string(),
    );
    (service, sessions)
}

#[tokio::test]
async fn given_first_turn_when_conversing_then_prompt_has_instruction_history_and_cue() {
    let generator = Arc::new(CapturingGenerator::new("Hi there"));
    let (service, _) = service_with(
        Some(Arc::new(FixedTranscriber { text: "Hello" })),
        Some(Arc::clone(&generator) as Arc<dyn GenerationClient>),
        Some(Arc::new(FixedSynthesizer {
            url: "https://cdn/x.mp3",
        })),
    );

    service.converse(&SessionId::from("s1"), b"fake audio").await;

    let prompts = generator.prompts.lock().await;
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with(SYSTEM_INSTRUCTION));
    assert!(prompts[0].contains("User: Hello"));
    assert!(prompts[0].ends_with("\nAssistant:"));
}

#[tokio::test]
async fn given_second_turn_when_conversing_then_prompt_carries_prior_exchange() {
    let generator = Arc::new(CapturingGenerator::new("Hi there"));
    let (service, _) = service_with(
        Some(Arc::new(FixedTranscriber { text: "Hello" })),
        Some(Arc::clone(&generator) as Arc<dyn GenerationClient>),
        Some(Arc::new(FixedSynthesizer {
            url: "https://cdn/x.mp3",
        })),
    );
    let session = SessionId::from("s1");

    service.converse(&session, b"turn one").await;
    service.converse(&session, b"turn two").await;

    let prompts = generator.prompts.lock().await;
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("User: Hello\nAssistant: Hi there\nUser: Hello"));
}

#[tokio::test]
async fn given_single_shot_query_when_generating_then_prompt_is_raw_transcript() {
    let generator = Arc::new(CapturingGenerator::new("Hi there"));
    let (service, _) = service_with(
        Some(Arc::new(FixedTranscriber { text: "Hello" })),
        Some(Arc::clone(&generator) as Arc<dyn GenerationClient>),
        Some(Arc::new(FixedSynthesizer {
            url: "https://cdn/x.mp3",
        })),
    );

    let reply = service.query_once(b"fake audio").await.unwrap();

    assert!(matches!(reply, TurnReply::Spoken { .. }));
    let prompts = generator.prompts.lock().await;
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0], "Hello");
}

#[tokio::test]
async fn given_no_synthesizer_when_conversing_then_degrades_but_stores_exchange() {
    let (service, sessions) = service_with(
        Some(Arc::new(FixedTranscriber { text: "Hello" })),
        Some(Arc::new(CapturingGenerator::new("Hi there")) as Arc<dyn GenerationClient>),
        None,
    );
    let session = SessionId::from("s1");

    let reply = service.converse(&session, b"fake audio").await;

    match reply {
        TurnReply::Fallback {
            transcription,
            reply_text,
            fallback_text,
        } => {
            assert_eq!(transcription, "Hello");
            assert_eq!(reply_text, "Hi there");
            assert_eq!(fallback_text, CONNECT_FALLBACK);
        }
        TurnReply::Spoken { .. } => panic!("expected fallback without a synthesizer"),
    }

    let history = sessions.history(&session).await.unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn given_no_generator_when_echoing_then_transcript_is_spoken_back() {
    let (service, _) = service_with(
        Some(Arc::new(FixedTranscriber { text: "Hello" })),
        None,
        Some(Arc::new(FixedSynthesizer {
            url: "https://cdn/echo.mp3",
        })),
    );

    let url = service.echo(b"fake audio").await.unwrap();

    assert_eq!(url, "https://cdn/echo.mp3");
}
