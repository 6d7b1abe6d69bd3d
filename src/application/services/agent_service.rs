use std::sync::Arc;

use crate::application::ports::{
    GenerationClient, GenerationError, SessionStore, SessionStoreError, SpeechSynthesizer,
    SynthesisError, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{SessionId, Turn};

use super::prompt::{clamp_reply, render_prompt};

/// Spoken when no usable speech was detected in the upload.
pub const NO_SPEECH_FALLBACK: &str = "I couldn't hear you clearly, could you please repeat?";

/// Spoken when a downstream capability cannot produce a reply.
pub const CONNECT_FALLBACK: &str = "I'm having trouble connecting right now.";

/// Outcome of one turn. Both variants carry user-presentable text; the
/// transport layer maps them onto the wire payloads, always as HTTP 200 for
/// the conversational endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnReply {
    Spoken {
        transcription: String,
        reply_text: String,
        audio_url: String,
    },
    Fallback {
        transcription: String,
        reply_text: String,
        fallback_text: String,
    },
}

impl TurnReply {
    fn no_speech() -> Self {
        TurnReply::Fallback {
            transcription: String::new(),
            reply_text: NO_SPEECH_FALLBACK.to_string(),
            fallback_text: NO_SPEECH_FALLBACK.to_string(),
        }
    }

    fn degraded() -> Self {
        TurnReply::Fallback {
            transcription: String::new(),
            reply_text: CONNECT_FALLBACK.to_string(),
            fallback_text: CONNECT_FALLBACK.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("transcription is not configured")]
    TranscriptionUnavailable,
    #[error("generation is not configured")]
    GenerationUnavailable,
    #[error("synthesis is not configured")]
    SynthesisUnavailable,
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("generation: {0}")]
    Generation(#[from] GenerationError),
    #[error("synthesis: {0}")]
    Synthesis(#[from] SynthesisError),
}

impl AgentError {
    /// True when the failure is a missing credential rather than an upstream error.
    pub fn is_unconfigured(&self) -> bool {
        matches!(
            self,
            AgentError::TranscriptionUnavailable
                | AgentError::GenerationUnavailable
                | AgentError::SynthesisUnavailable
        )
    }
}

/// Sequences transcription, generation, and synthesis for voice interactions.
///
/// Clients are optional: a capability whose credential is absent degrades to
/// its fallback branch in the conversational flow and surfaces as
/// "not configured" in the single-shot flows.
pub struct AgentService {
    transcriber: Option<Arc<dyn TranscriptionEngine>>,
    generator: Option<Arc<dyn GenerationClient>>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    sessions: Arc<dyn SessionStore>,
    voice_id: String,
}

impl AgentService {
    pub fn new(
        transcriber: Option<Arc<dyn TranscriptionEngine>>,
        generator: Option<Arc<dyn GenerationClient>>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
        sessions: Arc<dyn SessionStore>,
        voice_id: String,
    ) -> Self {
        Self {
            transcriber,
            generator,
            synthesizer,
            sessions,
            voice_id,
        }
    }

    /// One conversational turn against the session history. Never fails: every
    /// internal error is converted into a speakable fallback reply.
    pub async fn converse(&self, session_id: &SessionId, audio: &[u8]) -> TurnReply {
        match self.converse_inner(session_id, audio).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(
                    session_id = %session_id,
                    error = %e,
                    "Conversational turn failed internally, returning fallback"
                );
                TurnReply::degraded()
            }
        }
    }

    async fn converse_inner(
        &self,
        session_id: &SessionId,
        audio: &[u8],
    ) -> Result<TurnReply, SessionStoreError> {
        let transcription = self.transcribe_or_empty(audio).await;
        if transcription.trim().is_empty() {
            tracing::info!(session_id = %session_id, "No speech detected, returning fallback");
            return Ok(TurnReply::no_speech());
        }

        self.sessions
            .append(session_id, Turn::user(transcription.clone()))
            .await?;
        let history = self.sessions.history(session_id).await?;

        let prompt = render_prompt(&history);
        let reply_text = self.generate_or_fallback(&prompt).await;

        // Stored before synthesis: the exchange is part of the history even
        // when no audio can be produced for it.
        self.sessions
            .append(session_id, Turn::assistant(reply_text.clone()))
            .await?;

        match self.synthesize_or_none(&reply_text).await {
            Some(audio_url) => Ok(TurnReply::Spoken {
                transcription,
                reply_text,
                audio_url,
            }),
            None => Ok(TurnReply::Fallback {
                transcription,
                reply_text,
                fallback_text: CONNECT_FALLBACK.to_string(),
            }),
        }
    }

    /// Single-shot voice query: no session, no history, and upstream errors
    /// surface to the caller instead of degrading.
    pub async fn query_once(&self, audio: &[u8]) -> Result<TurnReply, AgentError> {
        let transcriber = self
            .transcriber
            .as_ref()
            .ok_or(AgentError::TranscriptionUnavailable)?;
        let transcription = transcriber.transcribe(audio).await?;

        if transcription.trim().is_empty() {
            tracing::info!("No speech detected in single-shot query");
            return Ok(TurnReply::no_speech());
        }

        let generator = self
            .generator
            .as_ref()
            .ok_or(AgentError::GenerationUnavailable)?;
        let reply_text = clamp_reply(generator.generate(&transcription).await?.trim().to_string());

        let synthesizer = self
            .synthesizer
            .as_ref()
            .ok_or(AgentError::SynthesisUnavailable)?;
        let audio_url = synthesizer.synthesize(&reply_text, &self.voice_id).await?;

        Ok(TurnReply::Spoken {
            transcription,
            reply_text,
            audio_url,
        })
    }

    /// Speaks the transcript back verbatim, with no generation step.
    pub async fn echo(&self, audio: &[u8]) -> Result<String, AgentError> {
        let transcriber = self
            .transcriber
            .as_ref()
            .ok_or(AgentError::TranscriptionUnavailable)?;
        let transcription = transcriber.transcribe(audio).await?;

        let synthesizer = self
            .synthesizer
            .as_ref()
            .ok_or(AgentError::SynthesisUnavailable)?;
        let audio_url = synthesizer
            .synthesize(&transcription, &self.voice_id)
            .await?;

        Ok(audio_url)
    }

    async fn transcribe_or_empty(&self, audio: &[u8]) -> String {
        let Some(transcriber) = self.transcriber.as_ref() else {
            tracing::warn!("Transcription not configured, treating upload as silent");
            return String::new();
        };

        match transcriber.transcribe(audio).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Transcription failed, treating upload as silent");
                String::new()
            }
        }
    }

    async fn generate_or_fallback(&self, prompt: &str) -> String {
        let Some(generator) = self.generator.as_ref() else {
            tracing::warn!("Generation not configured, substituting fallback reply");
            return CONNECT_FALLBACK.to_string();
        };

        match generator.generate(prompt).await {
            Ok(text) => clamp_reply(text.trim().to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Generation failed, substituting fallback reply");
                CONNECT_FALLBACK.to_string()
            }
        }
    }

    async fn synthesize_or_none(&self, text: &str) -> Option<String> {
        let Some(synthesizer) = self.synthesizer.as_ref() else {
            tracing::warn!("Synthesis not configured, no audio for this reply");
            return None;
        };

        match synthesizer.synthesize(text, &self.voice_id).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(error = %e, "Synthesis failed, no audio for this reply");
                None
            }
        }
    }
}
