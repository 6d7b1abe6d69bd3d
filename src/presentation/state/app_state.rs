use std::sync::Arc;

use crate::application::ports::{GenerationClient, SpeechSynthesizer, TranscriptionEngine};
use crate::application::services::AgentService;
use crate::presentation::config::Settings;

/// Shared handler state. The direct client handles back the passthrough
/// endpoints; the orchestrated flows go through `agent_service`. A `None`
/// client means that capability's credential is not configured.
pub struct AppState {
    pub agent_service: Arc<AgentService>,
    pub transcriber: Option<Arc<dyn TranscriptionEngine>>,
    pub generator: Option<Arc<dyn GenerationClient>>,
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    pub settings: Settings,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            agent_service: Arc::clone(&self.agent_service),
            transcriber: self.transcriber.clone(),
            generator: self.generator.clone(),
            synthesizer: self.synthesizer.clone(),
            settings: self.settings.clone(),
        }
    }
}
