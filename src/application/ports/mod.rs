mod generation_client;
mod session_store;
mod speech_synthesizer;
mod transcription_engine;

pub use generation_client::{GenerationClient, GenerationError};
pub use session_store::{SessionStore, SessionStoreError};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
