mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    GenerationSettings, ServerSettings, Settings, SynthesisSettings, TranscriptionSettings,
    UploadSettings,
};
