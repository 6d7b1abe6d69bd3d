use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub generation: GenerationSettings,
    pub synthesis: SynthesisSettings,
    pub uploads: UploadSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// A capability whose `api_key` is absent is disabled, not an error:
/// the service degrades to its fallback path instead of failing startup.
#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SynthesisSettings {
    pub api_key: Option<String>,
    pub voice_id: String,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: std::env::var("SERVER_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8000),
            },
            transcription: TranscriptionSettings {
                api_key: env_opt("ASSEMBLYAI_API_KEY"),
                base_url: env_opt("ASSEMBLYAI_BASE_URL"),
            },
            generation: GenerationSettings {
                api_key: env_opt("GEMINI_API_KEY"),
                model: env_or("GEMINI_MODEL", "gemini-1.5-flash"),
                base_url: env_opt("GEMINI_BASE_URL"),
            },
            synthesis: SynthesisSettings {
                api_key: env_opt("MURF_API_KEY"),
                voice_id: env_or("MURF_VOICE_ID", "en-IN-alia"),
                base_url: env_opt("MURF_BASE_URL"),
            },
            uploads: UploadSettings {
                dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
            },
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

/// An empty value counts as unset.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
