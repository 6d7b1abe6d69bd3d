mod agent_service;
mod prompt;

pub use agent_service::{
    AgentError, AgentService, CONNECT_FALLBACK, NO_SPEECH_FALLBACK, TurnReply,
};
pub use prompt::{MAX_REPLY_CHARS, SYSTEM_INSTRUCTION, clamp_reply, render_prompt};
