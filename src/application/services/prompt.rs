use crate::domain::Turn;

/// Instruction prefixed to every conversational prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are a friendly AI voice assistant. \
     Think internally before answering, but ONLY output your final spoken reply to the user. \
     Do not include your reasoning, bullet points, or multiple options — just a clear, natural answer.";

/// Replies longer than this are hard-truncated before storage and synthesis.
pub const MAX_REPLY_CHARS: usize = 3000;

/// Renders the full history, oldest first, into a single prompt ending with
/// the assistant cue.
pub fn render_prompt(history: &[Turn]) -> String {
    let lines = history
        .iter()
        .map(|turn| format!("{}: {}", turn.role.speaker_label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n\n{}\nAssistant:", SYSTEM_INSTRUCTION, lines)
}

/// Truncates `text` to [`MAX_REPLY_CHARS`] characters at a character boundary.
pub fn clamp_reply(mut text: String) -> String {
    if let Some((idx, _)) = text.char_indices().nth(MAX_REPLY_CHARS) {
        text.truncate(idx);
    }
    text
}
