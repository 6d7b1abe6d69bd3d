const MAX_VISIBLE_CHARS: usize = 120;

/// Sanitizes transcript or prompt text for safe logging: bounded length,
/// credential-looking fragments redacted.
pub fn sanitize_text(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let bounded = match trimmed.char_indices().nth(MAX_VISIBLE_CHARS) {
        Some((idx, _)) => format!("{}... ({} chars total)", &trimmed[..idx], trimmed.len()),
        None => trimmed.to_string(),
    };

    redact_credentials(&bounded)
}

fn redact_credentials(text: &str) -> String {
    let markers = [
        ("Bearer ", "Bearer [REDACTED]"),
        ("api-key=", "api-key=[REDACTED]"),
        ("api_key=", "api_key=[REDACTED]"),
        ("key=", "key=[REDACTED]"),
        ("token=", "token=[REDACTED]"),
    ];

    let mut result = text.to_string();
    for (marker, replacement) in markers {
        if let Some(idx) = result.find(marker) {
            let end = result[idx + marker.len()..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| idx + marker.len() + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..idx], replacement, &result[end..]);
        }
    }

    result
}
