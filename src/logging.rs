//! Logger initialisation and log-friendly text previews.

/// Maximum characters of user or model text written to a single log line.
pub const PREVIEW_CHARS: usize = 50;

/// Initialise `env_logger` with an `info` default; `RUST_LOG` overrides it.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// First [`PREVIEW_CHARS`] characters of `text`, with `...` appended when
/// truncated.  Counts chars, not bytes, so multibyte scripts never split.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(preview("fever"), "fever");
    }

    #[test]
    fn long_text_is_truncated_with_ellipsis() {
        let text = "a".repeat(80);
        let p = preview(&text);
        assert_eq!(p.len(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn multibyte_text_truncates_on_char_boundary() {
        let text = "बुखार".repeat(20);
        let p = preview(&text);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
    }
}
