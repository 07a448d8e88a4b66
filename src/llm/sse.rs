//! Incremental server-sent-events decoder.
//!
//! Network chunks split lines (and UTF-8 sequences) at arbitrary byte
//! offsets, so bytes are buffered until a full `\n`-terminated line is
//! available.  Only `data:` fields are surfaced; comments, `event:` lines
//! and blank separators are dropped.

/// Buffers raw bytes and yields complete `data:` payloads.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a network chunk; returns every payload completed by it, in order.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(payload) = data_payload(&line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Flush a trailing line that arrived without a final newline.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        data_payload(&rest)
    }
}

fn data_payload(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let payload = line.trim().strip_prefix("data:")?.trim_start();
    if payload.is_empty() || payload == "[DONE]" {
        return None;
    }
    Some(payload.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_complete_data_lines() {
        let mut dec = SseDecoder::new();
        let out = dec.push(b"data: {\"a\":1}\r\n\r\ndata: {\"a\":2}\n\n");
        assert_eq!(out, vec!["{\"a\":1}", "{\"a\":2}"]);
    }

    #[test]
    fn buffers_partial_lines_across_pushes() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"data: {\"te").is_empty());
        assert_eq!(dec.push(b"xt\":\"hi\"}\n"), vec!["{\"text\":\"hi\"}"]);
    }

    #[test]
    fn multibyte_char_split_between_chunks_survives() {
        let line = "data: बुखार\n".as_bytes();
        // Split inside the first Devanagari code point.
        let (a, b) = line.split_at(7);
        let mut dec = SseDecoder::new();
        assert!(dec.push(a).is_empty());
        assert_eq!(dec.push(b), vec!["बुखार"]);
    }

    #[test]
    fn ignores_non_data_fields_and_done_marker() {
        let mut dec = SseDecoder::new();
        let out = dec.push(b": keep-alive\nevent: message\ndata: [DONE]\n");
        assert!(out.is_empty());
    }

    #[test]
    fn finish_flushes_unterminated_line() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"data: tail").is_empty());
        assert_eq!(dec.finish().as_deref(), Some("tail"));
        assert!(dec.finish().is_none());
    }
}
