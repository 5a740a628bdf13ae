//! Incremental decoder for OpenAI-compatible `text/event-stream` completion bodies.

use serde::Deserialize;

/// Streaming chunk from an OpenAI-compatible API (SSE data payload).
#[derive(Deserialize, Debug)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    error: Option<UpstreamError>,
}

#[derive(Deserialize, Debug)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Deserialize, Debug, Default)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct UpstreamError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SseEvent {
    Text(String),
    Done,
    Error(String),
}

/// Buffers raw bytes and yields events for every complete line.
///
/// Lines are split on `\n` before UTF-8 decoding so a code point split across network
/// chunks is never mangled.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn push(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);
        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(event) = parse_line(line.trim()) {
                events.push(event);
            }
        }
        events
    }
}

fn parse_line(line: &str) -> Option<SseEvent> {
    // Comments (": keepalive") and other fields are ignored.
    let data = line.strip_prefix("data:")?.trim_start();
    if data == "[DONE]" {
        return Some(SseEvent::Done);
    }
    match serde_json::from_str::<StreamChunk>(data) {
        Ok(chunk) => {
            if let Some(err) = chunk.error {
                return Some(SseEvent::Error(err.message));
            }
            chunk
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.delta.content)
                .filter(|s| !s.is_empty())
                .map(SseEvent::Text)
        }
        Err(e) => {
            tracing::debug!(
                target: "moodgate::model_router",
                "Failed to parse SSE chunk: {} ({} bytes)",
                e,
                data.len()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_content_deltas_and_done() {
        let mut d = SseDecoder::default();
        let events = d.push(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\n\
              data: {\"choices\":[{\"delta\":{\"content\":\" there\"}}]}\n\n\
              data: [DONE]\n\n",
        );
        assert_eq!(
            events,
            vec![
                SseEvent::Text("Hi".into()),
                SseEvent::Text(" there".into()),
                SseEvent::Done
            ]
        );
    }

    #[test]
    fn holds_partial_lines_across_pushes() {
        let mut d = SseDecoder::default();
        assert!(d.push(b"data: {\"choices\":[{\"delta\":{\"con").is_empty());
        assert_eq!(
            d.push(b"tent\":\"ok\"}}]}\n"),
            vec![SseEvent::Text("ok".into())]
        );
    }

    #[test]
    fn multibyte_split_across_chunks_survives() {
        let line = "data: {\"choices\":[{\"delta\":{\"content\":\"caf\u{e9}\"}}]}\n".as_bytes();
        let split = line.iter().position(|&b| b == 0xC3).unwrap() + 1;
        let mut d = SseDecoder::default();
        assert!(d.push(&line[..split]).is_empty());
        assert_eq!(d.push(&line[split..]), vec![SseEvent::Text("café".into())]);
    }

    #[test]
    fn ignores_comments_and_empty_deltas() {
        let mut d = SseDecoder::default();
        let events = d.push(b": OPENROUTER PROCESSING\n\ndata: {\"choices\":[{\"delta\":{}}]}\n");
        assert!(events.is_empty());
    }

    #[test]
    fn surfaces_upstream_error_objects() {
        let mut d = SseDecoder::default();
        let events = d.push(b"data: {\"error\":{\"message\":\"overloaded\"}}\n");
        assert_eq!(events, vec![SseEvent::Error("overloaded".into())]);
    }
}
