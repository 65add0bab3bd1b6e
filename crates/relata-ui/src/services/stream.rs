//! SSE parsing and the terminal-once progress channel core.
//!
//! # Design
//! - Accept partial chunks and emit complete SSE frames when a blank
//!   line is received.
//! - Keep this module DOM-free so the channel state machine runs in
//!   host-side tests without a transport.
//! - The channel closes itself *before* surfacing a terminal signal, so
//!   late-arriving duplicate frames can never fire a second completion.

use relata_api_models::PROGRESS_COMPLETE;
use serde_json::Value;

/// Parsed SSE frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SseFrame {
    /// Optional event name.
    pub event: Option<String>,
    /// Concatenated data payload.
    pub data: String,
}

impl SseFrame {
    fn is_empty(&self) -> bool {
        self.event.is_none() && self.data.is_empty()
    }

    fn apply_field(&mut self, field: &str, value: &str) {
        match field {
            "event" => self.event = Some(value.to_string()),
            "data" => {
                if !self.data.is_empty() {
                    self.data.push('\n');
                }
                self.data.push_str(value);
            }
            _ => {}
        }
    }
}

/// Incremental SSE parser for streamed chunks.
#[derive(Default)]
pub struct SseParser {
    line: String,
    pending_cr: bool,
    building: SseFrame,
}

impl SseParser {
    /// Feed a chunk of stream text, returning any completed frames.
    pub fn push(&mut self, chunk: &str) -> Vec<SseFrame> {
        let mut frames = Vec::new();
        for ch in chunk.chars() {
            if self.pending_cr {
                self.pending_cr = false;
                if ch == '\n' {
                    continue;
                }
            }
            match ch {
                '\n' => self.finish_line(&mut frames),
                '\r' => {
                    self.pending_cr = true;
                    self.finish_line(&mut frames);
                }
                _ => self.line.push(ch),
            }
        }
        frames
    }

    fn finish_line(&mut self, frames: &mut Vec<SseFrame>) {
        let line = std::mem::take(&mut self.line);
        if line.is_empty() {
            if !self.building.is_empty() {
                frames.push(std::mem::take(&mut self.building));
            }
            return;
        }
        if line.starts_with(':') {
            return;
        }
        let (field, value) = line
            .split_once(':')
            .map(|(field, value)| (field, value.strip_prefix(' ').unwrap_or(value)))
            .unwrap_or((line.as_str(), ""));
        self.building.apply_field(field, value);
    }
}

/// A frame whose payload was not valid JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeError {
    /// Raw payload data, kept for logging.
    pub data: String,
}

/// Decode a progress payload.
///
/// A missing or non-numeric `progress` field decodes as `0`; values
/// above 100 clamp to 100. Only payloads that are not JSON at all are
/// rejected.
///
/// # Errors
///
/// Returns [`DecodeError`] when the payload is not valid JSON.
pub fn decode_progress(data: &str) -> Result<u8, DecodeError> {
    let value: Value = serde_json::from_str(data).map_err(|_| DecodeError {
        data: data.to_string(),
    })?;
    let percent = value
        .get("progress")
        .and_then(Value::as_u64)
        .unwrap_or(0)
        .min(u64::from(PROGRESS_COMPLETE));
    Ok(u8::try_from(percent).unwrap_or(PROGRESS_COMPLETE))
}

/// Signal surfaced by the channel for one inbound frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelSignal {
    /// Non-terminal progress update.
    Progress(u8),
    /// The stream reached 100%; the channel is now closed.
    Completed,
}

/// Terminal-once state for a single sync attempt's progress channel.
///
/// The transport feeds decoded frames in; at most one terminal outcome
/// (completion via [`Self::handle_frame`], failure via [`Self::fail`])
/// is ever surfaced, and [`Self::close`] is idempotent.
#[derive(Debug)]
pub struct ProgressChannel {
    open: bool,
}

impl ProgressChannel {
    /// A channel for a freshly opened connection.
    #[must_use]
    pub const fn new() -> Self {
        Self { open: true }
    }

    /// Whether the channel still accepts frames.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Process one frame payload.
    ///
    /// Returns `Ok(None)` when the channel is already closed (late
    /// frames after a terminal outcome are dropped without effect).
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] for a non-JSON payload; the channel stays
    /// open and healthy frames keep flowing.
    pub fn handle_frame(&mut self, data: &str) -> Result<Option<ChannelSignal>, DecodeError> {
        if !self.open {
            return Ok(None);
        }
        let percent = decode_progress(data)?;
        if percent >= PROGRESS_COMPLETE {
            self.open = false;
            return Ok(Some(ChannelSignal::Completed));
        }
        Ok(Some(ChannelSignal::Progress(percent)))
    }

    /// Record a transport failure.
    ///
    /// Returns `true` only the first time a terminal outcome occurs, so
    /// the caller signals failure exactly once.
    pub const fn fail(&mut self) -> bool {
        let first = self.open;
        self.open = false;
        first
    }

    /// Close the channel. Safe to call repeatedly and after a terminal
    /// outcome.
    pub const fn close(&mut self) {
        self.open = false;
    }
}

impl Default for ProgressChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_emits_frames_on_blank_lines() {
        let mut parser = SseParser::default();
        let frames = parser.push("event: progress\ndata: {\"progress\":40}\n\ndata: {}\n\n");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].event.as_deref(), Some("progress"));
        assert_eq!(frames[0].data, "{\"progress\":40}");
        assert_eq!(frames[1].data, "{}");
    }

    #[test]
    fn parser_ignores_comment_lines() {
        let mut parser = SseParser::default();
        let frames = parser.push(": keep-alive\n\ndata: {\"progress\":10}\n\n");
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn parser_handles_crlf_and_split_chunks() {
        let mut parser = SseParser::default();
        assert!(parser.push("data: {\"prog").is_empty());
        let frames = parser.push("ress\":25}\r\n\r\n");
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, "{\"progress\":25}");
    }

    #[test]
    fn missing_or_malformed_progress_field_decodes_as_zero() {
        assert_eq!(decode_progress("{}").expect("valid json"), 0);
        assert_eq!(
            decode_progress("{\"progress\":\"lots\"}").expect("valid json"),
            0
        );
        assert_eq!(decode_progress("{\"progress\":250}").expect("valid json"), 100);
    }

    #[test]
    fn non_json_payload_is_a_decode_error() {
        let err = decode_progress("not json").expect_err("invalid payload");
        assert_eq!(err.data, "not json");
    }

    #[test]
    fn completion_fires_exactly_once() {
        let mut channel = ProgressChannel::new();
        assert_eq!(
            channel.handle_frame("{\"progress\":40}").expect("frame"),
            Some(ChannelSignal::Progress(40))
        );
        assert_eq!(
            channel.handle_frame("{\"progress\":100}").expect("frame"),
            Some(ChannelSignal::Completed)
        );
        // Late duplicates after the terminal outcome are dropped.
        assert_eq!(channel.handle_frame("{\"progress\":100}").expect("frame"), None);
        assert!(!channel.is_open());
    }

    #[test]
    fn malformed_frames_do_not_abort_the_stream() {
        let mut channel = ProgressChannel::new();
        assert!(channel.handle_frame("garbage").is_err());
        assert_eq!(
            channel.handle_frame("{\"progress\":60}").expect("frame"),
            Some(ChannelSignal::Progress(60))
        );
    }

    #[test]
    fn failure_signals_exactly_once() {
        let mut channel = ProgressChannel::new();
        assert!(channel.fail());
        assert!(!channel.fail());
    }

    #[test]
    fn failure_after_completion_is_suppressed() {
        let mut channel = ProgressChannel::new();
        let _ = channel.handle_frame("{\"progress\":100}").expect("frame");
        assert!(!channel.fail());
    }

    #[test]
    fn close_is_idempotent() {
        let mut channel = ProgressChannel::new();
        channel.close();
        channel.close();
        assert!(!channel.is_open());
        assert_eq!(channel.handle_frame("{\"progress\":10}").expect("frame"), None);
    }
}
