//! Reassembly of chunked generator responses.
//!
//! A streaming generator sends its JSON body as arbitrary byte chunks and
//! then an end marker. Chunks are concatenated in arrival order; everything
//! from the marker on is discarded. A stream that closes before the marker
//! is a failure even if the bytes so far happen to parse.
//!
//! The marker only counts outside JSON string literals, so a label such as
//! `"Mark essay [DONE]"` is body text, not the end of the stream.

use super::GeneratorFailure;

/// Marker that terminates a streamed response body.
pub const END_OF_STREAM: &str = "[DONE]";

/// Accumulates streamed chunks until [`END_OF_STREAM`] is seen.
#[derive(Debug, Default)]
pub struct StreamAssembler {
    buffer: Vec<u8>,
    finished: bool,
    /// Inside a JSON string literal
    in_string: bool,
    /// Previous byte was a backslash inside a string
    escaped: bool,
    /// Marker bytes matched so far, possibly across chunks
    matched: usize,
}

impl StreamAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk. Returns `true` once the end marker has been seen;
    /// later chunks are ignored.
    pub fn push(&mut self, chunk: &[u8]) -> bool {
        if self.finished {
            return true;
        }

        let marker = END_OF_STREAM.as_bytes();
        for (i, &byte) in chunk.iter().enumerate() {
            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if byte == b'\\' {
                    self.escaped = true;
                } else if byte == b'"' {
                    self.in_string = false;
                }
                continue;
            }

            if byte == marker[self.matched] {
                self.matched += 1;
                if self.matched == marker.len() {
                    // The marker may have started in an earlier chunk
                    let end = self.buffer.len() + i + 1 - marker.len();
                    self.buffer.extend_from_slice(&chunk[..=i]);
                    self.buffer.truncate(end);
                    self.finished = true;
                    return true;
                }
            } else {
                self.matched = usize::from(byte == marker[0]);
                self.in_string = byte == b'"';
            }
        }
        self.buffer.extend_from_slice(chunk);
        false
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Bytes received so far, excluding the marker.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The assembled body.
    ///
    /// # Errors
    ///
    /// Fails if the marker never arrived or the bytes are not UTF-8.
    pub fn finish(self) -> Result<String, GeneratorFailure> {
        if !self.finished {
            return Err(GeneratorFailure::new(format!(
                "stream closed after {} bytes without {END_OF_STREAM}",
                self.buffer.len()
            )));
        }
        String::from_utf8(self.buffer)
            .map_err(|e| GeneratorFailure::new(format!("stream is not valid UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_concatenate_in_order() {
        let mut assembler = StreamAssembler::new();
        assert!(!assembler.push(b"{\"plan\":"));
        assert!(!assembler.push(b" null}"));
        assert!(assembler.push(b"[DONE]"));
        assert_eq!(assembler.finish().unwrap(), "{\"plan\": null}");
    }

    #[test]
    fn test_marker_split_across_chunks() {
        let mut assembler = StreamAssembler::new();
        assembler.push(b"{}[DO");
        assert!(!assembler.is_finished());
        assert!(assembler.push(b"NE]"));
        assert_eq!(assembler.finish().unwrap(), "{}");
    }

    #[test]
    fn test_bytes_after_marker_are_ignored() {
        let mut assembler = StreamAssembler::new();
        assert!(assembler.push(b"{}[DONE]trailing"));
        assert!(assembler.push(b"more garbage"));
        assert_eq!(assembler.len(), 2);
        assert_eq!(assembler.finish().unwrap(), "{}");
    }

    #[test]
    fn test_marker_inside_string_is_body_text() {
        let body = r#"{"label":"Mark essay [DONE]","note":"say \"[DONE]\" twice"}"#;
        let mut assembler = StreamAssembler::new();
        assert!(!assembler.push(body.as_bytes()));
        assert!(assembler.push(b"[DONE]"));
        assert_eq!(assembler.finish().unwrap(), body);
    }

    #[test]
    fn test_marker_inside_string_split_across_chunks() {
        let mut assembler = StreamAssembler::new();
        assert!(!assembler.push(b"{\"label\":\"Mark essay [DO"));
        assert!(!assembler.push(b"NE]\"}"));
        assert!(assembler.push(b"\n[DONE]\n"));
        assert_eq!(
            assembler.finish().unwrap(),
            "{\"label\":\"Mark essay [DONE]\"}\n"
        );
    }

    #[test]
    fn test_missing_marker_is_failure() {
        let mut assembler = StreamAssembler::new();
        assembler.push(b"{\"plan\": null}");
        let err = assembler.finish().unwrap_err();
        assert!(err.reason.contains("[DONE]"));
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let bytes = "{\"summary\":\"café\"}".as_bytes();
        let (head, tail) = bytes.split_at(16);
        let mut assembler = StreamAssembler::new();
        assembler.push(head);
        assembler.push(tail);
        assembler.push(b"[DONE]");
        assert_eq!(assembler.finish().unwrap(), "{\"summary\":\"café\"}");
    }

    #[test]
    fn test_invalid_utf8_is_failure() {
        let mut assembler = StreamAssembler::new();
        assembler.push(&[0xff, 0xfe]);
        assembler.push(b"[DONE]");
        assert!(assembler.finish().is_err());
    }
}
