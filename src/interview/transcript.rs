// src/interview/transcript.rs
//! Incremental speech transcript handling.
//!
//! A recognizer reports the whole transcript of the current capture on every
//! update. Only the part not yet consumed is appended to the answer.

#[derive(Debug, Clone, Default)]
pub struct TranscriptBuffer {
    seen: String,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the part of `transcript` that has not been consumed yet.
    ///
    /// A prefix extension of the previous transcript yields its new suffix.
    /// A shrunk transcript (a prefix of what was seen) yields nothing. Anything
    /// else means the recognizer started over and the whole text is new.
    pub fn advance<'t>(&mut self, transcript: &'t str) -> &'t str {
        let delta = if let Some(rest) = transcript.strip_prefix(self.seen.as_str()) {
            rest
        } else if self.seen.starts_with(transcript) {
            ""
        } else {
            transcript
        };

        self.seen.clear();
        self.seen.push_str(transcript);
        delta
    }

    /// Append the unconsumed part of `transcript` to `answer`
    pub fn append_to(&mut self, transcript: &str, answer: &mut String) {
        let delta = self.advance(transcript);
        answer.push_str(delta);
    }

    pub fn reset(&mut self) {
        self.seen.clear();
    }

    pub fn seen(&self) -> &str {
        &self.seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_extensions_append_once() {
        let mut buffer = TranscriptBuffer::new();
        let mut answer = String::new();

        for transcript in ["I used", "I used a hash map", "I used a hash map for lookups"] {
            buffer.append_to(transcript, &mut answer);
        }

        assert_eq!(answer, "I used a hash map for lookups");
    }

    #[test]
    fn test_keeps_typed_text_before_capture() {
        let mut buffer = TranscriptBuffer::new();
        let mut answer = String::from("Typed intro. ");

        buffer.append_to("spoken", &mut answer);
        buffer.append_to("spoken words", &mut answer);

        assert_eq!(answer, "Typed intro. spoken words");
    }

    #[test]
    fn test_repeated_transcript_adds_nothing() {
        let mut buffer = TranscriptBuffer::new();
        let mut answer = String::new();

        buffer.append_to("same text", &mut answer);
        buffer.append_to("same text", &mut answer);
        buffer.append_to("same", &mut answer);

        assert_eq!(answer, "same text");
    }

    #[test]
    fn test_restarted_recognizer_is_a_new_segment() {
        let mut buffer = TranscriptBuffer::new();
        let mut answer = String::new();

        buffer.append_to("first part", &mut answer);
        buffer.append_to(" second", &mut answer);

        assert_eq!(answer, "first part second");
    }

    #[test]
    fn test_reset_starts_fresh_capture() {
        let mut buffer = TranscriptBuffer::new();
        let mut answer = String::new();

        buffer.append_to("hello", &mut answer);
        buffer.reset();
        assert!(buffer.seen().is_empty());
        buffer.append_to("hello", &mut answer);

        assert_eq!(answer, "hellohello");
    }

    #[test]
    fn test_multibyte_text() {
        let mut buffer = TranscriptBuffer::new();
        assert_eq!(buffer.advance("Bună"), "Bună");
        assert_eq!(buffer.advance("Bună ziua, mă numesc"), " ziua, mă numesc");
    }
}
