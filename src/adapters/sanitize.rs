//! Log sanitization for patient identifiers and credentials.
//!
//! Redaction is applied line by line to formatted log output:
//! - Identity documents (`CC 12345678`, `documento: 999`)
//! - Emails
//! - Phone numbers (international and Colombian mobile formats)
//! - Passwords and other contextual secrets
//! - Long hex tokens
//!
//! Patient data should stay out of log calls in the first place; this is the
//! fallback.
//!
//! Each line is capped (see `MEDDIAG_SANITIZE_MAX_BYTES`) so one huge record
//! cannot stall the log writer.

use std::borrow::Cow;
use std::io::Write;
use std::sync::OnceLock;

use regex::{Regex, RegexSet};
use tracing_subscriber::fmt::MakeWriter;

/// Default cap on bytes sanitized per call (16 KiB).
pub const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

const TRUNCATED_MARKER: &str = " [TRUNCATED]";

/// Rules in application order; contextual ones come before the broad ones.
const RULES: [(&str, &str); 7] = [
    // Identity documents with their type or label in front
    (
        r"(?i)\b(?:CC|TI|CE|PP|documento|document(?:_?number)?|cedula|cédula)[\s:=#]*\d{3,12}\b",
        "[REDACTED-DOC]",
    ),
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    // +34 666 555 444, +57 300 123 4567
    (r"\+\d{1,3}(?:[\s.-]?\d{2,4}){2,4}\b", "[REDACTED-PHONE]"),
    // Colombian mobile: 3001234567
    (r"\b3\d{9}\b", "[REDACTED-PHONE]"),
    // Grouped local: 601-555-1234
    (r"\b\d{3}[-.\s]\d{3}[-.\s]\d{4}\b", "[REDACTED-PHONE]"),
    (
        r"(?i)\b(?:password|passwd|pwd|contraseña|secret|token|api[_-]?key)\b\s*[:=]\s*\S+",
        "[REDACTED-SECRET]",
    ),
    (r"\b[0-9a-fA-F]{32,}\b", "[REDACTED-KEY]"),
];

/// Compiled redaction rules.
struct Redactor {
    /// One pass to find which rules fire at all
    any: RegexSet,
    rules: Vec<(Regex, &'static str)>,
}

impl Redactor {
    fn shared() -> &'static Self {
        static REDACTOR: OnceLock<Redactor> = OnceLock::new();
        REDACTOR.get_or_init(|| Self {
            any: RegexSet::new(RULES.iter().map(|(pattern, _)| *pattern)).expect("Valid regex set"),
            rules: RULES
                .iter()
                .map(|(pattern, label)| (Regex::new(pattern).expect("Valid regex"), *label))
                .collect(),
        })
    }

    fn redact<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.any
            .matches(text)
            .into_iter()
            .fold(Cow::Borrowed(text), |acc, idx| {
                let (regex, label) = &self.rules[idx];
                if regex.is_match(&acc) {
                    Cow::Owned(regex.replace_all(&acc, *label).into_owned())
                } else {
                    acc
                }
            })
    }
}

fn max_sanitize_bytes() -> usize {
    std::env::var("MEDDIAG_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

/// Longest prefix of `input` within `max_bytes` that ends on a char boundary.
fn clip(input: &str, max_bytes: usize) -> &str {
    if input.len() <= max_bytes {
        return input;
    }
    let end = (0..=max_bytes)
        .rev()
        .find(|&i| input.is_char_boundary(i))
        .unwrap_or(0);
    &input[..end]
}

/// Replace PII patterns in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let kept = clip(input, max_bytes);
    let mut out = Redactor::shared().redact(kept).into_owned();
    if kept.len() < input.len() {
        out.push_str(TRUNCATED_MARKER);
    }
    out
}

/// `MakeWriter` wrapper that redacts each formatted log line before it
/// reaches the inner sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

/// Buffers partial lines; complete lines are redacted and passed through.
pub struct SanitizingWriter<W> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            pending: Vec::new(),
        }
    }

    /// Redact one line; its terminator is written back untouched.
    fn emit(&mut self, chunk: &[u8]) -> std::io::Result<()> {
        let body_len = if chunk.ends_with(b"\r\n") {
            chunk.len() - 2
        } else if chunk.ends_with(b"\n") {
            chunk.len() - 1
        } else {
            chunk.len()
        };
        let (body, terminator) = chunk.split_at(body_len);

        let text = String::from_utf8_lossy(body);
        self.inner.write_all(sanitize(&text).as_bytes())?;
        self.inner.write_all(terminator)
    }

    /// Write out everything up to and including the last newline.
    fn drain_lines(&mut self) -> std::io::Result<()> {
        let Some(last) = self.pending.iter().rposition(|&b| b == b'\n') else {
            return Ok(());
        };
        let complete: Vec<u8> = self.pending.drain(..=last).collect();
        for line in complete.split_inclusive(|&b| b == b'\n') {
            self.emit(line)?;
        }
        Ok(())
    }
}

impl<W: Write> Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        self.drain_lines()?;

        // No newline in sight: do not buffer without bound.
        if self.pending.len() > max_sanitize_bytes().saturating_mul(2) {
            let overflow = std::mem::take(&mut self.pending);
            self.emit(&overflow)?;
            self.inner.write_all(b"\n")?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.drain_lines()?;
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
        }
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sanitize_document_number() {
        let sanitized = sanitize("Registered CC 12345678 at desk 2");
        assert!(sanitized.contains("[REDACTED-DOC]"));
        assert!(!sanitized.contains("12345678"));

        let sanitized = sanitize("documento: 999");
        assert!(sanitized.contains("[REDACTED-DOC]"));
    }

    #[test]
    fn test_sanitize_compact_document_number() {
        let sanitized = sanitize("Patient CC12345678 admitted");
        assert!(sanitized.contains("[REDACTED-DOC]"));
        assert!(!sanitized.contains("12345678"));

        let sanitized = sanitize("ti#1234567");
        assert!(!sanitized.contains("1234567"));
    }

    #[test]
    fn test_sanitize_email() {
        let sanitized = sanitize("Login attempt for ana.lopez@email.com");
        assert!(sanitized.contains("[REDACTED-EMAIL]"));
        assert!(!sanitized.contains("ana.lopez"));
    }

    #[test]
    fn test_sanitize_international_phone() {
        let sanitized = sanitize("Emergency contact +34 666 111 222 notified");
        assert!(sanitized.contains("[REDACTED-PHONE]"));
        assert!(!sanitized.contains("666 111"));
    }

    #[test]
    fn test_sanitize_mobile_phone() {
        let sanitized = sanitize("phone 3001234567");
        assert!(sanitized.contains("[REDACTED-PHONE]"));
    }

    #[test]
    fn test_sanitize_password() {
        let sanitized = sanitize("form password=hunter2 submitted");
        assert!(sanitized.contains("[REDACTED-SECRET]"));
        assert!(!sanitized.contains("hunter2"));
    }

    #[test]
    fn test_sanitize_key_material() {
        let sanitized = sanitize("Key: 0123456789abcdef0123456789abcdef");
        assert!(sanitized.contains("[REDACTED-KEY]"));
    }

    #[test]
    fn test_sanitize_truncates_large_inputs() {
        let input = "prefix 0123456789abcdef0123456789abcdef suffix";
        let sanitized = sanitize_with_limit(input, 16);
        assert!(sanitized.contains("[TRUNCATED]"));
    }

    #[test]
    fn test_writer_sanitizes_complete_lines() {
        let mut writer = SanitizingWriter::new(Vec::new());
        writer
            .write_all(b"contact ana.lopez@email.com\nnext")
            .expect("Write should succeed");
        writer.flush().expect("Flush should succeed");

        let out = String::from_utf8(writer.inner).expect("Valid UTF-8");
        assert!(out.contains("[REDACTED-EMAIL]"));
        assert!(out.ends_with("next"));
    }

    #[test]
    fn test_writer_keeps_line_breaks_after_truncation() {
        let mut writer = SanitizingWriter::new(Vec::new());
        let long_line = format!("{}\n", "a".repeat(DEFAULT_SANITIZE_MAX_BYTES + 100));
        writer
            .write_all(long_line.as_bytes())
            .expect("Write should succeed");
        writer
            .write_all(b"second line\r\n")
            .expect("Write should succeed");
        writer.flush().expect("Flush should succeed");

        let out = String::from_utf8(writer.inner).expect("Valid UTF-8");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[TRUNCATED]"));
        assert_eq!(lines[1], "second line");
        assert!(out.ends_with("\r\n"));
    }
}
