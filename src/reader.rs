//! FileReader (§4.1): bytes → text, with lossy UTF-8 fallback.
//!
//! Binary files and files with invalid UTF-8 are never rejected outright —
//! they decode to garbage text and proceed through the normal parsing path,
//! which downgrades gracefully rather than panicking (§4.8 edge cases).
use std::fs;
use std::io;
use std::path::Path;

use crate::lang::counter::{LineKind, classify_reader};
use crate::lang::registry::LanguageSpec;

/// Source text split into lines, each tagged with its classification
/// (blank/comment/code) against the file's detected language.
pub struct FileText {
    pub lines: Vec<String>,
    pub kinds: Vec<LineKind>,
}

/// Read `path`, lossily decode it as UTF-8, normalize line endings, and
/// classify each line. IO errors (missing file, permission denied) are
/// the only failure mode; decoding itself never fails.
pub fn read(path: &Path, spec: &LanguageSpec) -> io::Result<FileText> {
    let bytes = fs::read(path)?;
    Ok(from_bytes(&bytes, spec))
}

/// Decode already-loaded bytes (e.g. a git blob) the same way [`read`]
/// decodes a file from disk. Used by the delta analyzer, which reads
/// file content out of two git trees rather than the working tree.
pub fn from_bytes(bytes: &[u8], spec: &LanguageSpec) -> FileText {
    let content = String::from_utf8_lossy(bytes).into_owned();
    // Normalize CRLF → LF before splitting, so the FSM never sees trailing \r.
    let normalized = content.replace("\r\n", "\n");
    let lines: Vec<String> = normalized.lines().map(String::from).collect();
    let kinds = classify_reader(normalized.as_bytes(), spec);
    FileText { lines, kinds }
}

#[cfg(test)]
#[path = "reader_test.rs"]
mod tests;
