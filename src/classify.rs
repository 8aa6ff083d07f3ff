//! Text/binary classification and encoding-safe reading.
//!
//! The binary heuristic is fixed and not user-configurable so that runs are
//! reproducible: the first [`SNIFF_LEN`] bytes are inspected, and a file is
//! binary when the prefix contains a NUL byte or when more than 30% of its
//! bytes are suspect. A suspect byte is part of an invalid UTF-8 sequence or
//! is a C0 control byte other than TAB/LF/CR (DEL included). A multi-byte
//! sequence cut off by the sniff window is not suspect. Empty files are text.

use crate::options::TreecatOptions;
use crate::types::{FileKind, FileRecord, TreeEntry};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

/// Bytes inspected by the binary heuristic.
pub const SNIFF_LEN: u64 = 4096;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Encodings the reader can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// Strict UTF-8; a leading BOM is stripped before decoding.
    Utf8,
    /// ISO-8859-1, mapping every byte to the code point of the same value.
    /// Cannot fail, which makes it the conventional fallback.
    Latin1,
}

impl TextEncoding {
    /// Decodes, handing the bytes back on failure so a fallback can retry.
    fn try_decode(self, mut bytes: Vec<u8>) -> Result<String, (Vec<u8>, String)> {
        match self {
            TextEncoding::Utf8 => {
                if bytes.starts_with(&UTF8_BOM) {
                    bytes.drain(..UTF8_BOM.len());
                }
                String::from_utf8(bytes).map_err(|err| {
                    let reason = err.utf8_error().to_string();
                    (err.into_bytes(), reason)
                })
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

/// Classifies one file and, for text within the size ceiling, reads and
/// decodes its content. Never fails the run: I/O and decode problems come
/// back as [`FileKind::Unreadable`] records.
pub fn classify(path: &Path, entry: &TreeEntry, options: &TreecatOptions) -> FileRecord {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) => return FileRecord::unreadable(entry.clone(), err.to_string()),
    };
    if metadata.len() > options.max_file_size {
        #[cfg(feature = "logging")]
        tracing::debug!(
            "file too large ({} > {}), skipping content: {}",
            metadata.len(),
            options.max_file_size,
            path.display()
        );
        return FileRecord::skipped(entry.clone(), FileKind::TooLarge);
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => return FileRecord::unreadable(entry.clone(), err.to_string()),
    };
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::with_capacity(SNIFF_LEN as usize);
    if let Err(err) = reader.by_ref().take(SNIFF_LEN).read_to_end(&mut bytes) {
        return FileRecord::unreadable(entry.clone(), err.to_string());
    }
    if looks_binary(&bytes) {
        #[cfg(feature = "logging")]
        tracing::debug!("binary file detected: {}", path.display());
        return FileRecord::skipped(entry.clone(), FileKind::Binary);
    }
    if let Err(err) = reader.read_to_end(&mut bytes) {
        return FileRecord::unreadable(entry.clone(), err.to_string());
    }

    match decode(bytes, options.encoding, options.fallback_encoding) {
        Ok((content, encoding)) => FileRecord {
            entry: entry.clone(),
            kind: FileKind::Text,
            content: Some(content),
            encoding: Some(encoding),
            reason: None,
        },
        Err(reason) => FileRecord::unreadable(entry.clone(), reason),
    }
}

fn decode(
    bytes: Vec<u8>,
    preferred: TextEncoding,
    fallback: Option<TextEncoding>,
) -> Result<(String, TextEncoding), String> {
    match preferred.try_decode(bytes) {
        Ok(content) => Ok((content, preferred)),
        Err((bytes, reason)) => match fallback {
            Some(encoding) if encoding != preferred => encoding
                .try_decode(bytes)
                .map(|content| (content, encoding))
                .map_err(|(_, fallback_reason)| fallback_reason),
            _ => Err(reason),
        },
    }
}

/// The fixed binary heuristic, applied to the sniffed prefix.
fn looks_binary(prefix: &[u8]) -> bool {
    if prefix.is_empty() {
        return false;
    }
    if prefix.contains(&0) {
        return true;
    }
    suspect_bytes(prefix) * 10 > prefix.len() * 3
}

fn suspect_bytes(prefix: &[u8]) -> usize {
    let mut suspect = 0;
    let mut rest = prefix;
    loop {
        match std::str::from_utf8(rest) {
            Ok(text) => {
                suspect += text.bytes().filter(|&b| is_suspect_control(b)).count();
                break;
            }
            Err(err) => {
                suspect += rest[..err.valid_up_to()]
                    .iter()
                    .filter(|&&b| is_suspect_control(b))
                    .count();
                match err.error_len() {
                    Some(len) => {
                        suspect += len;
                        rest = &rest[err.valid_up_to() + len..];
                    }
                    // Sequence truncated by the sniff window, not evidence
                    // of binary content.
                    None => break,
                }
            }
        }
    }
    suspect
}

fn is_suspect_control(byte: u8) -> bool {
    (byte < 0x20 && byte != b'\t' && byte != b'\n' && byte != b'\r') || byte == 0x7F
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prefix_is_text() {
        assert!(!looks_binary(b""));
    }

    #[test]
    fn nul_byte_means_binary() {
        assert!(looks_binary(b"ordinary text\0more text"));
        assert!(looks_binary(&[0]));
    }

    #[test]
    fn control_heavy_prefix_is_binary() {
        let prefix: Vec<u8> = vec![0x01; 64];
        assert!(looks_binary(&prefix));
    }

    #[test]
    fn invalid_utf8_ratio_is_binary() {
        // Lone continuation bytes are all suspect.
        let prefix: Vec<u8> = vec![0x80; 64];
        assert!(looks_binary(&prefix));
    }

    #[test]
    fn mostly_text_stays_text() {
        let mut prefix = vec![b'a'; 97];
        prefix.extend([0x01, 0x02]);
        assert!(!looks_binary(&prefix));
        assert!(!looks_binary(b"plain text\twith\ntabs and\r\nnewlines"));
    }

    #[test]
    fn latin1_accents_stay_text() {
        // "café au lait, très bon" in Latin-1: two suspect bytes out of 22.
        let prefix = b"caf\xe9 au lait, tr\xe8s bon";
        assert!(!looks_binary(prefix));
    }

    #[test]
    fn truncated_multibyte_at_window_edge_is_not_suspect() {
        let mut prefix = b"hello ".to_vec();
        prefix.extend([0xE2, 0x82]); // first two bytes of a three-byte char
        assert!(!looks_binary(&prefix));
        assert_eq!(suspect_bytes(&prefix), 0);
    }

    #[test]
    fn decode_strips_utf8_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend(b"hello");
        let (content, encoding) = decode(bytes, TextEncoding::Utf8, None).unwrap();
        assert_eq!(content, "hello");
        assert_eq!(encoding, TextEncoding::Utf8);
    }

    #[test]
    fn decode_falls_back_to_latin1() {
        let bytes = b"caf\xe9".to_vec();
        let (content, encoding) =
            decode(bytes, TextEncoding::Utf8, Some(TextEncoding::Latin1)).unwrap();
        assert_eq!(content, "café");
        assert_eq!(encoding, TextEncoding::Latin1);
    }

    #[test]
    fn decode_without_fallback_reports_the_utf8_reason() {
        let reason = decode(b"caf\xe9 au lait".to_vec(), TextEncoding::Utf8, None).unwrap_err();
        assert!(reason.contains("invalid utf-8"), "got: {reason}");

        // A sequence cut off at the end reads as incomplete, not invalid.
        let reason = decode(b"caf\xe9".to_vec(), TextEncoding::Utf8, None).unwrap_err();
        assert!(reason.contains("utf-8"), "got: {reason}");
    }

    #[test]
    fn identical_fallback_is_not_retried() {
        let bytes = b"\xff\xfe".to_vec();
        assert!(decode(bytes, TextEncoding::Utf8, Some(TextEncoding::Utf8)).is_err());
    }
}
