use sha2::{Digest, Sha256};

/// Generic SHA256 helper returning a lowercase hex-encoded digest.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// SHA256 fingerprint of a document's raw extracted text.
///
/// Lets callers key a report by the exact content that was compared without
/// retaining the text itself.
pub fn document_fingerprint(raw_text: &str) -> String {
    sha256_hex(raw_text)
}
