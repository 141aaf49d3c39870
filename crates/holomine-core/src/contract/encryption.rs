//! Encryption Service response contract.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};

/// Number of characters of the session token shown to users.
pub const SESSION_ID_PREVIEW_LEN: usize = 16;

/// Successful response of the Encryption Service.
///
/// The core treats `algorithm` and `encrypted` as labels supplied by the
/// service; nothing here verifies that the ciphertext is what it claims to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionResult {
    /// Scheme label, e.g. `Holographic-AES-256-CBC`.
    pub algorithm: String,
    /// Key size in bits.
    pub key_size: u32,
    /// Number of records the service parsed out of the dataset.
    pub record_count: u64,
    /// Opaque token identifying this encryption artifact.
    pub session_id: String,
    /// Base64-encoded ciphertext.
    pub encrypted: String,
    /// Server-side timestamp, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl EncryptionResult {
    /// The session token truncated for display, e.g. `abc123def4567890...`.
    pub fn session_id_preview(&self) -> String {
        preview(&self.session_id, SESSION_ID_PREVIEW_LEN)
    }

    /// The first `max_chars` characters of the base64 ciphertext.
    pub fn ciphertext_preview(&self, max_chars: usize) -> String {
        preview(&self.encrypted, max_chars)
    }

    /// Length of the base64 ciphertext in characters.
    pub fn ciphertext_len(&self) -> usize {
        self.encrypted.chars().count()
    }

    /// Decodes the ciphertext into raw bytes.
    pub fn decode_ciphertext(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64_STANDARD.decode(self.encrypted.as_bytes())
    }
}

fn preview(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let head: String = value.chars().take(max_chars).collect();
    format!("{head}...")
}
