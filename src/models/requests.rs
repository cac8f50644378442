//! Request DTOs for the admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

/// Maximum accepted key length in bytes
pub const MAX_KEY_LENGTH: usize = 512;

/// Request body for storing an entry (PUT /entries)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The payload to store
    pub value: Value,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}

/// Request body for POST /invalidate
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidatePatternRequest {
    /// Regular expression matched against keys
    pub pattern: String,
}

/// Request body for POST /invalidate/subject
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateSubjectRequest {
    /// Subject the keys were generated from (string or object)
    pub subject: Value,
}
