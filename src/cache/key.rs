//! Cache key generation.
//!
//! Turns a request subject (a dish name, a wine list, a query vector
//! description) plus optional context and preference objects into a stable,
//! namespaced key.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Number of hex digits of the SHA-256 digest embedded in keys.
const DIGEST_LEN: usize = 16;

/// Marks a subject segment that is a digest rather than text.
const DIGEST_TAG: char = '#';

// == Key Generator ==
/// Builds canonical keys under a fixed namespace prefix.
///
/// Segments are separated by `:`. Text segments have `%`, `:` and `#`
/// percent-encoded, so a segment never spans a separator and a text subject
/// never looks like a digested one.
#[derive(Debug, Clone)]
pub struct CacheKeyGenerator {
    prefix: String,
}

impl CacheKeyGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generates a key for a subject and its auxiliary inputs.
    ///
    /// A `null` context or preferences counts as absent. Plain string
    /// subjects with scalar (or absent) auxiliaries compose directly:
    /// `prefix:subject`, `prefix:subject:<context>` or
    /// `prefix:subject:<context>:<preferences>`, with an empty context
    /// segment when only preferences are given. As soon as any input is an
    /// object or array, `[context, preferences]` is canonically serialized
    /// and hashed, giving `prefix:<subject part>:<digest>`.
    pub fn generate(
        &self,
        subject: &Value,
        context: Option<&Value>,
        preferences: Option<&Value>,
    ) -> String {
        let context = context.filter(|v| !v.is_null());
        let preferences = preferences.filter(|v| !v.is_null());

        let structured = is_structured(subject)
            || context.is_some_and(is_structured)
            || preferences.is_some_and(is_structured);
        let subject_part = self.subject_part(subject);

        if structured {
            let slots = format!(
                "[{},{}]",
                context.map_or_else(|| "null".to_string(), canonical_json),
                preferences.map_or_else(|| "null".to_string(), canonical_json),
            );
            return format!("{}:{}:{}", self.prefix, subject_part, digest_hex(&slots));
        }

        let mut key = format!("{}:{}", self.prefix, subject_part);
        if context.is_some() || preferences.is_some() {
            key.push(':');
            if let Some(value) = context {
                key.push_str(&escape_segment(&canonical_json(value)));
            }
        }
        if let Some(value) = preferences {
            key.push(':');
            key.push_str(&escape_segment(&canonical_json(value)));
        }
        key
    }

    /// Convenience wrapper for a text subject.
    pub fn generate_text(
        &self,
        subject: &str,
        context: Option<&Value>,
        preferences: Option<&Value>,
    ) -> String {
        self.generate(&Value::String(subject.to_string()), context, preferences)
    }

    /// Generates a key from any serializable subject, such as a request struct.
    pub fn generate_json<T: Serialize + ?Sized>(
        &self,
        subject: &T,
        context: Option<&Value>,
        preferences: Option<&Value>,
    ) -> Result<String> {
        let subject = serde_json::to_value(subject)?;
        Ok(self.generate(&subject, context, preferences))
    }

    /// Anchored regex matching every key derived from `subject`.
    pub fn subject_pattern(&self, subject: &Value) -> String {
        format!(
            "^{}:{}(:|$)",
            regex::escape(&self.prefix),
            regex::escape(&self.subject_part(subject))
        )
    }

    /// Normalized text for string subjects, a tagged digest for anything else.
    fn subject_part(&self, subject: &Value) -> String {
        match subject {
            Value::String(s) => escape_segment(&normalize_subject(s)),
            other => format!("{}{}", DIGEST_TAG, digest_hex(&canonical_json(other))),
        }
    }
}

impl Default for CacheKeyGenerator {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_KEY_PREFIX)
    }
}

fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn normalize_subject(subject: &str) -> String {
    subject.trim().to_lowercase()
}

fn escape_segment(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            ':' => escaped.push_str("%3A"),
            '#' => escaped.push_str("%23"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn digest_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let hex = format!("{:x}", hasher.finalize());
    hex[..DIGEST_LEN].to_string()
}

/// Serializes with object keys sorted at every depth.
pub fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let fields: Vec<String> = keys
                .into_iter()
                .map(|k| format!("{}:{}", Value::String(k.clone()), canonical_json(&map[k])))
                .collect();
            format!("{{{}}}", fields.join(","))
        }
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        scalar => scalar.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn generator() -> CacheKeyGenerator {
        CacheKeyGenerator::new("pairing_cache")
    }

    #[test]
    fn test_plain_string_composes_directly() {
        let key = generator().generate_text("  Beef Wellington ", None, None);
        assert_eq!(key, "pairing_cache:beef wellington");

        let key = generator().generate_text("salmon", Some(&json!("dinner")), Some(&json!(3)));
        assert_eq!(key, r#"pairing_cache:salmon:"dinner":3"#);
    }

    #[test]
    fn test_string_key_stability() {
        let g = generator();
        assert_eq!(g.generate_text("risotto", None, None), g.generate_text("risotto", None, None));
        assert_ne!(g.generate_text("risotto", None, None), g.generate_text("paella", None, None));
    }

    #[test]
    fn test_structured_key_stability() {
        let g = generator();
        let context = json!({"occasion": "dinner", "guests": 4});
        let reordered = json!({"guests": 4, "occasion": "dinner"});
        let prefs = json!({"budget": {"max": 40, "min": 10}, "styles": ["red", "dry"]});

        let a = g.generate_text("lamb", Some(&context), Some(&prefs));
        let b = g.generate_text("lamb", Some(&reordered), Some(&prefs));
        assert_eq!(a, b);
        assert!(a.starts_with("pairing_cache:lamb:"));
        assert_eq!(a.len(), "pairing_cache:lamb:".len() + DIGEST_LEN);

        let other_prefs = json!({"budget": {"max": 50, "min": 10}, "styles": ["red", "dry"]});
        assert_ne!(a, g.generate_text("lamb", Some(&context), Some(&other_prefs)));
        assert_ne!(a, g.generate_text("duck", Some(&context), Some(&prefs)));
    }

    #[test]
    fn test_context_and_preferences_positions_matter() {
        let g = generator();
        let x = json!({"a": 1});
        let y = json!({"b": 2});
        assert_ne!(
            g.generate_text("fish", Some(&x), Some(&y)),
            g.generate_text("fish", Some(&y), Some(&x))
        );
    }

    #[test]
    fn test_context_and_preferences_slots_are_positional() {
        let g = generator();
        let budget = json!({"budget": 30});
        assert_ne!(
            g.generate_text("fish", Some(&budget), None),
            g.generate_text("fish", None, Some(&budget))
        );

        assert_eq!(g.generate_text("fish", Some(&json!(3)), None), "pairing_cache:fish:3");
        assert_eq!(g.generate_text("fish", None, Some(&json!(3))), "pairing_cache:fish::3");
    }

    #[test]
    fn test_null_auxiliaries_count_as_absent() {
        let g = generator();
        assert_eq!(
            g.generate_text("fish", Some(&Value::Null), None),
            g.generate_text("fish", None, None)
        );
        assert_eq!(
            g.generate_text("fish", Some(&json!({"a": 1})), Some(&Value::Null)),
            g.generate_text("fish", Some(&json!({"a": 1})), None)
        );
    }

    #[test]
    fn test_separator_in_text_is_escaped() {
        let g = generator();
        let with_colon = g.generate_text("salmon:1", None, None);
        assert_eq!(with_colon, "pairing_cache:salmon%3A1");
        assert_ne!(with_colon, g.generate_text("salmon", Some(&json!(1)), None));

        let aux = g.generate_text("salmon", Some(&json!("a:b")), None);
        assert_eq!(aux, r#"pairing_cache:salmon:"a%3Ab""#);
        assert_eq!(g.generate_text("50%", None, None), "pairing_cache:50%25");
    }

    #[test]
    fn test_scalar_subject_differs_from_its_text() {
        let g = generator();
        let number = g.generate(&json!(5), None, None);
        assert_ne!(number, g.generate_text("5", None, None));
        assert!(number.starts_with("pairing_cache:#"));
        assert_ne!(g.generate(&json!(true), None, None), g.generate_text("true", None, None));

        // A literal '#' in text never reads as a digest tag
        assert_eq!(g.generate_text("#5", None, None), "pairing_cache:%235");
    }

    #[test]
    fn test_generate_json_matches_value_subject() {
        #[derive(Serialize)]
        struct PairingRequest<'a> {
            dish: &'a str,
            guests: u32,
        }

        let g = generator();
        let key = g
            .generate_json(&PairingRequest { dish: "tagine", guests: 2 }, None, None)
            .unwrap();
        assert_eq!(key, g.generate(&json!({"guests": 2, "dish": "tagine"}), None, None));
    }

    #[test]
    fn test_structured_subject_is_hashed() {
        let g = generator();
        let subject = json!({"dish": "tagine", "spice": "high"});
        let key = g.generate(&subject, None, None);
        assert!(!key.contains("tagine"));
        assert_eq!(key, g.generate(&json!({"spice": "high", "dish": "tagine"}), None, None));
    }

    #[test]
    fn test_subject_pattern_matches_derived_keys_only() {
        let g = generator();
        let pattern = regex::Regex::new(&g.subject_pattern(&json!("Salmon"))).unwrap();

        assert!(pattern.is_match(&g.generate_text("salmon", None, None)));
        assert!(pattern.is_match(&g.generate_text("salmon", Some(&json!({"x": 1})), None)));
        assert!(!pattern.is_match(&g.generate_text("salmon tartare", None, None)));
        assert!(!pattern.is_match("other_cache:salmon"));
    }

    #[test]
    fn test_subject_pattern_stops_at_escaped_separator() {
        let g = generator();
        let pattern = regex::Regex::new(&g.subject_pattern(&json!("salmon"))).unwrap();

        assert!(!pattern.is_match(&g.generate_text("salmon:smoked", None, None)));
        assert!(!pattern.is_match(&g.generate_text(
            "salmon:smoked",
            Some(&json!({"x": 1})),
            None
        )));
        assert!(pattern.is_match(&g.generate_text("salmon", Some(&json!("smoked")), None)));
    }

    #[test]
    fn test_canonical_json_sorts_nested_keys() {
        let value = json!({"b": [{"d": 1, "c": 2}], "a": null});
        assert_eq!(canonical_json(&value), r#"{"a":null,"b":[{"c":2,"d":1}]}"#);
    }
}
