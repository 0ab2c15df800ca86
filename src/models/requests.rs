//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store (any JSON value)
/// - `ttl`: TTL in seconds
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: serde_json::Value,
    /// TTL in seconds
    pub ttl: u64,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}

/// Request body for reconfiguring the memory budget (PUT /config/max-memory)
#[derive(Debug, Clone, Deserialize)]
pub struct MaxMemoryRequest {
    /// Size spec like "10MB"
    pub max_memory: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_request_deserialize() {
        let json = r#"{"key": "test", "value": "hello", "ttl": 60}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.key, "test");
        assert_eq!(req.value, json!("hello"));
        assert_eq!(req.ttl, 60);
    }

    #[test]
    fn test_set_request_structured_value() {
        let json = r#"{"key": "test", "value": {"a": [1, 2]}, "ttl": 5}"#;
        let req: SetRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.value, json!({"a": [1, 2]}));
    }

    #[test]
    fn test_set_request_missing_ttl() {
        let json = r#"{"key": "test", "value": "hello"}"#;
        let result: Result<SetRequest, _> = serde_json::from_str(json);
        assert!(result.is_err(), "ttl is required");
    }

    #[test]
    fn test_validate_empty_key() {
        let req = SetRequest {
            key: "".to_string(),
            value: json!("test"),
            ttl: 60,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = SetRequest {
            key: "valid_key".to_string(),
            value: json!("test"),
            ttl: 60,
        };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_max_memory_request_deserialize() {
        let json = r#"{"max_memory": "10MB"}"#;
        let req: MaxMemoryRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.max_memory, "10MB");
    }
}
