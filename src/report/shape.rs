use crate::utils::truncate;
use serde_json::Value;
use std::fmt;

const OPAQUE_PREVIEW_CHARS: usize = 100;

/// Coarse shape of a response body, used for the condensed summary line
#[derive(Debug, Clone, PartialEq)]
pub enum BodyShape {
    /// Top-level JSON array
    List { len: usize },
    /// Spring-style page: `totalElements`, usually with a `content` array
    Page { items: Option<usize>, total: Value },
    /// Any other JSON object
    Object { keys: Vec<String> },
    /// Scalars and non-JSON text, already truncated
    Opaque(String),
}

impl BodyShape {
    pub fn of_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::of_value(&value),
            Err(_) => BodyShape::Opaque(truncate(text, OPAQUE_PREVIEW_CHARS)),
        }
    }

    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => BodyShape::List { len: items.len() },
            Value::Object(map) => match map.get("totalElements") {
                Some(total) => BodyShape::Page {
                    items: map.get("content").and_then(Value::as_array).map(Vec::len),
                    total: total.clone(),
                },
                None => BodyShape::Object {
                    keys: map.keys().cloned().collect(),
                },
            },
            Value::String(s) => BodyShape::Opaque(truncate(s, OPAQUE_PREVIEW_CHARS)),
            other => BodyShape::Opaque(truncate(&other.to_string(), OPAQUE_PREVIEW_CHARS)),
        }
    }
}

impl fmt::Display for BodyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyShape::List { len } => write!(f, "Returned {} items", len),
            BodyShape::Page {
                items: Some(items),
                total,
            } => write!(f, "Returned page with {} items, total: {}", items, total),
            BodyShape::Page { items: None, total } => write!(f, "Total elements: {}", total),
            BodyShape::Object { keys } => write!(f, "Response keys: [{}]", keys.join(", ")),
            BodyShape::Opaque(preview) => write!(f, "Response: {}", preview),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_and_page_shapes() {
        assert_eq!(BodyShape::of_text("[1,2,3]"), BodyShape::List { len: 3 });

        let page = json!({"content": [{"id": 1}, {"id": 2}], "totalElements": 42});
        let shape = BodyShape::of_value(&page);
        assert_eq!(shape.to_string(), "Returned page with 2 items, total: 42");

        let counted = json!({"totalElements": 7});
        assert_eq!(BodyShape::of_value(&counted).to_string(), "Total elements: 7");
    }

    #[test]
    fn test_object_keys_and_opaque_fallback() {
        let shape = BodyShape::of_text(r#"{"id": 1, "username": "bob"}"#);
        assert_eq!(shape.to_string(), "Response keys: [id, username]");

        let shape = BodyShape::of_text("API is running");
        assert_eq!(shape, BodyShape::Opaque("API is running".to_string()));

        let long = "x".repeat(150);
        match BodyShape::of_text(&long) {
            BodyShape::Opaque(preview) => assert_eq!(preview.len(), 103),
            other => panic!("unexpected shape: {:?}", other),
        }
    }
}
