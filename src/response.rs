use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, ZaimError};

/// Parsed body of a successful Zaim API response.
///
/// The client never interprets domain fields; call sites narrow the body
/// with [`Response::record`] or [`Response::list`] according to the shape
/// the endpoint is documented to return.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    body: Value,
}

impl Response {
    pub fn new(body: Value) -> Self {
        Response { body }
    }

    /// Get the raw JSON body
    pub fn raw(&self) -> &Value {
        &self.body
    }

    pub fn into_raw(self) -> Value {
        self.body
    }

    /// True when the body is an object with no fields
    pub fn is_empty(&self) -> bool {
        self.body.as_object().is_some_and(|map| map.is_empty())
    }

    /// Get a value by a slash-separated path.
    /// For example, "money/0/amount" reads the amount of the first record.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.body;

        for part in path.split('/').filter(|s| !s.is_empty()) {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        Some(current)
    }

    /// Get a string value by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    /// Deserialize the single record stored under `field`.
    ///
    /// # Errors
    /// `UnexpectedShape` if `field` is absent or not an object.
    pub fn record<T: DeserializeOwned>(&self, field: &str) -> Result<T> {
        match self.body.get(field) {
            Some(value @ Value::Object(_)) => Ok(serde_json::from_value(value.clone())?),
            _ => Err(ZaimError::unexpected_shape(field, "an object")),
        }
    }

    /// Deserialize the list stored under `field`.
    ///
    /// # Errors
    /// `UnexpectedShape` if `field` is absent or not an array.
    pub fn list<T: DeserializeOwned>(&self, field: &str) -> Result<Vec<T>> {
        match self.body.get(field) {
            Some(value @ Value::Array(_)) => Ok(serde_json::from_value(value.clone())?),
            _ => Err(ZaimError::unexpected_shape(field, "an array")),
        }
    }
}

impl From<Value> for Response {
    fn from(body: Value) -> Self {
        Response::new(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Item {
        id: i64,
        name: String,
    }

    #[test]
    fn test_response_get() {
        let response = Response::new(json!({"money": [{"id": 1, "place": "cafe"}]}));

        assert_eq!(response.get_string("money/0/place"), Some("cafe".to_string()));
        assert_eq!(response.get("money/0/id"), Some(&json!(1)));
        assert_eq!(response.get("money/5"), None);
        assert_eq!(response.get("money/x"), None);
    }

    #[test]
    fn test_record() {
        let response = Response::new(json!({"me": {"id": 7, "name": "taro"}}));
        let item: Item = response.record("me").unwrap();

        assert_eq!(item.id, 7);
        assert_eq!(item.name, "taro");
    }

    #[test]
    fn test_record_missing_field() {
        let response = Response::new(json!({"user": {"id": 7, "name": "taro"}}));
        let err = response.record::<Item>("me").unwrap_err();

        assert!(matches!(err, ZaimError::UnexpectedShape { ref field, .. } if field == "me"));
    }

    #[test]
    fn test_list_rejects_object() {
        let response = Response::new(json!({"genres": {"id": 1, "name": "food"}}));
        let err = response.list::<Item>("genres").unwrap_err();

        assert!(matches!(err, ZaimError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_list_bad_item_is_json_error() {
        let response = Response::new(json!({"genres": [{"id": "one"}]}));
        let err = response.list::<Item>("genres").unwrap_err();

        assert!(matches!(err, ZaimError::Json(_)));
    }

    #[test]
    fn test_empty_body() {
        assert!(Response::new(json!({})).is_empty());
        assert!(!Response::new(json!({"me": {}})).is_empty());
    }
}
