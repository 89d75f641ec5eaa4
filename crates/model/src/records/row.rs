use crate::{
    core::value::{FieldValue, Value},
    error::ModelError,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowData {
    pub entity: String,
    pub field_values: Vec<FieldValue>,
}

impl RowData {
    pub fn new(entity: &str, field_values: Vec<FieldValue>) -> Self {
        RowData {
            entity: entity.to_string(),
            field_values,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(field))
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .and_then(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .field_values
            .iter()
            .map(|f| {
                let value = f
                    .value
                    .as_ref()
                    .map(Value::to_json)
                    .unwrap_or(serde_json::Value::Null);
                (f.name.clone(), value)
            })
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }

    /// Materializes the row into a typed record through its serde impl.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ModelError> {
        serde_json::from_value(self.to_json()).map_err(|source| ModelError::Decode {
            entity: self.entity.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Post {
        id: i64,
        title: String,
        #[serde(default)]
        content: Option<String>,
    }

    fn field(name: &str, value: Option<Value>) -> FieldValue {
        FieldValue {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_decode_into_record() {
        let row = RowData::new(
            "posts",
            vec![
                field("id", Some(Value::Int(3))),
                field("title", Some(Value::from("hello"))),
                field("content", None),
            ],
        );

        let post: Post = row.decode().unwrap();
        assert_eq!(
            post,
            Post {
                id: 3,
                title: "hello".into(),
                content: None
            }
        );
    }

    #[test]
    fn test_decode_reports_entity() {
        let row = RowData::new("posts", vec![field("id", Some(Value::from("x")))]);
        let err = row.decode::<Post>().unwrap_err();
        assert!(err.to_string().contains("posts"));
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let row = RowData::new("posts", vec![field("Title", Some(Value::from("a")))]);
        assert_eq!(row.get_value("title"), Value::from("a"));
        assert_eq!(row.get_value("missing"), Value::Null);
    }
}
