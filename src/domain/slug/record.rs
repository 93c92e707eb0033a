use crate::domain::slug::value_objects::{FieldName, RecordId, Slug};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What the slug machinery needs from a record: its identity, read access to
/// the origin field and write access to the slug field.
pub trait SlugTarget {
    fn record_id(&self) -> Option<RecordId>;

    fn text_value(&self, field: &FieldName) -> Option<String>;

    fn assign(&mut self, field: &FieldName, slug: Slug);
}

/// A schema-less record stored by the bundled document stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Option<RecordId>,
    pub fields: Map<String, Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

impl SlugTarget for Document {
    fn record_id(&self) -> Option<RecordId> {
        self.id
    }

    fn text_value(&self, field: &FieldName) -> Option<String> {
        match self.fields.get(field.as_str())? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn assign(&mut self, field: &FieldName, slug: Slug) {
        self.fields
            .insert(field.as_str().to_string(), Value::String(slug.into()));
    }
}
