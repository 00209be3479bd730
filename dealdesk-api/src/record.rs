use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field values for a record that has not (or not yet) been assigned an
/// identifier: the payload of create and update calls.
pub type RecordFields = BTreeMap<String, String>;

/// A persisted business record: a non-empty identifier plus a flat map of
/// named string fields.
///
/// The field set is duck-typed on the wire; which fields are meaningful for
/// a given record is declared by its entity's
/// [`EntityDescriptor`](crate::EntityDescriptor). Unknown fields are
/// preserved round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Backend-assigned identifier. Never empty for a persisted record.
    pub id: String,

    /// When the record was created, if the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,

    /// When the record was last updated, if the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,

    /// Named string fields.
    #[serde(flatten)]
    pub fields: RecordFields,
}

impl Record {
    /// Create a record from an identifier and field pairs.
    pub fn new(
        id: impl Into<String>,
        fields: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            id: id.into(),
            created_at: None,
            updated_at: None,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a field value by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_lookup() {
        let r = Record::new("d1", [("name", "Acme"), ("status", "Open")]);
        assert_eq!(r.field("name"), Some("Acme"));
        assert_eq!(r.field("value"), None);
    }

    #[test]
    fn serde_flattens_fields() {
        let r = Record::new("d1", [("name", "Acme")]);
        let json_res = serde_json::to_string(&r);
        assert!(json_res.is_ok(), "serialize failed: {json_res:?}");
        let Ok(json) = json_res else {
            return;
        };
        assert!(json.contains("\"id\":\"d1\""));
        assert!(json.contains("\"name\":\"Acme\""));

        let back_res: serde_json::Result<Record> = serde_json::from_str(&json);
        assert!(back_res.is_ok(), "deserialize failed: {back_res:?}");
        let Ok(back) = back_res else {
            return;
        };
        assert_eq!(back, r);
    }

    #[test]
    fn deserialize_preserves_unknown_fields() {
        let json = r#"{"id":"p1","name":"Jane","region":"EMEA"}"#;
        let r: Record = serde_json::from_str(json).unwrap_or_else(|_| Record::new("x", [("", "")]));
        assert_eq!(r.id, "p1");
        assert_eq!(r.field("region"), Some("EMEA"));
    }
}
