use serde::{Deserialize, Serialize};

use crate::record::Record;

// ============ Pagination ============

/// Query parameters for list operations: page-based pagination plus an
/// optional search term.
///
/// Pages are 1-indexed.
///
/// # Default
///
/// The default is `page = 1, page_size = 10`, with no search term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of records per page.
    pub page_size: u32,
    /// Optional search term matched against record fields by the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            search: None,
        }
    }
}

impl ListQuery {
    /// Clamp pagination values to valid ranges.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `page_size` is clamped to `1..=max_page_size`
    /// - `search` is preserved as-is
    #[must_use]
    pub fn validated(&self, max_page_size: u32) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, max_page_size),
            search: self.search.clone(),
        }
    }
}

/// One page of records returned by a list operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    /// Records in the current page.
    pub records: Vec<Record>,
    /// Current page number.
    pub page: u32,
    /// Page size used for this request.
    pub page_size: u32,
    /// Total number of pages (always at least 1, even for an empty result).
    pub total_pages: u32,
}

impl RecordPage {
    /// Create a page, deriving [`total_pages`](Self::total_pages) from a
    /// total record count: `ceil(total_count / page_size)`, minimum 1.
    pub fn from_total_count(
        records: Vec<Record>,
        page: u32,
        page_size: u32,
        total_count: u32,
    ) -> Self {
        let total_pages = if page_size == 0 {
            1
        } else {
            total_count.div_ceil(page_size).max(1)
        };
        Self {
            records,
            page,
            page_size,
            total_pages,
        }
    }
}

// ============ Entity Types ============

/// Identifies which business resource a client or record belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Deal pipeline entries.
    Deal,
    /// Uploaded documents.
    Document,
    /// Prospecting leads.
    Prospect,
}

impl EntityKind {
    /// All entity kinds, in dashboard display order.
    pub const ALL: [Self; 3] = [Self::Deal, Self::Document, Self::Prospect];

    /// Static descriptor for this entity kind.
    #[must_use]
    pub fn descriptor(self) -> EntityDescriptor {
        match self {
            Self::Deal => EntityDescriptor {
                kind: self,
                path: "deals",
                title: "Deals",
                fields: vec![
                    FieldSpec::new("name", "Name", "Deal name"),
                    FieldSpec::new("type", "Type", "e.g. Merger"),
                    FieldSpec::new("status", "Status", "e.g. Open"),
                    FieldSpec::new("value", "Value", "e.g. $10M"),
                ],
                supports_upload: false,
            },
            Self::Document => EntityDescriptor {
                kind: self,
                path: "documents",
                title: "Documents",
                fields: vec![
                    FieldSpec::new("name", "Name", "File name"),
                    FieldSpec::new("category", "Category", "e.g. Contract"),
                    FieldSpec::new("size", "Size", "e.g. 1.2 MB"),
                    FieldSpec::new("uploaded", "Uploaded", "e.g. 2026-01-15"),
                ],
                supports_upload: true,
            },
            Self::Prospect => EntityDescriptor {
                kind: self,
                path: "prospects",
                title: "Prospecting",
                fields: vec![
                    FieldSpec::new("name", "Name", "Contact name"),
                    FieldSpec::new("company", "Company", "Company name"),
                    FieldSpec::new("email", "Email", "name@company.com"),
                    FieldSpec::new("status", "Status", "e.g. Contacted"),
                ],
                supports_upload: false,
            },
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deal => write!(f, "deal"),
            Self::Document => write!(f, "document"),
            Self::Prospect => write!(f, "prospect"),
        }
    }
}

/// Definition of a single record field, used to build forms and to
/// validate submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Machine-readable field key (e.g. `"name"`).
    pub key: &'static str,
    /// Human-readable label (e.g. `"Name"`).
    pub label: &'static str,
    /// Placeholder text for empty inputs.
    pub placeholder: &'static str,
}

impl FieldSpec {
    const fn new(key: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            key,
            label,
            placeholder,
        }
    }
}

/// Static metadata describing one entity kind: its REST path segment,
/// display title, declared field list, and whether it accepts file uploads.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    /// Entity kind identifier.
    pub kind: EntityKind,
    /// REST path segment (e.g. `"deals"` for `/api/deals`).
    pub path: &'static str,
    /// Human-readable page title.
    pub title: &'static str,
    /// Declared fields, in form and column order.
    pub fields: Vec<FieldSpec>,
    /// Whether this entity accepts multipart file uploads (documents only).
    pub supports_upload: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ ListQuery::validated ============

    #[test]
    fn list_query_validated_clamps_page_zero() {
        let q = ListQuery {
            page: 0,
            page_size: 10,
            search: None,
        };
        let v = q.validated(100);
        assert_eq!(v.page, 1);
        assert_eq!(v.page_size, 10);
    }

    #[test]
    fn list_query_validated_clamps_page_size() {
        let q = ListQuery {
            page: 1,
            page_size: 9999,
            search: Some("acme".to_string()),
        };
        let v = q.validated(100);
        assert_eq!(v.page_size, 100);
        assert_eq!(v.search.as_deref(), Some("acme"));
    }

    #[test]
    fn list_query_validated_clamps_page_size_zero() {
        let q = ListQuery {
            page: 1,
            page_size: 0,
            search: None,
        };
        assert_eq!(q.validated(100).page_size, 1);
    }

    // ============ RecordPage total_pages derivation ============

    #[test]
    fn record_page_25_records_page_size_10() {
        let p = RecordPage::from_total_count(vec![], 1, 10, 25);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn record_page_exact_multiple() {
        let p = RecordPage::from_total_count(vec![], 2, 10, 30);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn record_page_empty_has_one_page() {
        let p = RecordPage::from_total_count(vec![], 1, 10, 0);
        assert_eq!(p.total_pages, 1);
    }

    // ============ EntityKind descriptors ============

    #[test]
    fn deal_descriptor_field_order() {
        let d = EntityKind::Deal.descriptor();
        let keys: Vec<&str> = d.fields.iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["name", "type", "status", "value"]);
        assert!(!d.supports_upload);
    }

    #[test]
    fn only_documents_support_upload() {
        for kind in EntityKind::ALL {
            let d = kind.descriptor();
            assert_eq!(d.supports_upload, kind == EntityKind::Document);
        }
    }

    #[test]
    fn entity_kind_serializes_lowercase() {
        let json = serde_json::to_string(&EntityKind::Prospect).unwrap_or_default();
        assert_eq!(json, "\"prospect\"");
    }
}
