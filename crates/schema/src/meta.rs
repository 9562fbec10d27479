use serde::{Deserialize, Serialize};

/// Descriptive metadata shared by sections, groups, and fields.
///
/// This is the admin-facing information: identifiers, labels, ordering.
/// It is separate from a field's type and value semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementMeta {
    /// Identifier of this element within its parent, one route segment.
    pub id: String,

    /// Human-readable display label.
    pub label: String,

    /// Longer explanation shown under the element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Position among siblings; lower sorts first.
    #[serde(default)]
    pub sort_order: i32,

    /// Whether the element renders in the admin tree. Absent means visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl ElementMeta {
    /// Create metadata with the required id and display label.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Effective visibility; hidden only when explicitly set.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_id_and_label() {
        let meta = ElementMeta::new("base_url", "Base URL");
        assert_eq!(meta.id, "base_url");
        assert_eq!(meta.label, "Base URL");
        assert_eq!(meta.sort_order, 0);
        assert!(meta.comment.is_none());
        assert!(meta.is_visible());
    }

    #[test]
    fn visibility_defaults_to_visible() {
        let mut meta = ElementMeta::new("x", "X");
        assert!(meta.is_visible());

        meta.visible = Some(false);
        assert!(!meta.is_visible());

        meta.visible = Some(true);
        assert!(meta.is_visible());
    }

    #[test]
    fn optional_fields_omitted_from_json() {
        let meta = ElementMeta::new("name", "Name");
        let json = serde_json::to_string(&meta).unwrap();
        assert!(!json.contains("comment"));
        assert!(!json.contains("visible"));
    }

    #[test]
    fn serde_round_trip_full() {
        let meta = ElementMeta {
            id: "lifetime".into(),
            label: "Session Lifetime".into(),
            comment: Some("Seconds until an idle session expires.".into()),
            sort_order: 40,
            visible: Some(false),
        };

        let json = serde_json::to_string(&meta).unwrap();
        let deserialized: ElementMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, meta);
    }
}
