use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One ranked search result as shown in the dropdown.
///
/// `id`, `result_type`, `label` and `type_title` are the fields the widget
/// relies on; everything else the server sent (coordinates, BBL, ...) is
/// kept untouched in `extra` so hosts can use it for map highlighting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Zero-based position in display order
    pub id: usize,
    /// Server-assigned result type (e.g. `lot`, `zma`)
    #[serde(rename = "type", default)]
    pub result_type: String,
    /// Text shown in the row and copied into the input on selection
    #[serde(default)]
    pub label: String,
    /// Display title derived from the type lookup
    #[serde(rename = "typeTitle")]
    pub type_title: String,
    /// Remaining server fields, passed through
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SearchResult {
    /// Look up a passthrough server field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}
