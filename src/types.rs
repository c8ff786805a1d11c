use serde::{Deserialize, Serialize};
use std::fmt;

/// A source-native record as read from disk: field name to arbitrary JSON value.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// The closed set of disaster categories.
///
/// Variants are declared alphabetically so that the derived `Ord` matches the
/// alphabetical order used for category tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AviationAccident,
    Earthquake,
    Shipwreck,
    Storm,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::AviationAccident,
        Category::Earthquake,
        Category::Shipwreck,
        Category::Storm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AviationAccident => "aviation_accident",
            Category::Earthquake => "earthquake",
            Category::Shipwreck => "shipwreck",
            Category::Storm => "storm",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized disaster event in the merged dataset.
///
/// `details` holds the category-specific fields in table order. Fields owned
/// by the category are always present (as `null` when the source lacks them);
/// fields owned by other categories never appear.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnifiedRecord {
    pub category: Category,
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub date: Option<String>,
    pub subcategory: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl UnifiedRecord {
    /// Look up a category-specific field. `None` means the field is not part
    /// of this record's category; `Some(Value::Null)` means the source lacked it.
    pub fn detail(&self, field: &str) -> Option<&serde_json::Value> {
        self.details.get(field)
    }
}
