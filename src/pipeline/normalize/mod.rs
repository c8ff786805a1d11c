//! Category normalization: one raw record in, one unified record (or nothing) out.

pub mod resolver;
pub mod schema;

use serde_json::Value;

use crate::types::{Category, RawRecord, UnifiedRecord};
use resolver::{is_present, resolve_coordinates, resolve_date, resolve_name, text_of};
use schema::{schema_for, CategorySchema, FieldSource, SubcategoryRule};

/// Normalize a raw record for `category`.
///
/// Returns `None` when the record has no usable coordinates; that is the only
/// reason a record is dropped.
pub fn normalize_record(record: &RawRecord, category: Category) -> Option<UnifiedRecord> {
    normalize_with_schema(record, schema_for(category))
}

pub fn normalize_with_schema(record: &RawRecord, schema: &CategorySchema) -> Option<UnifiedRecord> {
    let (latitude, longitude) = resolve_coordinates(record, schema.aliases)?;

    let details = schema
        .fields
        .iter()
        .map(|rule| (rule.target.to_string(), extract_field(record, &rule.source)))
        .collect();

    Some(UnifiedRecord {
        category: schema.category,
        latitude,
        longitude,
        name: resolve_name(record, schema.aliases),
        date: resolve_date(record, schema.aliases),
        subcategory: resolve_subcategory(record, &schema.subcategory),
        details,
    })
}

fn resolve_subcategory(record: &RawRecord, rule: &SubcategoryRule) -> String {
    match rule {
        SubcategoryRule::Fixed(value) => (*value).to_string(),
        SubcategoryRule::FromField { field, default } => record
            .get(*field)
            .filter(|v| !v.is_null())
            .and_then(text_of)
            .unwrap_or_else(|| (*default).to_string()),
    }
}

fn extract_field(record: &RawRecord, source: &FieldSource) -> Value {
    match source {
        FieldSource::Verbatim(field) => record.get(*field).cloned().unwrap_or(Value::Null),
        FieldSource::Joined { parts, separator } => {
            let joined = parts
                .iter()
                .map(|part| {
                    record
                        .get(*part)
                        .filter(|v| is_present(v))
                        .and_then(text_of)
                        .unwrap_or_default()
                })
                .collect::<Vec<_>>()
                .join(*separator);
            Value::String(joined)
        }
    }
}
