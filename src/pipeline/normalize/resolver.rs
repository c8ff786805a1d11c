//! Field resolution for the semantic fields shared by every category.

use serde_json::Value;

use super::schema::FieldAliases;
use crate::types::RawRecord;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const MAX_NAME_CHARS: usize = 200;
pub const DATE_CHARS: usize = 10;
/// Sources encode "year unknown" as zero.
pub const YEAR_SENTINEL: &str = "0";

const COORDINATE_DECIMALS: usize = 6;

/// A value counts as present unless it is null or an empty string.
pub(crate) fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Textual form of a scalar. Arrays and objects have none.
pub(crate) fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Coordinates additionally treat numeric zero and `false` as absent, so a
/// zero primary alias falls through to the fallback. The string `"0"` is present.
fn is_coordinate_present(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
        Value::Bool(b) => *b,
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        other => is_present(other),
    }
}

fn first_coordinate<'a>(record: &'a RawRecord, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| record.get(*alias))
        .find(|value| is_coordinate_present(value))
}

fn coerce_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Round to six decimal places from the exact binary value, so ties resolve
/// the way correctly rounded decimal formatting does.
pub fn round_coordinate(value: f64) -> f64 {
    format!("{:.*}", COORDINATE_DECIMALS, value)
        .parse()
        .unwrap_or(value)
}

/// Resolve `(latitude, longitude)`.
///
/// Both axes must resolve and coerce; if either fails the record has no
/// coordinates at all.
pub fn resolve_coordinates(record: &RawRecord, aliases: &FieldAliases) -> Option<(f64, f64)> {
    let latitude = first_coordinate(record, aliases.latitude).and_then(coerce_f64)?;
    let longitude = first_coordinate(record, aliases.longitude).and_then(coerce_f64)?;
    Some((round_coordinate(latitude), round_coordinate(longitude)))
}

/// Explicit date first, then `<year>-01-01`, cut to `YYYY-MM-DD` length.
pub fn resolve_date(record: &RawRecord, aliases: &FieldAliases) -> Option<String> {
    let explicit = record
        .get(aliases.date)
        .filter(|v| is_present(v))
        .and_then(text_of);

    let date = explicit.or_else(|| {
        let year = record
            .get(aliases.year)
            .filter(|v| is_present(v))
            .and_then(text_of)?;
        (year != YEAR_SENTINEL).then(|| format!("{year}-01-01"))
    })?;

    Some(truncate_chars(&date, DATE_CHARS))
}

pub fn resolve_name(record: &RawRecord, aliases: &FieldAliases) -> String {
    aliases
        .name
        .iter()
        .filter_map(|alias| record.get(*alias))
        .filter(|value| is_present(value))
        .find_map(text_of)
        .map(|name| truncate_chars(&name, MAX_NAME_CHARS))
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::normalize::schema::COMMON_ALIASES;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn test_coordinates_prefer_primary_alias() {
        let record = raw(json!({"latitude": 10.0, "lat": 20.0, "longitude": 30.0, "lon": 40.0}));
        assert_eq!(resolve_coordinates(&record, &COMMON_ALIASES), Some((10.0, 30.0)));
    }

    #[test]
    fn test_coordinates_fall_back_to_short_alias() {
        let record = raw(json!({"lat": "61.2181", "lon": "-149.9003"}));
        assert_eq!(
            resolve_coordinates(&record, &COMMON_ALIASES),
            Some((61.2181, -149.9003))
        );
    }

    #[test]
    fn test_empty_primary_alias_falls_back() {
        let record = raw(json!({"latitude": "", "lat": 5.5, "longitude": null, "lon": 6.5}));
        assert_eq!(resolve_coordinates(&record, &COMMON_ALIASES), Some((5.5, 6.5)));
    }

    #[test]
    fn test_partial_coordinates_resolve_to_none() {
        let only_lat = raw(json!({"latitude": 12.5}));
        assert_eq!(resolve_coordinates(&only_lat, &COMMON_ALIASES), None);

        let bad_lon = raw(json!({"latitude": 12.5, "longitude": "west-ish"}));
        assert_eq!(resolve_coordinates(&bad_lon, &COMMON_ALIASES), None);
    }

    #[test]
    fn test_non_numeric_types_do_not_coerce() {
        let record = raw(json!({"latitude": true, "longitude": [1, 2]}));
        assert_eq!(resolve_coordinates(&record, &COMMON_ALIASES), None);

        let nan = raw(json!({"latitude": "NaN", "longitude": "1.0"}));
        assert_eq!(resolve_coordinates(&nan, &COMMON_ALIASES), None);
    }

    #[test]
    fn test_coordinates_round_to_six_places() {
        let record = raw(json!({"latitude": 37.123456789, "longitude": " -122.9876544 "}));
        let (lat, lon) = resolve_coordinates(&record, &COMMON_ALIASES).unwrap();
        assert_eq!(lat, 37.123457);
        assert_eq!(lon, -122.987654);
        assert!((lat - 37.123456789).abs() < 1e-6);
    }

    #[test]
    fn test_rounding_ties_follow_exact_binary_value() {
        assert_eq!(round_coordinate(-122.4194445), -122.419444);
        assert_eq!(round_coordinate(-0.0000001), 0.0);
        assert_eq!(round_coordinate(45.0), 45.0);
    }

    #[test]
    fn test_numeric_zero_coordinate_is_absent() {
        let zero_lat = raw(json!({"latitude": 0, "longitude": -80.5}));
        assert_eq!(resolve_coordinates(&zero_lat, &COMMON_ALIASES), None);

        let zero_float = raw(json!({"latitude": 25.0, "longitude": 0.0}));
        assert_eq!(resolve_coordinates(&zero_float, &COMMON_ALIASES), None);
    }

    #[test]
    fn test_numeric_zero_falls_back_to_short_alias() {
        let record = raw(json!({"latitude": 0, "lat": 12.0, "longitude": -80.5}));
        assert_eq!(
            resolve_coordinates(&record, &COMMON_ALIASES),
            Some((12.0, -80.5))
        );
    }

    #[test]
    fn test_string_zero_coordinate_is_kept() {
        let record = raw(json!({"latitude": "0", "longitude": "-80.5"}));
        assert_eq!(resolve_coordinates(&record, &COMMON_ALIASES), Some((0.0, -80.5)));
    }

    #[test]
    fn test_out_of_range_coordinates_pass_through() {
        let record = raw(json!({"latitude": 95.0, "longitude": 200.0}));
        assert_eq!(resolve_coordinates(&record, &COMMON_ALIASES), Some((95.0, 200.0)));
    }

    #[test]
    fn test_explicit_date_is_truncated() {
        let record = raw(json!({"date": "2005-08-29T11:10:00Z", "year": "1999"}));
        assert_eq!(
            resolve_date(&record, &COMMON_ALIASES).as_deref(),
            Some("2005-08-29")
        );
    }

    #[test]
    fn test_year_synthesizes_date() {
        let record = raw(json!({"year": "1950"}));
        assert_eq!(resolve_date(&record, &COMMON_ALIASES).as_deref(), Some("1950-01-01"));

        let numeric = raw(json!({"date": "", "year": 1906}));
        assert_eq!(resolve_date(&numeric, &COMMON_ALIASES).as_deref(), Some("1906-01-01"));
    }

    #[test]
    fn test_year_sentinel_yields_no_date() {
        assert_eq!(resolve_date(&raw(json!({"year": "0"})), &COMMON_ALIASES), None);
        assert_eq!(resolve_date(&raw(json!({"year": 0})), &COMMON_ALIASES), None);
        assert_eq!(resolve_date(&raw(json!({})), &COMMON_ALIASES), None);
    }

    #[test]
    fn test_name_priority_and_default() {
        let record = raw(json!({"name": "", "title": "Halloween Nor'easter", "location": "Gloucester"}));
        assert_eq!(resolve_name(&record, &COMMON_ALIASES), "Halloween Nor'easter");

        let location_only = raw(json!({"location": "ANCHORAGE, AK"}));
        assert_eq!(resolve_name(&location_only, &COMMON_ALIASES), "ANCHORAGE, AK");

        let nothing = raw(json!({"name": "", "title": null}));
        assert_eq!(resolve_name(&nothing, &COMMON_ALIASES), UNKNOWN_NAME);
    }

    #[test]
    fn test_name_is_truncated_by_characters() {
        let long = "é".repeat(MAX_NAME_CHARS + 25);
        let record = raw(json!({ "name": long }));
        let name = resolve_name(&record, &COMMON_ALIASES);
        assert_eq!(name.chars().count(), MAX_NAME_CHARS);
    }
}
