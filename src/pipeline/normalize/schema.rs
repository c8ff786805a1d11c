//! Declarative field tables.
//!
//! Everything the normalizer needs to know about a category lives here as
//! static data: which raw keys feed the shared semantic fields and which
//! raw keys populate the category-specific extras. Adding a field to a
//! category is a table edit.

use crate::types::Category;

/// Ordered alias lists for the semantic fields every category shares.
#[derive(Debug)]
pub struct FieldAliases {
    pub latitude: &'static [&'static str],
    pub longitude: &'static [&'static str],
    pub date: &'static str,
    pub year: &'static str,
    pub name: &'static [&'static str],
}

pub const COMMON_ALIASES: FieldAliases = FieldAliases {
    latitude: &["latitude", "lat"],
    longitude: &["longitude", "lon"],
    date: "date",
    year: "year",
    name: &["name", "title", "location"],
};

/// How a record's `subcategory` is chosen.
#[derive(Debug)]
pub enum SubcategoryRule {
    Fixed(&'static str),
    /// Copy a raw field, falling back to `default` when it is absent or null.
    FromField {
        field: &'static str,
        default: &'static str,
    },
}

/// Where a category-specific output field comes from.
#[derive(Debug)]
pub enum FieldSource {
    /// Copy the raw value as-is, `null` when absent.
    Verbatim(&'static str),
    /// Join the textual form of several raw fields with `separator`; a missing
    /// part contributes an empty string.
    Joined {
        parts: &'static [&'static str],
        separator: &'static str,
    },
}

#[derive(Debug)]
pub struct FieldRule {
    pub target: &'static str,
    pub source: FieldSource,
}

#[derive(Debug)]
pub struct CategorySchema {
    pub category: Category,
    pub aliases: &'static FieldAliases,
    pub subcategory: SubcategoryRule,
    pub fields: &'static [FieldRule],
}

const AVIATION: CategorySchema = CategorySchema {
    category: Category::AviationAccident,
    aliases: &COMMON_ALIASES,
    subcategory: SubcategoryRule::Fixed("aviation"),
    fields: &[
        FieldRule {
            target: "aircraft_type",
            source: FieldSource::Joined {
                parts: &["aircraft_make", "aircraft_model"],
                separator: " ",
            },
        },
        FieldRule {
            target: "event_id",
            source: FieldSource::Verbatim("event_id"),
        },
    ],
};

const SHIPWRECK: CategorySchema = CategorySchema {
    category: Category::Shipwreck,
    aliases: &COMMON_ALIASES,
    subcategory: SubcategoryRule::Fixed("maritime"),
    fields: &[
        FieldRule {
            target: "vessel_type",
            source: FieldSource::Verbatim("vessel_type"),
        },
        FieldRule {
            target: "cargo",
            source: FieldSource::Verbatim("cargo"),
        },
    ],
};

const STORM: CategorySchema = CategorySchema {
    category: Category::Storm,
    aliases: &COMMON_ALIASES,
    subcategory: SubcategoryRule::FromField {
        field: "event_type",
        default: "storm",
    },
    fields: &[
        FieldRule {
            target: "magnitude",
            source: FieldSource::Verbatim("magnitude"),
        },
        FieldRule {
            target: "fatalities",
            source: FieldSource::Verbatim("fatalities"),
        },
        FieldRule {
            target: "injuries",
            source: FieldSource::Verbatim("injuries"),
        },
        FieldRule {
            target: "damage",
            source: FieldSource::Verbatim("damage_property"),
        },
        FieldRule {
            target: "state",
            source: FieldSource::Verbatim("state"),
        },
    ],
};

const EARTHQUAKE: CategorySchema = CategorySchema {
    category: Category::Earthquake,
    aliases: &COMMON_ALIASES,
    subcategory: SubcategoryRule::Fixed("seismic"),
    fields: &[
        FieldRule {
            target: "magnitude",
            source: FieldSource::Verbatim("magnitude"),
        },
        FieldRule {
            target: "depth_km",
            source: FieldSource::Verbatim("depth"),
        },
    ],
};

static SCHEMAS: [CategorySchema; 4] = [AVIATION, SHIPWRECK, STORM, EARTHQUAKE];

/// The field table for a category.
pub fn schema_for(category: Category) -> &'static CategorySchema {
    match category {
        Category::AviationAccident => &SCHEMAS[0],
        Category::Shipwreck => &SCHEMAS[1],
        Category::Storm => &SCHEMAS[2],
        Category::Earthquake => &SCHEMAS[3],
    }
}
