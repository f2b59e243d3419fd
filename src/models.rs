use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four reference-data categories exposed by the DataMapper API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Indicator,
    Country,
    Group,
    Region,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Indicator,
        Category::Country,
        Category::Group,
        Category::Region,
    ];

    /// Endpoint path segment, which doubles as the top-level key of the
    /// JSON response (`{"indicators": {...}}` and so on).
    pub fn endpoint(self) -> &'static str {
        match self {
            Category::Indicator => "indicators",
            Category::Country => "countries",
            Category::Group => "groups",
            Category::Region => "regions",
        }
    }

    /// File name of the persisted reference table for this category.
    pub fn file_name(self) -> &'static str {
        match self {
            Category::Indicator => "indicators.csv",
            Category::Country => "countries.csv",
            Category::Group => "groups.csv",
            Category::Region => "regions.csv",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Indicator => "indicator",
            Category::Country => "country",
            Category::Group => "group",
            Category::Region => "region",
        };
        f.write_str(s)
    }
}

/// One row of a reference table: a stable id plus its display name.
/// `unit`, `description`, and `source` are populated for indicators only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub id: String,
    pub name: String,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
}

impl ReferenceEntry {
    /// Plain id/name entry (countries, groups, regions).
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit: None,
            description: None,
            source: None,
        }
    }
}

/// Raw per-id record inside a reference response. The remote serializes
/// absent labels as `null`; such entries are dropped during parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceRecord {
    pub label: Option<String>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub source: Option<String>,
}

/// Nested `values` block of a series response:
/// indicator id -> country id -> year -> value (or explicit null).
pub type SeriesValues = BTreeMap<String, BTreeMap<String, BTreeMap<String, Option<f64>>>>;

/// Raw series response. The remote omits `values` entirely when there is
/// no data for the requested scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPayload {
    pub values: Option<SeriesValues>,
}

/// Tidy series row (one row = one observation). `value` is `None` only
/// when the remote payload carries an explicit `null` for that year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub country: String,
    pub year: String,
    pub indicator: String,
    pub value: Option<f64>,
    pub unit: String,
}

/// Result of a series fetch. `NoData` means the remote response had no
/// `values` block at all; an empty `Table` means the block was present
/// but empty. Callers must message the two differently.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesResult {
    Table(Vec<SeriesPoint>),
    NoData,
}

impl SeriesResult {
    pub fn is_no_data(&self) -> bool {
        matches!(self, SeriesResult::NoData)
    }

    pub fn table(&self) -> Option<&[SeriesPoint]> {
        match self {
            SeriesResult::Table(rows) => Some(rows),
            SeriesResult::NoData => None,
        }
    }
}

/// Grouping key used in stats.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub indicator: String,
    pub country: String,
}

/// A series request as the user types it: display names, not ids.
/// Only `indicators` is required to be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesQuery {
    pub indicators: Vec<String>,
    pub countries: Vec<String>,
    pub groups: Vec<String>,
    pub regions: Vec<String>,
}

impl SeriesQuery {
    pub fn new(indicators: Vec<String>) -> Self {
        Self {
            indicators,
            ..Default::default()
        }
    }
}

// Allow -, _, . unescaped in ids placed into path segments.
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc_join(ids: &[String]) -> String {
    ids.iter()
        .map(|s| percent_encoding::utf8_percent_encode(s.trim(), SAFE).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// The resolved-id mirror of [`SeriesQuery`], owning the positional path
/// grammar of the series endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesSelection {
    pub indicator_ids: Vec<String>,
    pub country_ids: Vec<String>,
    pub group_ids: Vec<String>,
    pub region_ids: Vec<String>,
}

impl SeriesSelection {
    /// Compose the request path: indicator ids first, then country, group
    /// and region ids, each block `/`-joined. The order is positional in
    /// the remote path grammar and must not change.
    pub fn path(&self) -> String {
        let mut path = enc_join(&self.indicator_ids);
        for block in [&self.country_ids, &self.group_ids, &self.region_ids] {
            if !block.is_empty() {
                path.push('/');
                path.push_str(&enc_join(block));
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_keeps_block_order() {
        let sel = SeriesSelection {
            indicator_ids: vec!["A".into(), "B".into()],
            country_ids: vec!["X".into()],
            group_ids: vec!["G".into()],
            region_ids: vec![],
        };
        assert_eq!(sel.path(), "A/B/X/G");
    }

    #[test]
    fn path_encodes_unsafe_characters() {
        let sel = SeriesSelection {
            indicator_ids: vec!["NGDP_RPCH".into(), "a b".into()],
            ..Default::default()
        };
        assert_eq!(sel.path(), "NGDP_RPCH/a%20b");
    }
}
