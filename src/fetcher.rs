//! Series fetching: names in, tidy rows out.
//!
//! The pipeline is linear and stateless per call: resolve every supplied
//! name (fail-fast), compose the positional request path, issue one GET,
//! flatten the nested payload, attach units. Any unresolvable name or
//! failed remote call aborts the whole operation; there are no partial
//! tables.

use crate::api::RemoteSource;
use crate::cache::ReferenceCache;
use crate::error::{Error, Result};
use crate::models::{
    Category, SeriesPoint, SeriesQuery, SeriesResult, SeriesSelection, SeriesValues,
};
use crate::resolver::Resolver;
use log::debug;
use std::collections::HashMap;

pub struct SeriesFetcher<'a> {
    remote: &'a dyn RemoteSource,
    cache: &'a ReferenceCache,
}

impl<'a> SeriesFetcher<'a> {
    pub fn new(remote: &'a dyn RemoteSource, cache: &'a ReferenceCache) -> Self {
        Self { remote, cache }
    }

    /// Fetch one series table for a set of display names.
    ///
    /// Returns [`SeriesResult::NoData`] when the response carries no
    /// `values` block; an empty table when the block is present but
    /// empty.
    pub fn fetch(&self, query: &SeriesQuery) -> Result<SeriesResult> {
        if query.indicators.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let resolver = Resolver::new(self.cache);
        let selection = SeriesSelection {
            indicator_ids: resolver.resolve_all(Category::Indicator, &query.indicators)?,
            country_ids: resolver.resolve_all(Category::Country, &query.countries)?,
            group_ids: resolver.resolve_all(Category::Group, &query.groups)?,
            region_ids: resolver.resolve_all(Category::Region, &query.regions)?,
        };

        let payload = self.remote.series(&selection)?;
        let Some(values) = payload.values else {
            debug!("series response without values block");
            return Ok(SeriesResult::NoData);
        };

        let units = resolver.units_for(&selection.indicator_ids)?;
        let rows = flatten(&values, &units)?;
        debug!("flattened {} series rows", rows.len());
        Ok(SeriesResult::Table(rows))
    }
}

/// Flatten the three-level `values` block into one row per
/// (indicator, country, year) leaf. Absent years are absent rows; a row
/// carries `value: None` only for an explicit remote null. An indicator
/// id without a unit entry violates the reference-table invariant and
/// fails the whole request.
fn flatten(values: &SeriesValues, units: &HashMap<String, String>) -> Result<Vec<SeriesPoint>> {
    let mut rows = Vec::new();
    for (indicator_id, countries) in values {
        let unit = units.get(indicator_id).ok_or_else(|| Error::NotFound {
            category: Category::Indicator,
            name: indicator_id.clone(),
        })?;
        for (country_id, years) in countries {
            for (year, value) in years {
                rows.push(SeriesPoint {
                    country: country_id.clone(),
                    year: year.clone(),
                    indicator: indicator_id.clone(),
                    value: *value,
                    unit: unit.clone(),
                });
            }
        }
    }
    Ok(rows)
}
