//! Name resolution over the cached reference tables.
//!
//! Matching is exact and case-sensitive; there is no fuzzy matching and
//! no normalization. When the remote delivers duplicate names (it does
//! not guarantee uniqueness), the first entry wins.

use crate::cache::ReferenceCache;
use crate::error::{Error, Result};
use crate::models::Category;
use std::collections::HashMap;

pub struct Resolver<'a> {
    cache: &'a ReferenceCache,
}

impl<'a> Resolver<'a> {
    pub fn new(cache: &'a ReferenceCache) -> Self {
        Self { cache }
    }

    /// Map a display name to its stable id.
    pub fn resolve(&self, category: Category, name: &str) -> Result<String> {
        let table = self.cache.load(category)?;
        table
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.id.clone())
            .ok_or_else(|| Error::NotFound {
                category,
                name: name.to_string(),
            })
    }

    /// Resolve a batch of names against one table load, failing on the
    /// first name without a match.
    pub fn resolve_all(&self, category: Category, names: &[String]) -> Result<Vec<String>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let table = self.cache.load(category)?;
        let mut by_name: HashMap<&str, &str> = HashMap::with_capacity(table.len());
        for entry in &table {
            by_name.entry(entry.name.as_str()).or_insert(entry.id.as_str());
        }
        names
            .iter()
            .map(|name| {
                by_name
                    .get(name.as_str())
                    .map(|id| (*id).to_string())
                    .ok_or_else(|| Error::NotFound {
                        category,
                        name: name.clone(),
                    })
            })
            .collect()
    }

    /// Unit attached to an indicator *id*; empty string when the
    /// indicator carries none.
    pub fn unit_of(&self, indicator_id: &str) -> Result<String> {
        let table = self.cache.load(Category::Indicator)?;
        table
            .iter()
            .find(|e| e.id == indicator_id)
            .map(|e| e.unit.clone().unwrap_or_default())
            .ok_or_else(|| Error::NotFound {
                category: Category::Indicator,
                name: indicator_id.to_string(),
            })
    }

    /// Unit map for a set of indicator ids, built from a single table
    /// load. Every id must be present in the reference table.
    pub fn units_for(&self, indicator_ids: &[String]) -> Result<HashMap<String, String>> {
        let table = self.cache.load(Category::Indicator)?;
        let by_id: HashMap<&str, &str> = table
            .iter()
            .map(|e| (e.id.as_str(), e.unit.as_deref().unwrap_or("")))
            .collect();
        let mut units = HashMap::with_capacity(indicator_ids.len());
        for id in indicator_ids {
            let unit = by_id.get(id.as_str()).ok_or_else(|| Error::NotFound {
                category: Category::Indicator,
                name: id.clone(),
            })?;
            units.insert(id.clone(), (*unit).to_string());
        }
        Ok(units)
    }
}
