//! Synchronous client for the **IMF DataMapper API (v1)**.
//!
//! Two endpoint families matter here: the four reference lists
//! (`/indicators`, `/countries`, `/groups`, `/regions`) and the series
//! endpoint, whose path is the positional id grammar composed by
//! [`SeriesSelection::path`].
//!
//! ### Notes
//! - Responses are plain JSON objects, not arrays; the reference lists
//!   key their entries by id, and the series response nests
//!   indicator -> country -> year.
//! - A non-success status or transport error surfaces as
//!   [`Error::RemoteUnavailable`] and is never retried.
//! - Network timeouts use a sane default (30s total, 10s connect).
//!
//! Typical usage:
//! ```no_run
//! # use idm_rs::api::{Client, RemoteSource};
//! # use idm_rs::models::Category;
//! let client = Client::default();
//! let countries = client.reference(Category::Country)?;
//! # Ok::<(), idm_rs::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::models::{Category, ReferenceEntry, ReferenceRecord, SeriesPayload, SeriesSelection};
use log::debug;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.imf.org/external/datamapper/api/v1";

/// The injectable seam over the two remote endpoint families. [`Client`]
/// is the production implementation; tests substitute counting or
/// failing fakes.
pub trait RemoteSource {
    /// Fetch and parse one reference list.
    fn reference(&self, category: Category) -> Result<Vec<ReferenceEntry>>;

    /// Fetch and parse one series payload for an already-resolved
    /// selection.
    fn series(&self, selection: &SeriesSelection) -> Result<SeriesPayload>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("idm_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            http,
        }
    }
}

impl Client {
    fn get_json(&self, url: &str) -> Result<Value> {
        debug!("GET {url}");
        let res = self
            .http
            .get(url)
            .send()
            .map_err(|e| Error::RemoteUnavailable {
                url: url.to_string(),
                detail: e.to_string(),
            })?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::RemoteUnavailable {
                url: url.to_string(),
                detail: format!("HTTP {status}"),
            });
        }
        res.json().map_err(|e| Error::Malformed {
            detail: format!("decode json: {e}"),
        })
    }
}

impl RemoteSource for Client {
    fn reference(&self, category: Category) -> Result<Vec<ReferenceEntry>> {
        let url = format!("{}/{}", self.base_url, category.endpoint());
        let payload = self.get_json(&url)?;
        parse_reference(category, &payload)
    }

    fn series(&self, selection: &SeriesSelection) -> Result<SeriesPayload> {
        let url = format!("{}/{}", self.base_url, selection.path());
        let payload = self.get_json(&url)?;
        parse_series(&payload)
    }
}

/// Remove embedded newlines and surrounding whitespace from a remote
/// field.
fn scrub(s: &str) -> String {
    s.replace('\n', "").trim().to_string()
}

fn scrub_opt(s: Option<String>) -> Option<String> {
    s.map(|s| scrub(&s)).filter(|s| !s.is_empty())
}

/// Parse a reference response: `{"<category>": {id: {label, ...}}}`.
///
/// Entries with an empty id or a null/missing label are discarded.
/// Output order is by id (the object deserializes into a sorted map).
pub fn parse_reference(category: Category, payload: &Value) -> Result<Vec<ReferenceEntry>> {
    let map = payload
        .get(category.endpoint())
        .and_then(Value::as_object)
        .ok_or_else(|| Error::Malformed {
            detail: format!("missing {:?} object", category.endpoint()),
        })?;

    let mut entries = Vec::with_capacity(map.len());
    for (id, record) in map {
        if id.trim().is_empty() {
            continue;
        }
        let record: ReferenceRecord =
            serde_json::from_value(record.clone()).map_err(|e| Error::Malformed {
                detail: format!("{category} record {id:?}: {e}"),
            })?;
        let Some(name) = record.label.map(|l| scrub(&l)).filter(|l| !l.is_empty()) else {
            continue;
        };
        entries.push(ReferenceEntry {
            id: id.trim().to_string(),
            name,
            unit: scrub_opt(record.unit),
            description: scrub_opt(record.description),
            source: scrub_opt(record.source),
        });
    }
    debug!("parsed {} {category} entries", entries.len());
    Ok(entries)
}

/// Parse a series response. A missing `values` key is not an error; it
/// becomes `SeriesPayload { values: None }` and later the `NoData`
/// result. A `values` block with the wrong shape is [`Error::Malformed`].
pub fn parse_series(payload: &Value) -> Result<SeriesPayload> {
    serde_json::from_value(payload.clone()).map_err(|e| Error::Malformed {
        detail: format!("series payload: {e}"),
    })
}
