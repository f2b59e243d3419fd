//! Shared fakes for the integration tests: a counting in-memory remote
//! and a settable clock.
#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use idm_rs::api::RemoteSource;
use idm_rs::cache::Clock;
use idm_rs::models::{Category, ReferenceEntry, SeriesPayload, SeriesSelection};
use idm_rs::{Error, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
struct Inner {
    tables: RefCell<HashMap<Category, Vec<ReferenceEntry>>>,
    series: RefCell<Option<SeriesPayload>>,
    fail_reference: Cell<bool>,
    reference_calls: Cell<usize>,
    series_calls: Cell<usize>,
    last_path: RefCell<Option<String>>,
}

/// In-memory stand-in for the remote API. Clones share state, so one
/// handle can go into the cache while the test keeps another to inspect
/// call counts.
#[derive(Clone, Default)]
pub struct FakeRemote {
    inner: Rc<Inner>,
}

impl FakeRemote {
    pub fn set_table(&self, category: Category, entries: Vec<ReferenceEntry>) {
        self.inner.tables.borrow_mut().insert(category, entries);
    }

    pub fn set_series(&self, payload: SeriesPayload) {
        *self.inner.series.borrow_mut() = Some(payload);
    }

    pub fn fail_reference(&self, yes: bool) {
        self.inner.fail_reference.set(yes);
    }

    pub fn reference_calls(&self) -> usize {
        self.inner.reference_calls.get()
    }

    pub fn series_calls(&self) -> usize {
        self.inner.series_calls.get()
    }

    pub fn last_path(&self) -> Option<String> {
        self.inner.last_path.borrow().clone()
    }
}

impl RemoteSource for FakeRemote {
    fn reference(&self, category: Category) -> Result<Vec<ReferenceEntry>> {
        self.inner
            .reference_calls
            .set(self.inner.reference_calls.get() + 1);
        if self.inner.fail_reference.get() {
            return Err(Error::RemoteUnavailable {
                url: format!("fake://{}", category.endpoint()),
                detail: "HTTP 503 Service Unavailable".into(),
            });
        }
        self.inner
            .tables
            .borrow()
            .get(&category)
            .cloned()
            .ok_or_else(|| Error::RemoteUnavailable {
                url: format!("fake://{}", category.endpoint()),
                detail: "no such table".into(),
            })
    }

    fn series(&self, selection: &SeriesSelection) -> Result<SeriesPayload> {
        self.inner.series_calls.set(self.inner.series_calls.get() + 1);
        *self.inner.last_path.borrow_mut() = Some(selection.path());
        self.inner
            .series
            .borrow()
            .clone()
            .ok_or_else(|| Error::RemoteUnavailable {
                url: "fake://series".into(),
                detail: "no payload configured".into(),
            })
    }
}

/// Clock whose clones share one settable instant.
#[derive(Clone)]
pub struct FakeClock {
    now: Rc<RefCell<DateTime<Utc>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(RefCell::new(
                Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            )),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.borrow_mut();
        *now += delta;
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.borrow()
    }
}

pub fn indicator(id: &str, name: &str, unit: &str) -> ReferenceEntry {
    ReferenceEntry {
        id: id.into(),
        name: name.into(),
        unit: if unit.is_empty() {
            None
        } else {
            Some(unit.into())
        },
        description: None,
        source: None,
    }
}

/// Indicator table shared by most tests.
pub fn indicators_table() -> Vec<ReferenceEntry> {
    vec![
        indicator("NGDP_RPCH", "Real GDP growth", "Annual percent change"),
        indicator("NGDPD", "GDP, current prices", "Billions of U.S. dollars"),
        indicator("PLAIN", "Unitless series", ""),
    ]
}

/// Country table shared by most tests.
pub fn countries_table() -> Vec<ReferenceEntry> {
    vec![
        ReferenceEntry::new("IND", "India"),
        ReferenceEntry::new("KOR", "Korea, Republic of"),
        ReferenceEntry::new("USA", "United States"),
    ]
}
