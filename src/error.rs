use crate::models::Category;
use thiserror::Error;

/// Errors surfaced by the data layer.
///
/// `NoData` is deliberately absent: an empty series response is not a
/// failure, it is the [`crate::models::SeriesResult::NoData`] variant.
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream HTTP call did not return a success status, or the
    /// transport failed outright. Never retried.
    #[error("remote unavailable ({url}): {detail}")]
    RemoteUnavailable { url: String, detail: String },

    /// A supplied name has no exact match in its category's reference
    /// table.
    #[error("no {category} named {name:?}")]
    NotFound { category: Category, name: String },

    /// The remote payload did not have the expected shape.
    #[error("malformed payload: {detail}")]
    Malformed { detail: String },

    /// A series request with no indicator names.
    #[error("at least one indicator name required")]
    EmptyQuery,

    #[error("cache io: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
