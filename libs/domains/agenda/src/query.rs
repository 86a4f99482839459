//! Store filters for the listing endpoints.

use mongodb::bson::{Document, doc, oid::ObjectId};

use crate::error::{AgendaError, AgendaResult};

/// Lower bound of the `/precos` cost window (inclusive).
pub const PRICE_MIN: f64 = 100.0;
/// Upper bound of the `/precos` cost window (inclusive).
pub const PRICE_MAX: f64 = 900.0;
/// Year `/precos` filters on; matched against the end of `data`.
pub const PRICE_YEAR: &str = "2023";

/// A filter plus optional sort, ready for `find`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventQuery {
    pub filter: Document,
    pub sort: Option<Document>,
}

impl EventQuery {
    /// Every event, ordered by `titulo` ascending.
    pub fn all() -> Self {
        Self {
            filter: doc! {},
            sort: Some(doc! { "titulo": 1 }),
        }
    }

    pub fn by_id(id: ObjectId) -> Self {
        Self {
            filter: doc! { "_id": id },
            sort: None,
        }
    }

    /// Case-insensitive substring match on `titulo`.
    ///
    /// The fragment is escaped, so `.` or `(` match themselves.
    pub fn by_title(fragment: &str) -> Self {
        Self {
            filter: doc! {
                "titulo": { "$regex": regex::escape(fragment), "$options": "i" }
            },
            sort: None,
        }
    }

    /// Events costing between [`PRICE_MIN`] and [`PRICE_MAX`] whose `data`
    /// ends with [`PRICE_YEAR`].
    pub fn by_price_and_year() -> Self {
        Self {
            filter: doc! {
                "custo": { "$gte": PRICE_MIN, "$lte": PRICE_MAX },
                "data": { "$regex": format!("{}$", regex::escape(PRICE_YEAR)), "$options": "i" },
            },
            sort: None,
        }
    }
}

/// Parse a path identifier into an [`ObjectId`].
pub fn parse_object_id(raw: &str) -> AgendaResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|e| AgendaError::InvalidIdentifier {
        value: raw.to_string(),
        message: e.to_string(),
    })
}
