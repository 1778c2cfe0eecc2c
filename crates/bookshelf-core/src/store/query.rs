//! Query types.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, Value};
use crate::types::{Cursor, Kind};

/// An equality filter on a single property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    /// Match entities whose property equals the given value.
    Eq {
        /// The property name.
        property: String,
        /// The value to match.
        value: Value,
    },
}

impl Filter {
    /// Create an equality filter.
    pub fn eq(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending order.
    Ascending,
    /// Descending order.
    Descending,
}

/// A single ordering clause.
///
/// Entities that lack the ordered property (or hold a null there) are
/// omitted from ordered results, matching the behavior of property-indexed
/// document stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The property to order by.
    pub property: String,
    /// The sort direction.
    pub direction: Direction,
}

impl OrderBy {
    /// Order ascending by the given property.
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Ascending,
        }
    }

    /// Order descending by the given property.
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Descending,
        }
    }
}

/// A kind-scoped query: optional equality filter, one ordering clause,
/// a fixed limit, and an optional resume position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// The entity kind to query.
    pub kind: Kind,
    /// Optional equality filter.
    pub filter: Option<Filter>,
    /// The ordering clause.
    pub order_by: OrderBy,
    /// Maximum number of entities to return.
    pub limit: i32,
    /// Position to resume from, if continuing a previous page.
    pub start_cursor: Option<Cursor>,
}

impl Query {
    /// Create a query over a kind with the given ordering and limit.
    pub fn new(kind: Kind, order_by: OrderBy, limit: i32) -> Self {
        Self {
            kind,
            filter: None,
            order_by,
            limit,
            start_cursor: None,
        }
    }

    /// Attach an equality filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Resume from a cursor.
    pub fn with_start_cursor(mut self, cursor: Cursor) -> Self {
        self.start_cursor = Some(cursor);
        self
    }
}

/// One page of query results.
#[derive(Debug, Clone)]
pub struct QueryPage {
    /// The entities in this page, in query order.
    pub entities: Vec<Entity>,

    /// The position after the last returned entity.
    ///
    /// `None` when the page came back empty. A present cursor does not
    /// promise further results, only a resumable position.
    pub end_cursor: Option<Cursor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_builder() {
        let kind = Kind::new("Book").unwrap();
        let query = Query::new(kind.clone(), OrderBy::asc("title"), 10)
            .with_filter(Filter::eq("createdById", "user-1"))
            .with_start_cursor(Cursor::from_token("abc123").unwrap());

        assert_eq!(query.kind, kind);
        assert_eq!(query.limit, 10);
        assert_eq!(query.order_by.property, "title");
        assert_eq!(query.order_by.direction, Direction::Ascending);
        assert!(query.filter.is_some());
        assert!(query.start_cursor.is_some());
    }
}
