//! RPC method names and request/response types for the Datastore-style
//! JSON API.

#![allow(dead_code)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use bookshelf_core::Result;
use bookshelf_core::error::{Error, InvalidInputError};
use bookshelf_core::store::{Direction, Entity, Filter, PropertyMap, Value};
use bookshelf_core::types::{BookId, Key, Kind};

// ============================================================================
// Method Names
// ============================================================================

/// projects/{project}:lookup
pub const LOOKUP: &str = "lookup";

/// projects/{project}:commit
pub const COMMIT: &str = "commit";

/// projects/{project}:runQuery
pub const RUN_QUERY: &str = "runQuery";

// ============================================================================
// Keys and Values
// ============================================================================

/// A wire key: one path element per the single-level key model used here.
/// Int64 ids travel as JSON strings.
#[derive(Debug, Serialize, Deserialize)]
pub struct WireKey {
    pub path: Vec<WirePathElement>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WirePathElement {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl WireKey {
    /// A complete key for an existing entity.
    pub fn complete(key: &Key) -> Self {
        Self {
            path: vec![WirePathElement {
                kind: key.kind().as_str().to_string(),
                id: Some(key.id().as_i64().to_string()),
            }],
        }
    }

    /// An incomplete key; the service allocates the id on insert.
    pub fn incomplete(kind: &Kind) -> Self {
        Self {
            path: vec![WirePathElement {
                kind: kind.as_str().to_string(),
                id: None,
            }],
        }
    }

    /// Convert back to a complete core key.
    pub fn into_key(self) -> Result<Key> {
        let element = self.path.into_iter().next().ok_or_else(|| {
            Error::InvalidInput(InvalidInputError::Other {
                message: "key has an empty path".to_string(),
            })
        })?;

        let id = element.id.ok_or_else(|| {
            Error::InvalidInput(InvalidInputError::Other {
                message: "key path element has no id".to_string(),
            })
        })?;
        let id: i64 = id.parse().map_err(|_| InvalidInputError::Id {
            value: id.clone(),
            reason: "not an integer".to_string(),
        })?;

        Ok(Key::new(Kind::new(element.kind)?, BookId::new(id)?))
    }
}

/// A wire property value: text or an explicit null.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_value: Option<String>,
}

impl From<&Value> for WireValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Text(s) => WireValue {
                string_value: Some(s.clone()),
                null_value: None,
            },
            Value::Null => WireValue {
                string_value: None,
                null_value: Some("NULL_VALUE".to_string()),
            },
        }
    }
}

impl From<WireValue> for Value {
    fn from(value: WireValue) -> Self {
        match value.string_value {
            Some(s) => Value::Text(s),
            None => Value::Null,
        }
    }
}

/// A wire entity: key plus named properties.
#[derive(Debug, Serialize, Deserialize)]
pub struct WireEntity {
    pub key: WireKey,
    #[serde(default)]
    pub properties: BTreeMap<String, WireValue>,
}

impl WireEntity {
    pub fn new(key: WireKey, properties: &PropertyMap) -> Self {
        Self {
            key,
            properties: properties
                .iter()
                .map(|(name, value)| (name.clone(), WireValue::from(value)))
                .collect(),
        }
    }

    pub fn into_entity(self) -> Result<Entity> {
        let key = self.key.into_key()?;
        let properties = self
            .properties
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect();
        Ok(Entity::new(key, properties))
    }
}

// ============================================================================
// Lookup
// ============================================================================

/// Request body for lookup.
#[derive(Debug, Serialize)]
pub struct LookupRequest {
    pub keys: Vec<WireKey>,
}

/// Response from lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    #[serde(default)]
    pub found: Vec<EntityResult>,
    #[serde(default)]
    pub missing: Vec<EntityResult>,
}

/// One entity within a lookup or query response.
#[derive(Debug, Deserialize)]
pub struct EntityResult {
    pub entity: WireEntity,
}

// ============================================================================
// Commit
// ============================================================================

/// Request body for commit.
#[derive(Debug, Serialize)]
pub struct CommitRequest {
    pub mode: &'static str,
    pub mutations: Vec<Mutation>,
}

impl CommitRequest {
    pub fn non_transactional(mutation: Mutation) -> Self {
        Self {
            mode: "NON_TRANSACTIONAL",
            mutations: vec![mutation],
        }
    }
}

/// A single mutation; exactly one of the fields is set.
#[derive(Debug, Default, Serialize)]
pub struct Mutation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert: Option<WireEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<WireEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<WireKey>,
}

impl Mutation {
    pub fn insert(entity: WireEntity) -> Self {
        Self {
            insert: Some(entity),
            ..Self::default()
        }
    }

    pub fn update(entity: WireEntity) -> Self {
        Self {
            update: Some(entity),
            ..Self::default()
        }
    }

    pub fn delete(key: WireKey) -> Self {
        Self {
            delete: Some(key),
            ..Self::default()
        }
    }
}

/// Response from commit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    #[serde(default)]
    pub mutation_results: Vec<MutationResult>,
}

/// Result of one mutation; carries the allocated key for inserts with an
/// incomplete key.
#[derive(Debug, Deserialize)]
pub struct MutationResult {
    #[serde(default)]
    pub key: Option<WireKey>,
}

// ============================================================================
// RunQuery
// ============================================================================

/// Request body for runQuery.
#[derive(Debug, Serialize)]
pub struct RunQueryRequest {
    pub query: WireQuery,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireQuery {
    pub kind: Vec<KindExpression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<WireFilter>,
    pub order: Vec<WireOrder>,
    pub limit: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct KindExpression {
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireFilter {
    pub property_filter: WirePropertyFilter,
}

#[derive(Debug, Serialize)]
pub struct WirePropertyFilter {
    pub property: PropertyReference,
    pub op: &'static str,
    pub value: WireValue,
}

impl From<&Filter> for WireFilter {
    fn from(filter: &Filter) -> Self {
        match filter {
            Filter::Eq { property, value } => WireFilter {
                property_filter: WirePropertyFilter {
                    property: PropertyReference {
                        name: property.clone(),
                    },
                    op: "EQUAL",
                    value: WireValue::from(value),
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PropertyReference {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct WireOrder {
    pub property: PropertyReference,
    pub direction: &'static str,
}

impl WireOrder {
    pub fn new(property: &str, direction: Direction) -> Self {
        Self {
            property: PropertyReference {
                name: property.to_string(),
            },
            direction: match direction {
                Direction::Ascending => "ASCENDING",
                Direction::Descending => "DESCENDING",
            },
        }
    }
}

/// Response from runQuery.
#[derive(Debug, Deserialize)]
pub struct RunQueryResponse {
    pub batch: QueryBatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBatch {
    #[serde(default)]
    pub entity_results: Vec<EntityResult>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

// ============================================================================
// Errors
// ============================================================================

/// Service error response format.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
