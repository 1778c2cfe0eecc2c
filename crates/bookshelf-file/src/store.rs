//! Filesystem storage for the local store backend.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use bookshelf_core::error::{Error, InvalidInputError, TransportError};
use bookshelf_core::store::{Direction, Entity, Filter, PropertyMap, Query, QueryPage, Value};
use bookshelf_core::types::{BookId, Cursor, Key, Kind};
use bookshelf_core::{Datastore, Result};

fn map_io(err: std::io::Error) -> Error {
    Error::Transport(TransportError::Http {
        message: format!("IO error: {}", err),
    })
}

/// A cursor's decoded position: the ordered property value and id of the
/// last entity already returned.
#[derive(Debug, Serialize, Deserialize)]
struct CursorPos {
    o: String,
    id: i64,
}

fn encode_cursor(order: &str, id: i64) -> Result<Cursor> {
    let pos = CursorPos {
        o: order.to_string(),
        id,
    };
    let bytes = serde_json::to_vec(&pos).map_err(|e| {
        Error::InvalidInput(InvalidInputError::Other {
            message: e.to_string(),
        })
    })?;
    Cursor::from_token(URL_SAFE.encode(bytes))
}

fn decode_cursor(cursor: &Cursor) -> Result<CursorPos> {
    let malformed = |reason: String| {
        Error::InvalidInput(InvalidInputError::Cursor {
            value: cursor.as_token().to_string(),
            reason,
        })
    };

    let bytes = URL_SAFE
        .decode(cursor.as_token())
        .map_err(|e| malformed(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| malformed(e.to_string()))
}

/// Filesystem-backed store implementation.
///
/// Entities live at `{root}/shelf/{kind}/{id}.json`; ids come from a
/// per-kind counter file guarded by an advisory lock. Queries scan the
/// kind directory, which is fine at the catalog sizes this backend is
/// meant for (local development and tests).
#[derive(Debug, Clone)]
pub struct FileDatastore {
    root: PathBuf,
}

impl FileDatastore {
    /// Create a new file store rooted at the given directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn shelf_dir(&self) -> PathBuf {
        self.root.join("shelf")
    }

    fn kind_dir(&self, kind: &Kind) -> PathBuf {
        self.shelf_dir().join(kind.as_str())
    }

    fn entity_path(&self, key: &Key) -> PathBuf {
        self.kind_dir(key.kind())
            .join(format!("{}.json", key.id()))
    }

    fn counter_path(&self, kind: &Kind) -> PathBuf {
        self.kind_dir(kind).join("next_id")
    }

    fn counter_lock_path(&self, kind: &Kind) -> PathBuf {
        self.kind_dir(kind).join("next_id.lock")
    }

    /// Allocate the next integer id for a kind.
    ///
    /// The counter file is read and bumped under an exclusive lock so
    /// concurrent writers never hand out the same id.
    fn allocate_id(&self, kind: &Kind) -> Result<i64> {
        fs::create_dir_all(self.kind_dir(kind)).map_err(map_io)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.counter_lock_path(kind))
            .map_err(map_io)?;
        lock_file.lock_exclusive().map_err(map_io)?;

        let counter_path = self.counter_path(kind);
        let id = if counter_path.exists() {
            let content = fs::read_to_string(&counter_path).map_err(map_io)?;
            content.trim().parse::<i64>().map_err(|_| {
                Error::InvalidInput(InvalidInputError::Other {
                    message: format!("corrupt id counter at {}", counter_path.display()),
                })
            })?
        } else {
            1
        };

        fs::write(&counter_path, format!("{}\n", id + 1)).map_err(map_io)?;
        lock_file.unlock().map_err(map_io)?;

        Ok(id)
    }

    fn write_properties(&self, path: &Path, properties: &PropertyMap) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }

        let content = serde_json::to_string_pretty(properties).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: e.to_string(),
            })
        })?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(map_io)?;
        fs::rename(&temp_path, path).map_err(map_io)?;

        Ok(())
    }

    fn load_properties(path: &Path) -> Result<PropertyMap> {
        let content = fs::read_to_string(path).map_err(map_io)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: e.to_string(),
            })
        })
    }

    /// Load, filter and sort the rows a query ranges over.
    ///
    /// Rows are (ordered property value, id, properties), sorted with the
    /// id as tiebreak so pagination order is stable. Entities without the
    /// ordered property are omitted.
    fn load_rows(&self, query: &Query) -> Result<Vec<(String, i64, PropertyMap)>> {
        let dir = self.kind_dir(&query.kind);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut rows = Vec::new();

        for entry in fs::read_dir(&dir).map_err(map_io)? {
            let entry = entry.map_err(map_io)?;
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let id = match path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<i64>().ok())
            {
                Some(id) => id,
                None => continue,
            };

            let properties = Self::load_properties(&path)?;

            let matches = match &query.filter {
                Some(Filter::Eq { property, value }) => properties.get(property) == Some(value),
                None => true,
            };
            if !matches {
                continue;
            }

            let Some(order) = properties
                .get(&query.order_by.property)
                .and_then(Value::as_text)
            else {
                continue;
            };

            rows.push((order.to_string(), id, properties));
        }

        rows.sort_by(|a, b| (&a.0, a.1).cmp(&(&b.0, b.1)));
        if query.order_by.direction == Direction::Descending {
            rows.reverse();
        }

        Ok(rows)
    }
}

#[async_trait]
impl Datastore for FileDatastore {
    #[instrument(skip(self, properties))]
    async fn insert(&self, kind: &Kind, properties: PropertyMap) -> Result<Key> {
        let id = self.allocate_id(kind)?;
        let key = Key::new(kind.clone(), BookId::new(id)?);

        self.write_properties(&self.entity_path(&key), &properties)?;

        debug!(key = %key, "inserted entity");

        Ok(key)
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &Key) -> Result<Option<Entity>> {
        let path = self.entity_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let properties = Self::load_properties(&path)?;
        Ok(Some(Entity::new(key.clone(), properties)))
    }

    #[instrument(skip(self, entity))]
    async fn update(&self, entity: &Entity) -> Result<()> {
        let path = self.entity_path(&entity.key);
        if !path.exists() {
            return Err(Error::not_found(entity.key.clone()));
        }

        self.write_properties(&path, &entity.properties)?;

        debug!(key = %entity.key, "updated entity");

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &Key) -> Result<()> {
        let path = self.entity_path(key);

        if path.exists() {
            fs::remove_file(&path).map_err(map_io)?;
            debug!(key = %key, "deleted entity");
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn run_query(&self, query: &Query) -> Result<QueryPage> {
        let rows = self.load_rows(query)?;

        let start = match &query.start_cursor {
            Some(cursor) => {
                let pos = decode_cursor(cursor)?;
                rows.iter()
                    .position(|(order, id, _)| match query.order_by.direction {
                        Direction::Ascending => (order.as_str(), *id) > (pos.o.as_str(), pos.id),
                        Direction::Descending => (order.as_str(), *id) < (pos.o.as_str(), pos.id),
                    })
                    .unwrap_or(rows.len())
            }
            None => 0,
        };

        let limit = query.limit.max(0) as usize;
        let mut entities = Vec::new();
        let mut last_pos: Option<(String, i64)> = None;

        for (order, id, properties) in rows.into_iter().skip(start).take(limit) {
            let key = Key::new(query.kind.clone(), BookId::new(id)?);
            entities.push(Entity::new(key, properties));
            last_pos = Some((order, id));
        }

        let end_cursor = match last_pos {
            Some((order, id)) => Some(encode_cursor(&order, id)?),
            None => None,
        };

        Ok(QueryPage {
            entities,
            end_cursor,
        })
    }
}
