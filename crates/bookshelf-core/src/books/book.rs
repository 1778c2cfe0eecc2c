//! Book domain model and its entity mapping.

use serde::{Deserialize, Serialize};

use crate::store::{Entity, PropertyMap, Value};
use crate::types::BookId;

/// Property names under which book fields are stored.
pub mod property {
    /// Book title.
    pub const TITLE: &str = "title";
    /// Book author.
    pub const AUTHOR: &str = "author";
    /// Free-form publication date.
    pub const PUBLISHED_DATE: &str = "publishedDate";
    /// Book description.
    pub const DESCRIPTION: &str = "description";
    /// Display name of the user who added the book.
    pub const CREATED_BY: &str = "createdBy";
    /// Id of the user who added the book; filter key for per-user listing.
    pub const CREATED_BY_ID: &str = "createdById";
    /// Cover image URL.
    pub const IMAGE_URL: &str = "imageUrl";
}

/// A book in the catalog.
///
/// `id` is assigned by the store on creation and immutable afterwards.
/// `created_by_id` identifies the owning user and must be set at creation
/// for the book to show up in per-user listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned id; `None` until the book has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,

    /// Title.
    pub title: String,

    /// Author.
    pub author: String,

    /// Publication date, free-form.
    #[serde(default)]
    pub published_date: String,

    /// Description.
    #[serde(default)]
    pub description: String,

    /// Display name of the user who added the book.
    #[serde(default)]
    pub created_by: String,

    /// Id of the user who added the book.
    #[serde(default)]
    pub created_by_id: String,

    /// Cover image URL; `None` means no image was ever set, which is
    /// distinct from an empty string.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Book {
    /// Map this book to its stored properties.
    ///
    /// All seven properties are always written; a missing image is written
    /// as an explicit null.
    pub fn to_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        properties.insert(property::TITLE.to_string(), Value::from(self.title.clone()));
        properties.insert(
            property::AUTHOR.to_string(),
            Value::from(self.author.clone()),
        );
        properties.insert(
            property::PUBLISHED_DATE.to_string(),
            Value::from(self.published_date.clone()),
        );
        properties.insert(
            property::DESCRIPTION.to_string(),
            Value::from(self.description.clone()),
        );
        properties.insert(
            property::CREATED_BY.to_string(),
            Value::from(self.created_by.clone()),
        );
        properties.insert(
            property::CREATED_BY_ID.to_string(),
            Value::from(self.created_by_id.clone()),
        );
        properties.insert(
            property::IMAGE_URL.to_string(),
            match &self.image_url {
                Some(url) => Value::from(url.clone()),
                None => Value::Null,
            },
        );
        properties
    }

    /// Map a stored entity back to a book.
    ///
    /// Absent string properties read as `""`; an absent or null image reads
    /// as `None`.
    pub fn from_entity(entity: &Entity) -> Book {
        let text_or_empty =
            |name: &str| -> String { entity.text(name).unwrap_or_default().to_string() };

        Book {
            id: Some(entity.key.id()),
            title: text_or_empty(property::TITLE),
            author: text_or_empty(property::AUTHOR),
            published_date: text_or_empty(property::PUBLISHED_DATE),
            description: text_or_empty(property::DESCRIPTION),
            created_by: text_or_empty(property::CREATED_BY),
            created_by_id: text_or_empty(property::CREATED_BY_ID),
            image_url: entity.text(property::IMAGE_URL).map(|s| s.to_string()),
        }
    }
}
