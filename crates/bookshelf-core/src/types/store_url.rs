//! Store URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated store location URL.
///
/// This type supports both network document stores (HTTPS/HTTP) and local
/// filesystem stores (`file://`).
///
/// # Network URLs
///
/// Network URLs must use HTTPS (or HTTP for localhost) and point at the
/// base of a Datastore-style JSON RPC service.
///
/// # File URLs
///
/// File URLs (`file:///path/to/store`) enable local-only development and
/// testing without any network service. Entities are stored on the
/// filesystem.
///
/// # Example
///
/// ```
/// use bookshelf_core::StoreUrl;
///
/// // Network store
/// let store = StoreUrl::new("https://datastore.googleapis.com").unwrap();
/// assert_eq!(store.rpc_url("my-project", "runQuery"),
///            "https://datastore.googleapis.com/v1/projects/my-project:runQuery");
///
/// // Local filesystem store
/// let local = StoreUrl::new("file:///tmp/test-store").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreUrl(Url);

impl StoreUrl {
    /// Create a new store URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::StoreUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the RPC endpoint URL for a given project and method.
    pub fn rpc_url(&self, project_id: &str, method: &str) -> String {
        // The URL crate always adds a trailing slash to root paths,
        // so we need to handle that when constructing the RPC URL
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/v1/projects/{}:{}", base, project_id, method)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the URL scheme (e.g., "https", "http", "file").
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    /// Returns true if this is a local filesystem store (file:// URL).
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns true if this is a network store (http:// or https:// URL).
    pub fn is_network(&self) -> bool {
        let scheme = self.0.scheme();
        scheme == "http" || scheme == "https"
    }

    /// Returns the filesystem path for file:// URLs.
    ///
    /// Returns `None` for non-file URLs.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_local() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        // Must be absolute
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::StoreUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();

        // Handle file:// URLs
        if scheme == "file" {
            // file:// URLs don't need a host, just a path
            if url.path().is_empty() {
                return Err(InvalidInputError::StoreUrl {
                    value: original.to_string(),
                    reason: "file:// URL must have a path".to_string(),
                }
                .into());
            }
            return Ok(());
        }

        // Must be HTTPS (or HTTP for localhost)
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::StoreUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        // Must have a host for network URLs
        if url.host_str().is_none() {
            return Err(InvalidInputError::StoreUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for StoreUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for StoreUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        StoreUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for StoreUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let store = StoreUrl::new("https://datastore.googleapis.com").unwrap();
        assert_eq!(store.host(), Some("datastore.googleapis.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let store = StoreUrl::new("http://localhost:8081").unwrap();
        assert_eq!(store.host(), Some("localhost"));
    }

    #[test]
    fn rpc_url_construction() {
        let store = StoreUrl::new("https://datastore.googleapis.com").unwrap();
        assert_eq!(
            store.rpc_url("bookshelf-dev", "lookup"),
            "https://datastore.googleapis.com/v1/projects/bookshelf-dev:lookup"
        );
    }

    #[test]
    fn normalizes_trailing_slash_in_rpc_url() {
        let store = StoreUrl::new("https://datastore.googleapis.com/").unwrap();
        assert_eq!(
            store.rpc_url("bookshelf-dev", "commit"),
            "https://datastore.googleapis.com/v1/projects/bookshelf-dev:commit"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(StoreUrl::new("http://datastore.googleapis.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(StoreUrl::new("/v1/projects/p:lookup").is_err());
    }

    #[test]
    fn valid_file_url() {
        let store = StoreUrl::new("file:///tmp/test-store").unwrap();
        assert!(store.is_local());
        assert!(!store.is_network());
        assert_eq!(store.scheme(), "file");
    }

    #[test]
    fn file_url_to_path() {
        #[cfg(unix)]
        {
            let store = StoreUrl::new("file:///tmp/test-store").unwrap();
            let path = store.to_file_path().unwrap();
            assert_eq!(path, std::path::PathBuf::from("/tmp/test-store"));
        }

        #[cfg(windows)]
        {
            let store = StoreUrl::new("file:///C:/tmp/test-store").unwrap();
            let path = store.to_file_path().unwrap();
            assert_eq!(path, std::path::PathBuf::from(r"C:\tmp\test-store"));
        }
    }

    #[test]
    fn network_url_not_local() {
        let store = StoreUrl::new("https://datastore.googleapis.com").unwrap();
        assert!(!store.is_local());
        assert!(store.is_network());
        assert!(store.to_file_path().is_none());
    }
}
