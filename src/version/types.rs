//! Common types for registry listings and resolved versions

use serde::{Deserialize, Serialize};

/// One entry of a remote registry listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingItem {
    /// Repository path of the artifact (e.g., "/jdk/temurin/jdk-21.0.6_7.tar.gz")
    pub path: String,
    /// Direct download URL of the artifact
    pub download_url: String,
}

impl ListingItem {
    pub fn new(path: &str, download_url: &str) -> Self {
        Self {
            path: path.to_string(),
            download_url: download_url.to_string(),
        }
    }
}

/// One page of a paginated registry listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    #[serde(default)]
    pub items: Vec<ListingItem>,
    /// Opaque cursor for the next page; absent on the final page
    #[serde(default)]
    pub continuation_token: Option<String>,
}

impl ListingPage {
    pub fn new(items: Vec<ListingItem>, continuation_token: Option<&str>) -> Self {
        Self {
            items,
            continuation_token: continuation_token.map(str::to_string),
        }
    }

    /// Returns the continuation token if another page follows.
    /// An empty token is treated as the end of the listing.
    pub fn next_token(&self) -> Option<&str> {
        self.continuation_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// HTTP Basic credentials for an authenticated registry
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Builds credentials only when both parts are present and non-empty.
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (username, password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some(Self {
                username: user.to_string(),
                password: pass.to_string(),
            }),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// An installable version found in a registry listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAsset {
    /// Version as captured by the matching pattern
    pub version: String,
    pub download_url: String,
    /// Name of the pattern set that produced the version
    pub pattern_name: String,
}
