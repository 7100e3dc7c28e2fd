//! Registry test utilities

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use sdk_resolver::version::error::RegistryError;
use sdk_resolver::version::extractor::Extractor;
use sdk_resolver::version::pattern::PatternTable;
use sdk_resolver::version::registry::ListingSource;
use sdk_resolver::version::resolver::VersionResolver;
use sdk_resolver::version::types::{ListingItem, ListingPage};

/// In-memory paginated listing
///
/// Pages are chained with tokens "page-1", "page-2", ... and every
/// requested token is recorded.
pub struct FakeListing {
    pages: Vec<Vec<ListingItem>>,
    requested_tokens: Mutex<Vec<Option<String>>>,
}

impl FakeListing {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            requested_tokens: Mutex::new(Vec::new()),
        }
    }

    /// Append a page of `(path, download_url)` items
    pub fn with_page(mut self, items: &[(&str, &str)]) -> Self {
        self.pages.push(
            items
                .iter()
                .map(|(path, url)| ListingItem::new(path, url))
                .collect(),
        );
        self
    }

    pub fn requested_tokens(&self) -> Vec<Option<String>> {
        self.requested_tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListingSource for FakeListing {
    async fn fetch_page(
        &self,
        continuation_token: Option<String>,
    ) -> Result<ListingPage, RegistryError> {
        self.requested_tokens
            .lock()
            .unwrap()
            .push(continuation_token.clone());

        let index = match continuation_token.as_deref() {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| RegistryError::InvalidResponse(format!("unknown token {}", token)))?,
        };

        let items = self.pages.get(index).cloned().unwrap_or_default();
        let next_token = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));

        Ok(ListingPage::new(items, next_token.as_deref()))
    }
}

/// Resolver backed by the built-in pattern table
pub fn builtin_resolver() -> VersionResolver {
    let table = PatternTable::builtin().unwrap();
    VersionResolver::new(Arc::new(Extractor::load(table)))
}
