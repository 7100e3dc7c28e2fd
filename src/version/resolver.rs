//! Registry listing resolver
//!
//! Pages through a registry listing, keeps the items under one
//! distribution's path prefix, extracts a version from each and returns one
//! asset per distinct version.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::version::error::{RegistryError, ResolveError};
use crate::version::extractor::Extractor;
use crate::version::registry::ListingSource;
use crate::version::types::{ListingItem, ResolvedAsset};

/// What to resolve from a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveRequest<'a> {
    /// Path prefix of the distribution (e.g., "jdk/adoptium/temurin")
    pub path_prefix: &'a str,
    /// SDK type used to select pattern sets (e.g., "jdk")
    pub sdk_type: &'a str,
    /// Keep only versions containing this substring
    pub version_filter: Option<&'a str>,
}

/// Resolves installable versions of a distribution from a listing source
pub struct VersionResolver {
    extractor: Arc<Extractor>,
}

impl VersionResolver {
    pub fn new(extractor: Arc<Extractor>) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &Arc<Extractor> {
        &self.extractor
    }

    /// Resolve the versions available under `request.path_prefix`
    ///
    /// # Returns
    /// * `Ok(Vec<ResolvedAsset>)` - One asset per version, sorted descending
    ///   by plain string comparison of the version
    /// * `Err(ResolveError)` - Transport failure, or no version survived
    ///   filtering
    pub async fn resolve(
        &self,
        source: &dyn ListingSource,
        request: &ResolveRequest<'_>,
    ) -> Result<Vec<ResolvedAsset>, ResolveError> {
        let items = fetch_all_items(source).await?;
        let listed = items.len();
        debug!("Processing {} total items", listed);

        let prefix = normalize_prefix(request.path_prefix);
        debug!("Looking for distribution path: {}", prefix);

        let mut seen_versions = HashSet::new();
        let mut ignored = Vec::new();
        let mut assets = Vec::new();

        for item in items {
            if !has_path_prefix(&item.path, &prefix) {
                debug!("Ignoring {}: path does not start with {}", item.path, prefix);
                ignored.push(item.path);
                continue;
            }

            let Some(extraction) = self.extractor.extract_by_type(&item.path, request.sdk_type)
            else {
                debug!("No version extracted from {}", item.path);
                ignored.push(item.path);
                continue;
            };

            if !seen_versions.insert(extraction.version.clone()) {
                debug!(
                    "Skipping {}: version {} already resolved",
                    item.path, extraction.version
                );
                continue;
            }

            debug!(
                "Extracted version {} from {} (pattern: {})",
                extraction.version, item.path, extraction.pattern_name
            );
            assets.push(ResolvedAsset {
                version: extraction.version,
                download_url: item.download_url,
                pattern_name: extraction.pattern_name,
            });
        }

        if !ignored.is_empty() {
            debug!("Ignored {} files:", ignored.len());
            for path in &ignored {
                debug!("  - {}", path);
            }
        }

        if assets.is_empty() {
            return Err(ResolveError::NoVersionsFound {
                prefix: request.path_prefix.to_string(),
                listed,
            });
        }

        if let Some(filter) = request.version_filter.filter(|f| !f.is_empty()) {
            let available = assets.len();
            assets.retain(|asset| asset.version.contains(filter));

            if assets.is_empty() {
                return Err(ResolveError::NoMatchingVersion {
                    filter: filter.to_string(),
                    prefix: request.path_prefix.to_string(),
                    available,
                });
            }
        }

        assets.sort_by(|a, b| b.version.cmp(&a.version));

        info!(
            "Resolved {} versions under {} from {} listed items",
            assets.len(),
            prefix,
            listed
        );
        Ok(assets)
    }
}

/// Fetch every page of the listing before any filtering happens.
///
/// Pages are requested one after another; the first failure aborts the
/// whole listing.
pub async fn fetch_all_items(source: &dyn ListingSource) -> Result<Vec<ListingItem>, RegistryError> {
    let mut items = Vec::new();
    let mut continuation_token: Option<String> = None;
    let mut seen_tokens = HashSet::new();
    let mut page_count = 0;

    loop {
        page_count += 1;
        debug!("Fetching page {}", page_count);

        let page = source.fetch_page(continuation_token.take()).await?;
        let next_token = page.next_token().map(str::to_string);

        debug!("Received {} items on page {}", page.items.len(), page_count);
        items.extend(page.items);

        match next_token {
            Some(token) => {
                if !seen_tokens.insert(token.clone()) {
                    return Err(RegistryError::InvalidResponse(format!(
                        "continuation token {} returned twice",
                        token
                    )));
                }
                continuation_token = Some(token);
            }
            None => {
                debug!("Pagination complete. Total items: {}", items.len());
                return Ok(items);
            }
        }
    }
}

/// Normalize a distribution path to start and end with `/`.
///
/// - "jdk/temurin" -> "/jdk/temurin/"
/// - "/jdk/temurin/" -> "/jdk/temurin/"
/// - "" -> "/"
pub fn normalize_prefix(path_prefix: &str) -> String {
    let mut prefix = format!("/{}", path_prefix.trim_start_matches('/'));
    if !prefix.ends_with('/') {
        prefix.push('/');
    }
    prefix
}

/// Segment-boundary prefix match; `prefix` must already be normalized.
///
/// Listing paths without a leading `/` are compared as if they had one.
pub fn has_path_prefix(path: &str, prefix: &str) -> bool {
    if path.starts_with('/') {
        path.starts_with(prefix)
    } else {
        prefix
            .strip_prefix('/')
            .is_some_and(|relative| path.starts_with(relative))
    }
}
