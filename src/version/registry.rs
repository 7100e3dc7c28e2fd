//! Listing source trait for paginated registry listings

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::ListingPage;

/// Trait for fetching one page of a remote registry listing
///
/// Implementations carry their endpoint and credentials; when credentials
/// are configured every page request must send them.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches one page of the listing
    ///
    /// # Arguments
    /// * `continuation_token` - `None` for the first page, otherwise the token
    ///   returned with the previous page
    ///
    /// # Returns
    /// * `Ok(ListingPage)` - Items of this page and the token of the next one
    /// * `Err(RegistryError)` - Transport failure or non-success status
    async fn fetch_page(
        &self,
        continuation_token: Option<String>,
    ) -> Result<ListingPage, RegistryError>;
}
