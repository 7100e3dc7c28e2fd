//! Nexus repository manager assets API implementation

use std::time::Duration;

use reqwest::Url;
use tracing::{debug, warn};

use crate::config::FETCH_TIMEOUT_MS;
use crate::version::error::RegistryError;
use crate::version::registry::ListingSource;
use crate::version::types::{Credentials, ListingPage};

/// Placeholder in the configured API URL replaced by the repository name
const REPOSITORY_PLACEHOLDER: &str = "{repository}";

/// Listing source for the Nexus `/service/rest/v1/assets` endpoint
pub struct NexusRegistry {
    client: reqwest::Client,
    assets_url: String,
    credentials: Option<Credentials>,
}

impl NexusRegistry {
    /// Creates a NexusRegistry for one repository
    ///
    /// `api_url` may contain `{repository}`, e.g.
    /// `https://nexus.example.com/service/rest/v1/assets?repository={repository}`.
    pub fn new(
        api_url: &str,
        repository: &str,
        credentials: Option<Credentials>,
    ) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .user_agent("sdk-resolver")
            .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
            .build()?;

        let assets_url = api_url.replace(REPOSITORY_PLACEHOLDER, repository);
        debug!("Nexus assets URL: {}", assets_url);
        if let Some(credentials) = &credentials {
            debug!("Using Basic Auth with username: {}", credentials.username);
        }

        Ok(Self {
            client,
            assets_url,
            credentials,
        })
    }

    fn page_url(&self, continuation_token: Option<&str>) -> Result<Url, RegistryError> {
        let mut url = Url::parse(&self.assets_url).map_err(|e| RegistryError::InvalidUrl {
            url: self.assets_url.clone(),
            reason: e.to_string(),
        })?;

        if let Some(token) = continuation_token {
            url.query_pairs_mut()
                .append_pair("continuationToken", token);
        }

        Ok(url)
    }
}

#[async_trait::async_trait]
impl ListingSource for NexusRegistry {
    async fn fetch_page(
        &self,
        continuation_token: Option<String>,
    ) -> Result<ListingPage, RegistryError> {
        let url = self.page_url(continuation_token.as_deref())?;
        debug!("Nexus API URL: {}", url);

        let mut request = self
            .client
            .get(url.clone())
            .header("Accept", "application/json");
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Nexus returned status {}: {}", status, url);
            return Err(RegistryError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let page: ListingPage = response.json().await.map_err(|e| {
            warn!("Failed to parse Nexus assets response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        debug!("Received {} items", page.items.len());
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const ASSETS_PATH: &str = "/service/rest/v1/assets";

    fn api_url(server: &Server) -> String {
        format!("{}{}?repository={{repository}}", server.url(), ASSETS_PATH)
    }

    #[tokio::test]
    async fn fetch_page_substitutes_repository_and_parses_items() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", ASSETS_PATH)
            .match_query(Matcher::Exact("repository=raw".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "items": [
                        {
                            "path": "/jdk/temurin/jdk-21.0.6_7.tar.gz",
                            "downloadUrl": "http://nexus/repository/raw/jdk/temurin/jdk-21.0.6_7.tar.gz"
                        }
                    ],
                    "continuationToken": "page-2"
                }"#,
            )
            .create_async()
            .await;

        let registry = NexusRegistry::new(&api_url(&server), "raw", None).unwrap();
        let page = registry.fetch_page(None).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.items.len(), 1);
        assert_eq!(
            page.items[0].download_url,
            "http://nexus/repository/raw/jdk/temurin/jdk-21.0.6_7.tar.gz"
        );
        assert_eq!(page.next_token(), Some("page-2"));
    }

    #[tokio::test]
    async fn fetch_page_sends_encoded_continuation_token() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", ASSETS_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("repository".to_string(), "raw".to_string()),
                Matcher::UrlEncoded("continuationToken".to_string(), "a+b/c&d".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"items": [], "continuationToken": null}"#)
            .create_async()
            .await;

        let registry = NexusRegistry::new(&api_url(&server), "raw", None).unwrap();
        let page = registry
            .fetch_page(Some("a+b/c&d".to_string()))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(page.items.is_empty());
        assert_eq!(page.next_token(), None);
    }

    #[tokio::test]
    async fn fetch_page_sends_basic_auth_when_credentials_configured() {
        let mut server = Server::new_async().await;

        // admin:s3cret
        let mock = server
            .mock("GET", ASSETS_PATH)
            .match_query(Matcher::Any)
            .match_header("authorization", "Basic YWRtaW46czNjcmV0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"items": []}"#)
            .create_async()
            .await;

        let credentials = Credentials::from_parts(Some("admin"), Some("s3cret"));
        let registry = NexusRegistry::new(&api_url(&server), "raw", credentials).unwrap();
        registry.fetch_page(None).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_page_is_anonymous_without_credentials() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", ASSETS_PATH)
            .match_query(Matcher::Any)
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"items": []}"#)
            .create_async()
            .await;

        let registry = NexusRegistry::new(&api_url(&server), "raw", None).unwrap();
        registry.fetch_page(None).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_page_returns_http_status_error_for_non_success() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", ASSETS_PATH)
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let registry = NexusRegistry::new(&api_url(&server), "raw", None).unwrap();
        let result = registry.fetch_page(None).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(RegistryError::HttpStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn fetch_page_returns_invalid_response_for_malformed_body() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", ASSETS_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let registry = NexusRegistry::new(&api_url(&server), "raw", None).unwrap();
        let result = registry.fetch_page(None).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_page_rejects_unparseable_url() {
        let registry = NexusRegistry::new("not a url", "raw", None).unwrap();
        let result = registry.fetch_page(None).await;

        assert!(matches!(result, Err(RegistryError::InvalidUrl { .. })));
    }
}
