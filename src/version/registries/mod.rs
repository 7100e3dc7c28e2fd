//! Listing source implementations for artifact registries

pub mod nexus;

use std::str::FromStr;
use std::sync::Arc;

pub use nexus::NexusRegistry;

use crate::version::error::RegistryError;
use crate::version::registry::ListingSource;
use crate::version::types::Credentials;

/// Kind of artifact registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    /// Sonatype Nexus Repository Manager 3
    Nexus,
}

impl RegistryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryKind::Nexus => "nexus",
        }
    }
}

impl FromStr for RegistryKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nexus" => Ok(RegistryKind::Nexus),
            other => Err(RegistryError::UnsupportedKind(other.to_string())),
        }
    }
}

/// Create the listing source for one repository of a registry
pub fn create_listing_source(
    kind: RegistryKind,
    api_url: &str,
    repository: &str,
    credentials: Option<Credentials>,
) -> Result<Arc<dyn ListingSource>, RegistryError> {
    match kind {
        RegistryKind::Nexus => Ok(Arc::new(NexusRegistry::new(
            api_url,
            repository,
            credentials,
        )?)),
    }
}
