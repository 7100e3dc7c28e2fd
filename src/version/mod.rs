//! Version resolution layer for SDK distributions
//!
//! This module turns a raw registry listing into the set of installable
//! versions of one distribution, using a user-editable table of regex
//! naming conventions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│  Resolver   │────▶│  Grouping   │
//! │ (page fetch)│     │(filter,dedup│     │ (display)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Extractor  │     │   Compare   │
//!                     │ (patterns)  │     │(version cmp)│
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`compare`]: major version extraction and version ordering
//! - [`pattern`]: pattern sets, SDK types and pattern file loading
//! - [`extractor`]: first-match-wins version extraction from paths
//! - [`registry`]: listing source trait for paginated registry listings
//! - [`registries`]: concrete listing sources (Nexus)
//! - [`resolver`]: pagination, prefix filtering, deduplication and sorting
//! - [`grouping`]: major-version grouping used for human-facing output
//! - [`error`]: error types for registry, resolution and pattern operations
//! - [`types`]: listing items, pages, credentials and resolved assets

pub mod compare;
pub mod error;
pub mod extractor;
pub mod grouping;
pub mod pattern;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod types;
