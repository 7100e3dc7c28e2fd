//! `available` command: SDK types, distributions and versions

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::bail;
use serde::Serialize;
use tracing::debug;

use crate::cli::{AvailableArgs, load_extractor};
use crate::config::AppConfig;
use crate::version::grouping::{available_majors, filter_by_major, group_by_major};
use crate::version::registries::{RegistryKind, create_listing_source};
use crate::version::resolver::{ResolveRequest, VersionResolver};
use crate::version::types::ResolvedAsset;

/// JSON shape of the `available` command
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct AvailableOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub distributions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<ResolvedAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn run(
    args: &AvailableArgs,
    config: &AppConfig,
    patterns_path: &Path,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let types = config.sdk_types();

    let Some(sdk_type) = args.sdk_type.as_deref() else {
        return emit(
            out,
            json,
            AvailableOutput {
                types: to_owned(&types),
                ..Default::default()
            },
            render_list("Available SDK types", &types),
        );
    };

    if !types.contains(&sdk_type) {
        bail!(
            "invalid SDK type '{}'. Available types: {}",
            sdk_type,
            types.join(", ")
        );
    }

    let distributions = config.distributions(sdk_type);

    let Some(distribution) = args.distribution.as_deref() else {
        return emit(
            out,
            json,
            AvailableOutput {
                distributions: to_owned(&distributions),
                ..Default::default()
            },
            render_list(&format!("Available {} distributions", sdk_type), &distributions),
        );
    };

    if !distributions.contains(&distribution) {
        bail!(
            "invalid distribution '{}' for type '{}'. Available distributions: {}",
            distribution,
            sdk_type,
            distributions.join(", ")
        );
    }

    let assets = resolve_distribution(config, distribution, patterns_path, args).await;

    let assets = match assets {
        Ok(assets) => assets,
        Err(e) if json => {
            return emit(
                out,
                json,
                AvailableOutput {
                    error: Some(format!("{:#}", e)),
                    ..Default::default()
                },
                String::new(),
            );
        }
        Err(e) => return Err(e),
    };

    let Some(major) = args.major.as_deref() else {
        let text = render_versions(&assets);
        return emit(
            out,
            json,
            AvailableOutput {
                versions: assets,
                ..Default::default()
            },
            text,
        );
    };

    let selected = filter_by_major(&assets, major);
    debug!(
        "{} of {} versions have major version {}",
        selected.len(),
        assets.len(),
        major
    );

    if selected.is_empty() {
        let majors = available_majors(&assets);
        return emit(
            out,
            json,
            AvailableOutput {
                error: Some(format!(
                    "no version found with major version {}; available major versions: {}",
                    major,
                    join_majors(&majors)
                )),
                ..Default::default()
            },
            render_missing_major(major, &majors),
        );
    }

    let text = render_versions(&selected);
    emit(
        out,
        json,
        AvailableOutput {
            versions: selected,
            ..Default::default()
        },
        text,
    )
}

async fn resolve_distribution(
    config: &AppConfig,
    distribution: &str,
    patterns_path: &Path,
    args: &AvailableArgs,
) -> anyhow::Result<Vec<ResolvedAsset>> {
    let (repository, registry) = config.distribution(distribution)?;
    let kind: RegistryKind = registry.kind.parse()?;

    let source = create_listing_source(
        kind,
        &registry.api_url,
        &repository.repository,
        registry.credentials(),
    )?;
    let resolver = VersionResolver::new(Arc::new(load_extractor(patterns_path)?));

    let request = ResolveRequest {
        path_prefix: &repository.path,
        sdk_type: &repository.sdk_type,
        version_filter: args.contains.as_deref(),
    };

    Ok(resolver.resolve(source.as_ref(), &request).await?)
}

fn emit(
    out: &mut impl Write,
    json: bool,
    output: AvailableOutput,
    text: String,
) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        write!(out, "{}", text)?;
    }
    Ok(())
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn join_majors(majors: &[u64]) -> String {
    majors
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_list(title: &str, entries: &[&str]) -> String {
    if entries.is_empty() {
        return format!("{}: none configured\n", title);
    }

    let lines: String = entries.iter().map(|entry| format!("  {}\n", entry)).collect();
    format!("{}:\n{}", title, lines)
}

/// Versions grouped by major, oldest first within each group
fn render_versions(assets: &[ResolvedAsset]) -> String {
    let groups = group_by_major(assets);
    if groups.is_empty() {
        return "No version with a numeric major version found\n".to_string();
    }

    let mut text = String::from("Available versions:\n");
    for group in groups {
        text.push_str(&format!("{}:\n", group.major));
        for version in group.versions {
            text.push_str(&format!("  {}\n", version));
        }
    }
    text
}

fn render_missing_major(major: &str, majors: &[u64]) -> String {
    format!(
        "No version found with major version {}\nAvailable major versions: {}\n",
        major,
        join_majors(majors)
    )
}
