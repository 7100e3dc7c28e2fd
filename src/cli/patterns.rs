//! `patterns` command

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::cli::load_extractor;
use crate::version::extractor::{Extraction, Extractor, InvalidRule};
use crate::version::pattern::{PatternSet, ensure_patterns_file};

/// Which pattern sets `patterns check` tries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckScope<'a> {
    Any,
    Type(&'a str),
    Distribution(&'a str),
}

impl<'a> CheckScope<'a> {
    pub fn from_args(sdk_type: Option<&'a str>, distribution: Option<&'a str>) -> Self {
        match (sdk_type, distribution) {
            (Some(sdk_type), _) => CheckScope::Type(sdk_type),
            (None, Some(distribution)) => CheckScope::Distribution(distribution),
            (None, None) => CheckScope::Any,
        }
    }

    fn extract(self, extractor: &Extractor, path: &str) -> Option<Extraction> {
        match self {
            CheckScope::Any => extractor.extract_any(path),
            CheckScope::Type(sdk_type) => extractor.extract_by_type(path, sdk_type),
            CheckScope::Distribution(name) => extractor.extract_by_distribution(path, name),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOutput<'a> {
    patterns: Vec<&'a PatternSet>,
    invalid_rules: &'a [InvalidRule],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput<'a> {
    path: &'a str,
    version: Option<String>,
    pattern_name: Option<String>,
    invalid_rules: &'a [InvalidRule],
}

#[derive(Debug, Serialize)]
struct InitOutput<'a> {
    path: &'a Path,
    created: bool,
}

pub fn list(
    patterns_path: &Path,
    sdk_type: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let extractor = load_extractor(patterns_path)?;
    let sets: Vec<&PatternSet> = match sdk_type {
        Some(sdk_type) => extractor.patterns_for_type(sdk_type).collect(),
        None => extractor.patterns().collect(),
    };

    if json {
        let output = ListOutput {
            patterns: sets,
            invalid_rules: extractor.invalid_rules(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    let mut text = format!("Patterns file: {}\n", patterns_path.display());
    for set in sets {
        text.push_str(&format!("\n{} [{}]", set.name, set.sdk_type));
        if !set.description.is_empty() {
            text.push_str(&format!(" {}", set.description));
        }
        text.push('\n');
        for pattern in &set.patterns {
            text.push_str(&format!("  {}\n", pattern));
        }
    }
    text.push_str(&render_invalid_rules(extractor.invalid_rules()));

    write!(out, "{}", text)?;
    Ok(())
}

pub fn check(
    patterns_path: &Path,
    path: &str,
    scope: CheckScope<'_>,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let extractor = load_extractor(patterns_path)?;
    let extraction = scope.extract(&extractor, path);

    if json {
        let (version, pattern_name) = match extraction {
            Some(Extraction {
                version,
                pattern_name,
            }) => (Some(version), Some(pattern_name)),
            None => (None, None),
        };
        let output = CheckOutput {
            path,
            version,
            pattern_name,
            invalid_rules: extractor.invalid_rules(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    let mut text = match extraction {
        Some(extraction) => format!(
            "{}: version {} (pattern: {})\n",
            path, extraction.version, extraction.pattern_name
        ),
        None => format!("{}: no version found\n", path),
    };
    text.push_str(&render_invalid_rules(extractor.invalid_rules()));

    write!(out, "{}", text)?;
    Ok(())
}

pub fn init(patterns_path: &Path, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let created = ensure_patterns_file(patterns_path)?;

    if json {
        let output = InitOutput {
            path: patterns_path,
            created,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else if created {
        writeln!(out, "Created patterns file at {}", patterns_path.display())?;
    } else {
        writeln!(
            out,
            "Patterns file already exists at {}",
            patterns_path.display()
        )?;
    }
    Ok(())
}

fn render_invalid_rules(rules: &[InvalidRule]) -> String {
    if rules.is_empty() {
        return String::new();
    }

    let mut text = String::from("\nInvalid patterns (skipped):\n");
    for rule in rules {
        text.push_str(&format!("  {}: {}\n", rule.pattern_name, rule.source));
        text.push_str(&format!(
            "    {}\n",
            rule.error.lines().last().unwrap_or_default()
        ));
    }
    text
}
