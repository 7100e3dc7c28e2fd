mod helper;

use std::cmp::Ordering;

use rstest::rstest;

use helper::{FakeListing, builtin_resolver};
use sdk_resolver::version::compare::{compare_versions, extract_major, is_older};
use sdk_resolver::version::error::ResolveError;
use sdk_resolver::version::extractor::Extractor;
use sdk_resolver::version::grouping::group_by_major;
use sdk_resolver::version::pattern::{PatternSet, PatternTable};
use sdk_resolver::version::resolver::ResolveRequest;

fn builtin_extractor() -> Extractor {
    Extractor::load(PatternTable::builtin().unwrap())
}

#[rstest]
#[case(
    "/jdk/temurin/OpenJDK21U-jdk_x64_linux_hotspot_21.0.6_7.tar.gz",
    "21.0.6_7",
    "temurin"
)]
#[case(
    "/jdk/temurin/OpenJDK8U-jdk_aarch64_linux_hotspot_8u442b06.tar.gz",
    "8u442b06",
    "temurin"
)]
#[case(
    "/jdk/corretto/amazon-corretto-21.0.6.7.1-linux-x64.tar.gz",
    "21.0.6.7.1",
    "corretto"
)]
#[case(
    "/jdk/zulu/zulu21.40.17-ca-jdk21.0.6-linux_x64.tar.gz",
    "21.0.6",
    "zulu"
)]
#[case(
    "/jdk/graalvm/graalvm-community-jdk-21.0.2_linux-x64_bin.tar.gz",
    "21.0.2",
    "graalvm"
)]
#[case("/node/node-v22.11.0-linux-x64.tar.xz", "22.11.0", "nodejs")]
#[case("/python/Python-3.12.8.tgz", "3.12.8", "python")]
#[case("/misc/tool-1.2.3.zip", "1.2.3", "generic-version")]
fn builtin_patterns_extract_known_distributions(
    #[case] path: &str,
    #[case] version: &str,
    #[case] pattern_name: &str,
) {
    let extraction = builtin_extractor().extract_any(path).unwrap();

    assert_eq!(extraction.version, version);
    assert_eq!(extraction.pattern_name, pattern_name);
}

#[test]
fn builtin_patterns_compile_without_invalid_rules() {
    let extractor = builtin_extractor();

    assert!(extractor.invalid_rules().is_empty());
    assert_eq!(extractor.sdk_types(), vec!["jdk", "node", "python"]);
}

#[test]
fn builtin_type_filter_falls_back_to_wildcard() {
    let extraction = builtin_extractor()
        .extract_by_type("/jdk/temurin/jdk-21.0.6_7.tar.gz", "node")
        .unwrap();

    assert_eq!(extraction.version, "21.0.6");
    assert_eq!(extraction.pattern_name, "generic-version");
}

#[test]
fn custom_patterns_take_priority_over_builtin() {
    let custom = vec![PatternSet::new(
        "temurin-build",
        "jdk",
        &[r"hotspot_(\d+\.\d+\.\d+_\d+)\.tar\.gz$"],
    )];
    let extractor = Extractor::with_custom_patterns(PatternTable::builtin().unwrap(), custom);

    let extraction = extractor
        .extract_by_type(
            "/jdk/temurin/OpenJDK21U-jdk_x64_linux_hotspot_21.0.6_7.tar.gz",
            "jdk",
        )
        .unwrap();

    assert_eq!(extraction.pattern_name, "temurin-build");
}

#[rstest]
#[case("11.0.2_9", "11.0.10_9", Ordering::Less)]
#[case("8u442b06", "11.0.26_4", Ordering::Less)]
#[case("21.0.6", "21.0.6_7", Ordering::Less)]
#[case("17.0.14_7", "17.0.14_7", Ordering::Equal)]
#[case("17.0.10", "17.0.10+1", Ordering::Less)]
#[case("17.0.10+1", "17.0.9", Ordering::Less)]
fn compare_versions_orders_jdk_versions(
    #[case] a: &str,
    #[case] b: &str,
    #[case] expected: Ordering,
) {
    assert_eq!(compare_versions(a, b), expected);
    assert_eq!(is_older(a, b), expected == Ordering::Less);
}

#[rstest]
#[case("21.0.6_7", Some("21"))]
#[case("8u442b06", Some("8"))]
#[case("jdk-17.0.2", Some("17"))]
#[case("latest", None)]
fn extract_major_from_resolved_versions(#[case] version: &str, #[case] expected: Option<&str>) {
    assert_eq!(extract_major(version), expected);
}

#[tokio::test]
async fn resolver_and_grouping_order_versions_differently() {
    let listing = FakeListing::new()
        .with_page(&[
            ("/jdk/temurin/jdk-11.0.2_9.tar.gz", "https://nexus/11.0.2_9"),
            ("/jdk/temurin/jdk-11.0.10_9.tar.gz", "https://nexus/11.0.10_9"),
        ])
        .with_page(&[("/jdk/temurin/jdk-21.0.6_7.tar.gz", "https://nexus/21.0.6_7")]);

    let assets = builtin_resolver()
        .resolve(
            &listing,
            &ResolveRequest {
                path_prefix: "jdk/temurin",
                sdk_type: "jdk",
                version_filter: None,
            },
        )
        .await
        .unwrap();

    let raw: Vec<&str> = assets.iter().map(|a| a.version.as_str()).collect();
    assert_eq!(raw, vec!["21.0.6_7", "11.0.2_9", "11.0.10_9"]);

    let groups = group_by_major(&assets);
    assert_eq!(groups[0].versions, vec!["11.0.2_9", "11.0.10_9"]);
    assert_eq!(groups[1].versions, vec!["21.0.6_7"]);

    assert_eq!(
        listing.requested_tokens(),
        vec![None, Some("page-1".to_string())]
    );
}

#[tokio::test]
async fn resolver_distinguishes_empty_prefix_from_excluding_filter() {
    let listing = FakeListing::new().with_page(&[(
        "/jdk/temurin/jdk-21.0.6_7.tar.gz",
        "https://nexus/21.0.6_7",
    )]);
    let resolver = builtin_resolver();

    let empty = resolver
        .resolve(
            &listing,
            &ResolveRequest {
                path_prefix: "jdk/zulu",
                sdk_type: "jdk",
                version_filter: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        empty,
        ResolveError::NoVersionsFound { listed: 1, .. }
    ));

    let excluded = resolver
        .resolve(
            &listing,
            &ResolveRequest {
                path_prefix: "jdk/temurin",
                sdk_type: "jdk",
                version_filter: Some("17"),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        excluded,
        ResolveError::NoMatchingVersion { available: 1, .. }
    ));
}
