use std::cmp::Ordering;

use semver::Version;

use crate::release::error::VersionError;

/// Parse a version string under strict semantic-version rules.
///
/// Unlike lenient parsers, partial versions ("1.2") and prefixes ("v1.2.3")
/// are rejected.
pub fn parse_strict(version: &str) -> Result<Version, VersionError> {
    Version::parse(version).map_err(|source| VersionError::InvalidVersion {
        version: version.to_string(),
        source,
    })
}

/// Compare two strict semantic versions.
///
/// Returns the precedence of `a` relative to `b`. Numeric components compare
/// numerically, pre-releases sort before their release and build metadata
/// is ignored.
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, VersionError> {
    let a = parse_strict(a)?;
    let b = parse_strict(b)?;
    Ok(a.cmp_precedence(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.0", "1.10.0", Ordering::Less)] // numeric, not lexicographic
    #[case("2.0.0", "2.0.0", Ordering::Equal)]
    #[case("3.0.0", "2.9.9", Ordering::Greater)]
    #[case("2.1.0-rc.1", "2.1.0", Ordering::Less)]
    #[case("2.1.0-alpha.10", "2.1.0-alpha.9", Ordering::Greater)]
    #[case("2.1.0+a", "2.1.0+b", Ordering::Equal)] // build metadata has no precedence
    #[case("2.1.0+build.7", "2.1.0", Ordering::Equal)]
    #[case("2.1.0-rc.1+a", "2.1.0+a", Ordering::Less)]
    fn compare_versions_orders_strict_versions(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_versions(a, b).unwrap(), expected);
        assert_eq!(compare_versions(b, a).unwrap(), expected.reverse());
    }

    #[rstest]
    #[case("1.2")]
    #[case("v1.2.3")]
    #[case("1.2.3.4")]
    #[case("01.2.3")]
    #[case("")]
    #[case("latest")]
    fn compare_versions_rejects_non_strict_versions(#[case] version: &str) {
        let result = compare_versions(version, "1.0.0");

        assert!(matches!(
            result,
            Err(VersionError::InvalidVersion { version: ref v, .. }) if v == version
        ));
        assert!(compare_versions("1.0.0", version).is_err());
    }
}
