use semver::Version;

/// Result of parsing a dotted version string.
///
/// Only `major.minor.patch` with three base-10 components is `Valid`.
/// Pre-release and build suffixes are not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedVersion {
    Valid(Version),
    Invalid,
}

impl ParsedVersion {
    /// Returns the parsed triple, if any
    pub fn as_version(&self) -> Option<&Version> {
        match self {
            ParsedVersion::Valid(version) => Some(version),
            ParsedVersion::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ParsedVersion::Valid(_))
    }
}

/// Parse a version string into a (major, minor, patch) triple.
///
/// Never fails: anything that is not exactly three dot-separated runs of ASCII
/// digits yields `ParsedVersion::Invalid`.
///
/// Examples:
/// - "3.0.2" -> Valid(3.0.2)
/// - "1.10.0" -> Valid(1.10.0)
/// - "1.0" -> Invalid
/// - "abc.0.0" -> Invalid
/// - "1.0.0-beta" -> Invalid
pub fn parse_version(version: &str) -> ParsedVersion {
    let parts: Vec<Option<u64>> = version.split('.').map(parse_component).collect();

    match parts.as_slice() {
        [Some(major), Some(minor), Some(patch)] => {
            ParsedVersion::Valid(Version::new(*major, *minor, *patch))
        }
        _ => ParsedVersion::Invalid,
    }
}

fn parse_component(part: &str) -> Option<u64> {
    // u64::from_str accepts a leading '+', which is not a digit
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Returns true if `target` is strictly newer than `current`.
///
/// Components are compared numerically in (major, minor, patch) order.
/// Returns false whenever either side fails to parse.
pub fn is_newer(current: &str, target: &str) -> bool {
    match (parse_version(current), parse_version(target)) {
        (ParsedVersion::Valid(current), ParsedVersion::Valid(target)) => target > current,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3.0.2", Some((3, 0, 2)))]
    #[case("0.0.0", Some((0, 0, 0)))]
    #[case("1.10.0", Some((1, 10, 0)))]
    #[case("01.2.3", Some((1, 2, 3)))] // leading zeros are still base-10
    #[case("1.0", None)] // too few components
    #[case("1.0.0.0", None)] // too many components
    #[case("", None)]
    #[case("abc.0.0", None)]
    #[case("1..0", None)] // empty component
    #[case("1.0.0-beta", None)] // pre-release suffix
    #[case("+1.0.0", None)]
    #[case("-1.0.0", None)]
    #[case(" 1.0.0", None)]
    #[case("v1.0.0", None)]
    #[case("99999999999999999999.0.0", None)] // overflows u64
    fn parse_version_returns_expected_triple(
        #[case] input: &str,
        #[case] expected: Option<(u64, u64, u64)>,
    ) {
        let expected = match expected {
            Some((major, minor, patch)) => ParsedVersion::Valid(Version::new(major, minor, patch)),
            None => ParsedVersion::Invalid,
        };
        assert_eq!(parse_version(input), expected);
    }

    #[rstest]
    #[case("1.0.0", "1.0.1", true)]
    #[case("1.0.1", "1.0.0", false)]
    #[case("1.0.0", "1.1.0", true)]
    #[case("1.1.0", "1.0.9", false)]
    #[case("1.9.9", "2.0.0", true)] // major rollover beats minor and patch
    #[case("2.0.0", "1.9.9", false)]
    #[case("1.2.0", "1.10.0", true)] // numeric, not string, comparison
    #[case("3.0.2", "3.1.0", true)]
    #[case("3.0.2", "3.0.2", false)]
    #[case("1.0", "2.0.0", false)] // malformed current
    #[case("1.0.0", "2.0", false)] // malformed target
    #[case("abc.0.0", "1.0.0", false)]
    #[case("1.0.0", "abc.0.0", false)]
    #[case("1.0.0", "2.0.0-rc.1", false)]
    fn is_newer_returns_expected(
        #[case] current: &str,
        #[case] target: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_newer(current, target), expected);
    }

    #[rstest]
    #[case("0.0.0")]
    #[case("1.2.3")]
    #[case("3.0.2")]
    #[case("10.20.30")]
    fn is_newer_is_false_against_itself(#[case] version: &str) {
        assert!(!is_newer(version, version));
    }

    #[test]
    fn parsed_version_exposes_inner_version() {
        let parsed = parse_version("2.4.6");
        assert!(parsed.is_valid());
        assert_eq!(parsed.as_version(), Some(&Version::new(2, 4, 6)));

        let invalid = parse_version("2.4");
        assert!(!invalid.is_valid());
        assert_eq!(invalid.as_version(), None);
    }
}
