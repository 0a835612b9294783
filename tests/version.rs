use results_page::version::parse::{ParsedVersion, is_newer, parse_version};

#[test]
fn is_newer_matches_documented_examples() {
    assert!(is_newer("1.0.0", "1.0.1"));
    assert!(!is_newer("1.0.1", "1.0.0"));
    assert!(is_newer("1.9.9", "2.0.0"));
    assert!(is_newer("1.2.0", "1.10.0"));
    assert!(!is_newer("1.0", "2.0.0"));
    assert!(!is_newer("abc.0.0", "1.0.0"));
}

#[test]
fn is_newer_is_false_for_every_version_against_itself() {
    for major in 0..4 {
        for minor in [0, 1, 9, 10] {
            for patch in [0, 2, 11] {
                let version = format!("{major}.{minor}.{patch}");
                assert!(!is_newer(&version, &version), "{version}");
            }
        }
    }
}

#[test]
fn is_newer_is_asymmetric_for_distinct_versions() {
    let versions = ["0.0.1", "0.1.0", "1.0.0", "1.2.0", "1.10.0", "2.0.0"];

    for (i, lower) in versions.iter().enumerate() {
        for higher in &versions[i + 1..] {
            assert!(is_newer(lower, higher), "{lower} -> {higher}");
            assert!(!is_newer(higher, lower), "{higher} -> {lower}");
        }
    }
}

#[test]
fn parse_version_never_panics_on_odd_input() {
    for input in ["", ".", "..", "...", "1.2.3.", ".1.2.3", "١.٢.٣", "NaN.NaN.NaN"] {
        assert_eq!(parse_version(input), ParsedVersion::Invalid, "{input:?}");
    }
}
