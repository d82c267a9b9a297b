//! Tests for configuration loading.

use std::io::Write;

use normcheck_core::config::NormcheckConfig;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = NormcheckConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.columns.effective_outline(), "outline");
    assert_eq!(config.matching.effective_usage_overlap_threshold(), 2);
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("normcheck.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "[matching]\nusage_overlap_threshold = 3\nparameter_tag = \"Kennwert\""
    )
    .unwrap();

    let config = NormcheckConfig::load(&path).unwrap();
    assert_eq!(config.matching.effective_usage_overlap_threshold(), 3);
    assert_eq!(config.matching.effective_parameter_tag(), "Kennwert");
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[matching\n???").unwrap();
    assert!(NormcheckConfig::load(&path).is_err());
}
