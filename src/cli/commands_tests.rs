use super::*;
use std::io::Write;
use tempfile::TempDir;

// =========================================================================
// format_number Tests
// =========================================================================

#[test]
fn test_format_number_integer() {
    assert_eq!(format_number(100.0), "100");
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(-50.0), "-50");
}

#[test]
fn test_format_number_removes_trailing_zeros() {
    assert_eq!(format_number(24.500000), "24.5");
    assert_eq!(format_number(26.25), "26.25");
    assert_eq!(format_number(10.000), "10");
}

#[test]
fn test_format_number_precision() {
    assert_eq!(format_number(0.123456789), "0.123457");
    assert_eq!(format_number(1.0000001), "1");
}

// =========================================================================
// load_rules Tests
// =========================================================================

#[test]
fn test_load_rules_valid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"[{{"keyword":"GLASS BEADS","tariff":"701810","duty_formula":"20%","duty_percent":20,"value":0.0}}]"#
    )
    .unwrap();

    let rules = load_rules(&path).unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].keyword, "GLASS BEADS");
    assert_eq!(rules[0].duty_percent, 20);
}

#[test]
fn test_load_rules_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(matches!(load_rules(&path), Err(AircostError::Parse(_))));
}

#[test]
fn test_load_rules_missing_file() {
    let path = PathBuf::from("definitely_missing_rules.json");
    assert!(matches!(load_rules(&path), Err(AircostError::Io(_))));
}

// =========================================================================
// show Tests
// =========================================================================

#[test]
fn test_show_unknown_id_is_store_error() {
    let dir = TempDir::new().unwrap();
    let result = show("nope".to_string(), dir.path().to_path_buf());
    assert!(matches!(result, Err(AircostError::Store(_))));
}
